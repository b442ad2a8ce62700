//! CSV enhancement pass over an export of the bill table.

use std::path::Path;

use csv::StringRecord;
use regscope_core::Rule;
use tracing::{info, warn};

use crate::prompt::{BillContext, SYSTEM_PROMPT, build_prompt};
use crate::{AiError, Completer};

/// Outcome of [`process_csv`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EnhanceStats {
    /// Affected rows written to the output.
    pub rows_written: usize,
    /// Explanations replaced by a model reply.
    pub explanations_enhanced: usize,
}

/// Column positions looked up once from the header row.
struct Columns {
    bill: Option<usize>,
    state: Option<usize>,
    summary: Option<usize>,
    flag: [Option<usize>; 2],
    explanation: [Option<usize>; 2],
}

impl Columns {
    fn from_headers(headers: &StringRecord) -> Self {
        let find = |name: &str| headers.iter().position(|h| h == name);
        Self {
            bill: find("bill"),
            state: find("state"),
            summary: find("summary"),
            flag: Rule::ALL.map(|r| find(r.flag_field())),
            explanation: Rule::ALL.map(|r| find(r.explanation_field())),
        }
    }
}

fn rule_index(rule: Rule) -> usize {
    match rule {
        Rule::P1 => 0,
        Rule::P2 => 1,
    }
}

fn field(row: &[String], idx: Option<usize>) -> &str {
    idx.and_then(|i| row.get(i)).map_or("", String::as_str)
}

/// Read `input`, rewrite the explanation of every affected rule of every
/// affected row, and write only the affected rows to `output` under the
/// input's header.
///
/// A row is affected for a rule when its flag column reads `true`
/// (case-insensitive). A failed completion keeps the row's current
/// explanation. Rows are padded or cut to the header width.
pub async fn process_csv(
    input: &Path,
    output: &Path,
    completer: &dyn Completer,
) -> Result<EnhanceStats, AiError> {
    let mut reader = csv::ReaderBuilder::new().flexible(true).from_path(input)?;
    let headers = reader.headers()?.clone();
    let columns = Columns::from_headers(&headers);
    for rule in Rule::ALL {
        if columns.explanation[rule_index(rule)].is_none() {
            warn!(column = rule.explanation_field(), "column missing; Rule {rule} explanations left as-is");
        }
    }

    let mut writer = csv::Writer::from_path(output)?;
    writer.write_record(&headers)?;

    let mut stats = EnhanceStats::default();
    for (idx, record) in reader.records().enumerate() {
        let record = record?;
        let mut row: Vec<String> = record.iter().map(str::to_string).collect();
        row.resize(headers.len(), String::new());

        let affected: Vec<Rule> = Rule::ALL
            .into_iter()
            .filter(|&r| field(&row, columns.flag[rule_index(r)]).eq_ignore_ascii_case("true"))
            .collect();
        if affected.is_empty() {
            continue;
        }

        info!(row = idx + 1, bill = field(&row, columns.bill), "processing bill");
        for rule in affected {
            let Some(exp_idx) = columns.explanation[rule_index(rule)] else {
                continue;
            };
            let prompt = build_prompt(
                &BillContext {
                    bill: field(&row, columns.bill),
                    state: field(&row, columns.state),
                    summary: field(&row, columns.summary),
                    current_explanation: field(&row, Some(exp_idx)),
                },
                rule,
            );
            match completer.complete(SYSTEM_PROMPT, &prompt).await {
                Ok(text) => {
                    row[exp_idx] = text;
                    stats.explanations_enhanced += 1;
                }
                Err(e) => {
                    warn!(bill = field(&row, columns.bill), %rule, "enhancement failed, keeping current explanation: {e}");
                }
            }
        }

        writer.write_record(&row)?;
        stats.rows_written += 1;
    }
    writer.flush()?;

    info!(
        rows_written = stats.rows_written,
        explanations_enhanced = stats.explanations_enhanced,
        "enhancement complete"
    );
    Ok(stats)
}
