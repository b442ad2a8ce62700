//! Row validation for `state_bill_entries`.
//!
//! Store rows arrive as untyped JSON. [`validate`] turns one row into a
//! [`Regulation`] or a [`ValidationError`] listing every malformed field;
//! [`validate_rows`] applies it to a whole result set, dropping bad rows
//! without affecting their neighbours.

use std::fmt;

use serde_json::{Map, Value};
use tracing::warn;

use crate::regulation::{Regulation, Rule};

/// What was wrong with a single field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IssueKind {
    Missing,
    WrongType {
        expected: &'static str,
        found: &'static str,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldIssue {
    pub field: &'static str,
    pub kind: IssueKind,
}

impl fmt::Display for FieldIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            IssueKind::Missing => write!(f, "{}: missing", self.field),
            IssueKind::WrongType { expected, found } => {
                write!(f, "{}: expected {expected}, found {found}", self.field)
            }
        }
    }
}

/// A row that could not be turned into a [`Regulation`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("row is not an object (found {found})")]
    NotAnObject { found: &'static str },

    #[error("{}: {}", describe_bill(.bill), join_issues(.issues))]
    InvalidFields {
        /// The row's `bill` value when it was a string.
        bill: Option<String>,
        issues: Vec<FieldIssue>,
    },
}

impl ValidationError {
    pub fn bill(&self) -> Option<&str> {
        match self {
            Self::NotAnObject { .. } => None,
            Self::InvalidFields { bill, .. } => bill.as_deref(),
        }
    }

    /// Names of the offending fields, in column order.
    pub fn fields(&self) -> Vec<&'static str> {
        match self {
            Self::NotAnObject { .. } => Vec::new(),
            Self::InvalidFields { issues, .. } => issues.iter().map(|i| i.field).collect(),
        }
    }
}

fn describe_bill(bill: &Option<String>) -> String {
    match bill {
        Some(b) => format!("bill {b:?}"),
        None => "bill <unknown>".to_string(),
    }
}

fn join_issues(issues: &[FieldIssue]) -> String {
    issues
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

// ── Field readers ──
//
// Each reader records its own issue and returns `None`, so one pass over the
// columns collects every problem in the row.

struct Reader<'a> {
    row: &'a Map<String, Value>,
    issues: Vec<FieldIssue>,
}

impl<'a> Reader<'a> {
    fn string(&mut self, field: &'static str) -> Option<&'a str> {
        match self.row.get(field) {
            Some(Value::String(s)) => Some(s.as_str()),
            Some(other) => {
                self.wrong_type(field, "string", other);
                None
            }
            None => {
                self.missing(field);
                None
            }
        }
    }

    fn boolean(&mut self, field: &'static str) -> Option<bool> {
        match self.row.get(field) {
            Some(Value::Bool(b)) => Some(*b),
            Some(other) => {
                self.wrong_type(field, "boolean", other);
                None
            }
            None => {
                self.missing(field);
                None
            }
        }
    }

    /// Explanation text: a string, or `null`/absent for the rule's placeholder.
    fn explanation(&mut self, rule: Rule) -> Option<String> {
        let field = rule.explanation_field();
        match self.row.get(field) {
            Some(Value::String(s)) => Some(s.clone()),
            Some(Value::Null) | None => Some(rule.default_explanation().to_string()),
            Some(other) => {
                self.wrong_type(field, "string or null", other);
                None
            }
        }
    }

    fn missing(&mut self, field: &'static str) {
        self.issues.push(FieldIssue {
            field,
            kind: IssueKind::Missing,
        });
    }

    fn wrong_type(&mut self, field: &'static str, expected: &'static str, found: &Value) {
        self.issues.push(FieldIssue {
            field,
            kind: IssueKind::WrongType {
                expected,
                found: type_name(found),
            },
        });
    }
}

/// Validate one raw store row.
pub fn validate(raw: &Value) -> Result<Regulation, ValidationError> {
    let row = raw.as_object().ok_or(ValidationError::NotAnObject {
        found: type_name(raw),
    })?;

    let mut r = Reader {
        row,
        issues: Vec::new(),
    };

    let bill = r.string("bill");
    let state = r.string("state");
    let status = r.string("status");
    let is_insurance_related = r.boolean("isInsuranceRelated");
    let is_rule_p1_affected = r.boolean(Rule::P1.flag_field());
    let is_rule_p2_affected = r.boolean(Rule::P2.flag_field());
    let p1_effect_explanation = r.explanation(Rule::P1);
    let p2_effect_explanation = r.explanation(Rule::P2);
    let summary = r.string("summary");
    let section = r.string("section");

    match (
        bill,
        state,
        status,
        is_insurance_related,
        is_rule_p1_affected,
        is_rule_p2_affected,
        p1_effect_explanation,
        p2_effect_explanation,
        summary,
        section,
    ) {
        (
            Some(bill),
            Some(state),
            Some(status),
            Some(is_insurance_related),
            Some(is_rule_p1_affected),
            Some(is_rule_p2_affected),
            Some(p1_effect_explanation),
            Some(p2_effect_explanation),
            Some(summary),
            Some(section),
        ) if r.issues.is_empty() => Ok(Regulation {
            bill: bill.to_string(),
            state: state.to_string(),
            status: status.trim().to_string(),
            is_insurance_related,
            is_rule_p1_affected,
            is_rule_p2_affected,
            p1_effect_explanation,
            p2_effect_explanation,
            summary: summary.to_string(),
            section: section.to_string(),
        }),
        _ => Err(ValidationError::InvalidFields {
            bill: row.get("bill").and_then(Value::as_str).map(str::to_string),
            issues: r.issues,
        }),
    }
}

/// Outcome of validating a whole result set.
#[derive(Debug, Default)]
pub struct ValidatedRows {
    /// Valid records in input order.
    pub bills: Vec<Regulation>,
    pub rejected: Vec<ValidationError>,
}

/// Validate every row independently; invalid rows are logged and set aside.
pub fn validate_rows<I>(rows: I) -> ValidatedRows
where
    I: IntoIterator<Item = Value>,
{
    let mut out = ValidatedRows::default();
    for row in rows {
        match validate(&row) {
            Ok(reg) => out.bills.push(reg),
            Err(err) => {
                warn!(
                    bill = err.bill().unwrap_or("<unknown>"),
                    fields = ?err.fields(),
                    error = %err,
                    "dropping invalid row"
                );
                out.rejected.push(err);
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn valid_row() -> Value {
        json!({
            "bill": "HB 101",
            "state": "IA",
            "status": "  Signed by Governor ",
            "isInsuranceRelated": true,
            "isRuleP1Affected": true,
            "isRuleP2Affected": false,
            "P1EffectExplanation": "Impact on Org A\n\nImpact on Rules B\n\nSuggested Next Steps: C",
            "P2EffectExplanation": null,
            "summary": "Updates long-term care disclosures.",
            "section": "Life"
        })
    }

    #[test]
    fn valid_row_is_accepted_and_status_trimmed() {
        let reg = validate(&valid_row()).unwrap();
        assert_eq!(reg.bill, "HB 101");
        assert_eq!(reg.status, "Signed by Governor");
        assert!(reg.is_rule_p1_affected);
        assert!(!reg.is_rule_p2_affected);
    }

    #[test]
    fn null_explanations_get_placeholders() {
        let mut row = valid_row();
        row["P1EffectExplanation"] = Value::Null;
        let reg = validate(&row).unwrap();
        assert_eq!(reg.p1_effect_explanation, "No effect on Rule P1");
        assert_eq!(reg.p2_effect_explanation, "No effect on Rule P2");
    }

    #[test]
    fn absent_explanation_gets_placeholder() {
        let mut row = valid_row();
        row.as_object_mut().unwrap().remove("P2EffectExplanation");
        let reg = validate(&row).unwrap();
        assert_eq!(reg.p2_effect_explanation, "No effect on Rule P2");
    }

    #[test]
    fn non_string_explanation_is_rejected() {
        let mut row = valid_row();
        row["P1EffectExplanation"] = json!(42);
        let err = validate(&row).unwrap_err();
        assert_eq!(err.fields(), vec!["P1EffectExplanation"]);
    }

    #[test]
    fn missing_required_string_is_rejected() {
        let mut row = valid_row();
        row.as_object_mut().unwrap().remove("summary");
        let err = validate(&row).unwrap_err();
        assert_eq!(err.bill(), Some("HB 101"));
        assert_eq!(
            err,
            ValidationError::InvalidFields {
                bill: Some("HB 101".into()),
                issues: vec![FieldIssue {
                    field: "summary",
                    kind: IssueKind::Missing,
                }],
            }
        );
    }

    #[test]
    fn null_required_string_is_wrong_type() {
        let mut row = valid_row();
        row["section"] = Value::Null;
        let err = validate(&row).unwrap_err();
        assert_eq!(
            err.to_string(),
            "bill \"HB 101\": section: expected string, found null"
        );
    }

    #[test]
    fn booleans_are_strict() {
        let mut row = valid_row();
        row["isRuleP1Affected"] = json!("true");
        row["isInsuranceRelated"] = json!(1);
        let err = validate(&row).unwrap_err();
        assert_eq!(err.fields(), vec!["isInsuranceRelated", "isRuleP1Affected"]);
    }

    #[test]
    fn all_issues_are_collected() {
        let row = json!({ "bill": 7 });
        let err = validate(&row).unwrap_err();
        assert_eq!(err.bill(), None);
        assert_eq!(
            err.fields(),
            vec![
                "bill",
                "state",
                "status",
                "isInsuranceRelated",
                "isRuleP1Affected",
                "isRuleP2Affected",
                "summary",
                "section",
            ]
        );
    }

    #[test]
    fn non_object_row_is_rejected() {
        let err = validate(&json!(["HB 101"])).unwrap_err();
        assert_eq!(err, ValidationError::NotAnObject { found: "array" });
    }

    #[test]
    fn invalid_rows_are_isolated() {
        let mut broken = valid_row();
        broken["bill"] = json!("HB 102");
        broken.as_object_mut().unwrap().remove("isRuleP2Affected");
        let mut third = valid_row();
        third["bill"] = json!("HB 103");

        let out = validate_rows(vec![valid_row(), broken, third]);
        let bills: Vec<&str> = out.bills.iter().map(|b| b.bill.as_str()).collect();
        assert_eq!(bills, vec!["HB 101", "HB 103"]);
        assert_eq!(out.rejected.len(), 1);
        assert_eq!(out.rejected[0].bill(), Some("HB 102"));
        assert_eq!(out.rejected[0].fields(), vec!["isRuleP2Affected"]);
    }

    #[test]
    fn empty_input_yields_empty_output() {
        let out = validate_rows(Vec::new());
        assert!(out.bills.is_empty());
        assert!(out.rejected.is_empty());
    }
}
