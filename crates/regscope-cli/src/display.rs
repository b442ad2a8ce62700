//! Vertical card display for regulations.
//!
//! Renders a [`Card`] as a grouped, human-readable block: identity line,
//! status and section, summary, then one section per rule.

use std::fmt::Write;

use regscope_core::{Card, ExplanationParts, Facets, Impact, Rule, result_count};

const LABEL_WIDTH: usize = 36;

/// Render a single card.
pub fn render_card(card: &Card) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "=== {} ===", card.title);
    field(&mut out, "Status", card.status_label);
    field(&mut out, "Section", &card.section);
    if !card.summary.is_empty() {
        let _ = writeln!(out, "\n{}", card.summary);
    }
    for rule in Rule::ALL {
        out.push('\n');
        render_impact(&mut out, rule, card.impact(rule));
    }
    out
}

/// Render every card followed by the result count line.
pub fn render_list(cards: &[Card]) -> String {
    let mut out = String::new();
    for card in cards {
        out.push_str(&render_card(card));
        out.push('\n');
    }
    out.push_str(&result_count(cards.len()));
    out.push('\n');
    out
}

/// Render distinct filter values, one group per facet.
pub fn render_facets(facets: &Facets) -> String {
    let mut out = String::new();
    for (header, values) in [
        ("States", &facets.states),
        ("Sections", &facets.sections),
        ("Statuses", &facets.statuses),
    ] {
        let _ = writeln!(out, "{header} ({})", values.len());
        for v in values {
            let _ = writeln!(out, "  {v}");
        }
    }
    out
}

// ── Section rendering ──

fn field(out: &mut String, label: &str, value: &str) {
    let _ = writeln!(out, "  {label:<LABEL_WIDTH$} {value}");
}

fn render_impact(out: &mut String, rule: Rule, impact: &Impact) {
    let _ = writeln!(out, "Rule {rule} Impact");
    match impact {
        Impact::Unaffected { label } => {
            let _ = writeln!(out, "  {label}");
        }
        Impact::Affected {
            organization_heading,
            underwriting_heading,
            parts,
        } => {
            let ExplanationParts {
                org_impact,
                rules_impact,
                next_steps,
            } = parts;
            for (heading, text) in [
                (*organization_heading, org_impact),
                (*underwriting_heading, rules_impact),
                ("Next Steps", next_steps),
            ] {
                if let Some(text) = text {
                    field(out, heading, text);
                }
            }
        }
    }
}
