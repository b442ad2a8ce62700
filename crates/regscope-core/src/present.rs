//! Display-only values derived from a regulation.
//!
//! Renderers (the HTML browse page, the CLI card printer) consume [`Card`]
//! and never look at raw status or explanation text themselves.

use serde::Serialize;

use crate::regulation::{Regulation, Rule, StatusClass};

const IMPACT_LABEL: &str = "Impact on ";
const NEXT_STEPS_LABEL: &str = "Suggested Next Steps: ";

/// Collapse whitespace runs in a bill number and trim it.
///
/// `"HB   101 "` becomes `"HB 101"`.
pub fn normalize_bill(bill: &str) -> String {
    bill.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// The three paragraphs of an effect explanation.
///
/// Explanations are written as organisational impact, underwriting-rules
/// impact and suggested next steps, separated by blank lines. Any of them
/// may be missing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ExplanationParts {
    pub org_impact: Option<String>,
    pub rules_impact: Option<String>,
    pub next_steps: Option<String>,
}

/// Split explanation text on blank lines and strip the leading labels.
pub fn split_explanation(text: &str) -> ExplanationParts {
    let mut paragraphs = text.split("\n\n");
    let strip = |p: &str, label: &str| p.strip_prefix(label).unwrap_or(p).to_string();
    ExplanationParts {
        org_impact: paragraphs.next().map(|p| strip(p, IMPACT_LABEL)),
        rules_impact: paragraphs.next().map(|p| strip(p, IMPACT_LABEL)),
        next_steps: paragraphs.next().map(|p| strip(p, NEXT_STEPS_LABEL)),
    }
}

/// How one rule shows up on a card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Impact {
    Affected {
        organization_heading: &'static str,
        underwriting_heading: &'static str,
        parts: ExplanationParts,
    },
    Unaffected {
        label: &'static str,
    },
}

impl Impact {
    pub fn for_rule(reg: &Regulation, rule: Rule) -> Self {
        if reg.is_affected_by(rule) {
            Self::Affected {
                organization_heading: rule.organization_heading(),
                underwriting_heading: rule.underwriting_heading(),
                parts: split_explanation(reg.explanation(rule)),
            }
        } else {
            Self::Unaffected {
                label: rule.no_impact_label(),
            }
        }
    }

    pub fn is_affected(&self) -> bool {
        matches!(self, Self::Affected { .. })
    }
}

/// Summary card for one regulation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Card {
    /// Rendering key; the raw bill number.
    pub key: String,
    /// `"<normalised bill> - <state>"`.
    pub title: String,
    pub status_label: &'static str,
    pub status_variant: &'static str,
    pub section: String,
    pub summary: String,
    pub p1: Impact,
    pub p2: Impact,
}

impl Card {
    pub fn impact(&self, rule: Rule) -> &Impact {
        match rule {
            Rule::P1 => &self.p1,
            Rule::P2 => &self.p2,
        }
    }
}

impl From<&Regulation> for Card {
    fn from(reg: &Regulation) -> Self {
        let status = StatusClass::classify(&reg.status);
        Self {
            key: reg.bill.clone(),
            title: format!("{} - {}", normalize_bill(&reg.bill), reg.state),
            status_label: status.label(),
            status_variant: status.variant(),
            section: reg.section.clone(),
            summary: reg.summary.clone(),
            p1: Impact::for_rule(reg, Rule::P1),
            p2: Impact::for_rule(reg, Rule::P2),
        }
    }
}

/// Result line under a card list: `"1 regulation found"`, `"3 regulations found"`.
pub fn result_count(n: usize) -> String {
    format!("{n} regulation{} found", if n == 1 { "" } else { "s" })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn result_count_pluralises() {
        assert_eq!(result_count(0), "0 regulations found");
        assert_eq!(result_count(1), "1 regulation found");
        assert_eq!(result_count(12), "12 regulations found");
    }

    #[test]
    fn normalize_collapses_and_trims() {
        assert_eq!(normalize_bill("HB   101 "), "HB 101");
        assert_eq!(normalize_bill("\tSF\n 2 0"), "SF 2 0");
        assert_eq!(normalize_bill("   "), "");
    }

    #[test]
    fn split_three_paragraphs() {
        let parts = split_explanation("Impact on Org A\n\nImpact on Rules B\n\nSuggested Next Steps: C");
        assert_eq!(parts.org_impact.as_deref(), Some("Org A"));
        assert_eq!(parts.rules_impact.as_deref(), Some("Rules B"));
        assert_eq!(parts.next_steps.as_deref(), Some("C"));
    }

    #[test]
    fn split_tolerates_missing_paragraphs() {
        let parts = split_explanation("No effect on Rule P1");
        assert_eq!(parts.org_impact.as_deref(), Some("No effect on Rule P1"));
        assert_eq!(parts.rules_impact, None);
        assert_eq!(parts.next_steps, None);
    }

    #[test]
    fn split_only_strips_leading_labels() {
        let parts = split_explanation("Sales\n\nSee Impact on pricing\n\nTrain agents");
        assert_eq!(parts.org_impact.as_deref(), Some("Sales"));
        assert_eq!(parts.rules_impact.as_deref(), Some("See Impact on pricing"));
        assert_eq!(parts.next_steps.as_deref(), Some("Train agents"));
    }

    #[test]
    fn split_ignores_extra_paragraphs() {
        let parts = split_explanation("a\n\nb\n\nc\n\nd");
        assert_eq!(parts.next_steps.as_deref(), Some("c"));
    }

    #[test]
    fn card_from_regulation() {
        let reg = Regulation {
            bill: " HB   101".into(),
            state: "IA".into(),
            status: "Signed".into(),
            is_insurance_related: true,
            is_rule_p1_affected: true,
            is_rule_p2_affected: false,
            p1_effect_explanation:
                "Impact on Org A\n\nImpact on Rules B\n\nSuggested Next Steps: C".into(),
            p2_effect_explanation: "No effect on Rule P2".into(),
            summary: "s".into(),
            section: "Life".into(),
        };
        let card = Card::from(&reg);
        assert_eq!(card.key, " HB   101");
        assert_eq!(card.title, "HB 101 - IA");
        assert_eq!(card.status_label, "Passed");
        assert_eq!(card.status_variant, "success");
        assert!(card.impact(Rule::P1).is_affected());
        match &card.p1 {
            Impact::Affected {
                organization_heading,
                parts,
                ..
            } => {
                assert_eq!(*organization_heading, "Wellabe's Organization");
                assert_eq!(parts.next_steps.as_deref(), Some("C"));
            }
            other => panic!("expected affected, got {other:?}"),
        }
        assert_eq!(
            card.p2,
            Impact::Unaffected {
                label: "No impact on Rule P2"
            }
        );
    }
}
