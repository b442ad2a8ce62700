//! The regulation record and the two derivations every layer shares:
//! status classification and the P1/P2 rule accessors.

use serde::{Deserialize, Serialize};

/// One tracked legislative bill, as validated from a store row.
///
/// Field names on the wire follow the `state_bill_entries` table columns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Regulation {
    pub bill: String,
    pub state: String,
    /// Trimmed legislative status text.
    pub status: String,
    #[serde(rename = "isInsuranceRelated")]
    pub is_insurance_related: bool,
    #[serde(rename = "isRuleP1Affected")]
    pub is_rule_p1_affected: bool,
    #[serde(rename = "isRuleP2Affected")]
    pub is_rule_p2_affected: bool,
    #[serde(rename = "P1EffectExplanation")]
    pub p1_effect_explanation: String,
    #[serde(rename = "P2EffectExplanation")]
    pub p2_effect_explanation: String,
    pub summary: String,
    pub section: String,
}

impl Regulation {
    pub fn status_class(&self) -> StatusClass {
        StatusClass::classify(&self.status)
    }

    pub fn is_affected_by(&self, rule: Rule) -> bool {
        match rule {
            Rule::P1 => self.is_rule_p1_affected,
            Rule::P2 => self.is_rule_p2_affected,
        }
    }

    pub fn explanation(&self, rule: Rule) -> &str {
        match rule {
            Rule::P1 => &self.p1_effect_explanation,
            Rule::P2 => &self.p2_effect_explanation,
        }
    }
}

/// Display classification derived from free-text status.
///
/// The store only exposes free text, so this is a substring heuristic:
/// anything mentioning "assigned" or "signed" counts as passed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatusClass {
    Passed,
    Failed,
}

impl StatusClass {
    /// Classify a status string, ignoring case and surrounding whitespace.
    pub fn classify(status: &str) -> Self {
        let normalized = status.trim().to_lowercase();
        if normalized.contains("assigned") || normalized.contains("signed") {
            Self::Passed
        } else {
            Self::Failed
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Passed => "Passed",
            Self::Failed => "Failed",
        }
    }

    /// Badge variant used by renderers.
    pub fn variant(&self) -> &'static str {
        match self {
            Self::Passed => "success",
            Self::Failed => "failed",
        }
    }
}

/// The two regulatory-impact categories evaluated per bill.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Rule {
    P1,
    P2,
}

impl Rule {
    pub const ALL: [Rule; 2] = [Rule::P1, Rule::P2];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::P1 => "P1",
            Self::P2 => "P2",
        }
    }

    /// Column holding this rule's affected flag.
    pub fn flag_field(&self) -> &'static str {
        match self {
            Self::P1 => "isRuleP1Affected",
            Self::P2 => "isRuleP2Affected",
        }
    }

    /// Column holding this rule's explanation text.
    pub fn explanation_field(&self) -> &'static str {
        match self {
            Self::P1 => "P1EffectExplanation",
            Self::P2 => "P2EffectExplanation",
        }
    }

    /// Placeholder stored when the source has no explanation.
    pub fn default_explanation(&self) -> &'static str {
        match self {
            Self::P1 => "No effect on Rule P1",
            Self::P2 => "No effect on Rule P2",
        }
    }

    /// Text shown on a card for a bill this rule does not affect.
    pub fn no_impact_label(&self) -> &'static str {
        match self {
            Self::P1 => "No impact on Rule P1",
            Self::P2 => "No impact on Rule P2",
        }
    }

    pub fn organization_heading(&self) -> &'static str {
        match self {
            Self::P1 => "Wellabe's Organization",
            Self::P2 => "MassMutual's Organization",
        }
    }

    pub fn underwriting_heading(&self) -> &'static str {
        match self {
            Self::P1 => "Short-term Insurance Underwriting",
            Self::P2 => "Life Insurance Underwriting",
        }
    }
}

impl std::fmt::Display for Rule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
