//! Field-equality filtering over validated regulations, plus the distinct
//! values used to populate selection controls.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::regulation::{Regulation, Rule, StatusClass};

/// Constraint on legislative status.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum StatusFilter {
    #[default]
    All,
    Passed,
    Failed,
    /// Exact match against the trimmed status text.
    Exact(String),
}

impl StatusFilter {
    fn matches(&self, reg: &Regulation) -> bool {
        match self {
            Self::All => true,
            Self::Passed => reg.status_class() == StatusClass::Passed,
            Self::Failed => reg.status_class() == StatusClass::Failed,
            Self::Exact(status) => reg.status.trim() == status.trim(),
        }
    }
}

/// Constraint on rule impact.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RuleFilter {
    #[default]
    All,
    Affected(Rule),
}

impl RuleFilter {
    fn matches(&self, reg: &Regulation) -> bool {
        match self {
            Self::All => true,
            Self::Affected(rule) => reg.is_affected_by(*rule),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unrecognised {kind} filter {value:?} (expected {expected})")]
pub struct ParseFilterError {
    kind: &'static str,
    value: String,
    expected: &'static str,
}

impl FromStr for StatusFilter {
    type Err = ParseFilterError;

    /// Accepts `all`, `passed`, `failed` or `exact:<status>`, keywords in any case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if let Some(prefix) = s.get(..6)
            && prefix.eq_ignore_ascii_case("exact:")
        {
            return Ok(Self::Exact(s[6..].trim().to_string()));
        }
        match s.trim().to_ascii_lowercase().as_str() {
            "" | "all" => Ok(Self::All),
            "passed" => Ok(Self::Passed),
            "failed" => Ok(Self::Failed),
            _ => Err(ParseFilterError {
                kind: "status",
                value: s.to_string(),
                expected: "all, passed, failed, or exact:<status>",
            }),
        }
    }
}

impl fmt::Display for StatusFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => f.write_str("all"),
            Self::Passed => f.write_str("passed"),
            Self::Failed => f.write_str("failed"),
            Self::Exact(status) => write!(f, "exact:{status}"),
        }
    }
}

impl FromStr for RuleFilter {
    type Err = ParseFilterError;

    /// Accepts `all`, `P1`, `P2` (any case).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "" | "all" => Ok(Self::All),
            "p1" => Ok(Self::Affected(Rule::P1)),
            "p2" => Ok(Self::Affected(Rule::P2)),
            _ => Err(ParseFilterError {
                kind: "rule",
                value: s.to_string(),
                expected: "all, P1, or P2",
            }),
        }
    }
}

impl fmt::Display for RuleFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => f.write_str("all"),
            Self::Affected(rule) => f.write_str(rule.as_str()),
        }
    }
}

/// Active filter configuration. The default constrains nothing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Filters {
    /// Exact jurisdiction; `None` or empty means any.
    pub state: Option<String>,
    pub status: StatusFilter,
    pub rule_affected: RuleFilter,
    /// Exact section; `None` or empty means any.
    pub section: Option<String>,
}

impl Filters {
    /// True when every active constraint holds for `reg`.
    pub fn matches(&self, reg: &Regulation) -> bool {
        equals_if_set(self.state.as_deref(), &reg.state)
            && self.status.matches(reg)
            && self.rule_affected.matches(reg)
            && equals_if_set(self.section.as_deref(), &reg.section)
    }

    pub fn is_unconstrained(&self) -> bool {
        self.state.as_deref().is_none_or(str::is_empty)
            && self.status == StatusFilter::All
            && self.rule_affected == RuleFilter::All
            && self.section.as_deref().is_none_or(str::is_empty)
    }
}

fn equals_if_set(wanted: Option<&str>, actual: &str) -> bool {
    match wanted {
        None | Some("") => true,
        Some(w) => w == actual,
    }
}

/// Keep the items matching `filters`, in input order.
pub fn filter<'a, I>(items: I, filters: &Filters) -> Vec<&'a Regulation>
where
    I: IntoIterator<Item = &'a Regulation>,
{
    items.into_iter().filter(|reg| filters.matches(reg)).collect()
}

/// Sorted distinct values for selection controls.
///
/// Derived from the full collection, so it only changes when the data does.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Facets {
    pub states: Vec<String>,
    pub sections: Vec<String>,
    pub statuses: Vec<String>,
}

impl Facets {
    pub fn from_items<'a, I>(items: I) -> Self
    where
        I: IntoIterator<Item = &'a Regulation>,
    {
        let mut states = BTreeSet::new();
        let mut sections = BTreeSet::new();
        let mut statuses = BTreeSet::new();
        for reg in items {
            states.insert(reg.state.as_str());
            sections.insert(reg.section.as_str());
            statuses.insert(reg.status.as_str());
        }
        Self {
            states: states.into_iter().map(str::to_string).collect(),
            sections: sections.into_iter().map(str::to_string).collect(),
            statuses: statuses.into_iter().map(str::to_string).collect(),
        }
    }
}
