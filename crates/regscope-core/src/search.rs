//! Free-text search across the descriptive fields of a regulation.

use crate::filter::{Filters, filter};
use crate::regulation::Regulation;

/// Lowercased, space-joined text a query is matched against.
fn searchable_text(reg: &Regulation) -> String {
    [
        reg.bill.as_str(),
        reg.state.as_str(),
        reg.summary.as_str(),
        reg.p1_effect_explanation.as_str(),
        reg.p2_effect_explanation.as_str(),
        reg.section.as_str(),
    ]
    .join(" ")
    .to_lowercase()
}

/// Keep the items whose searchable text contains `query`, ignoring case.
///
/// A blank query matches everything. Input order is preserved.
pub fn search<'a, I>(items: I, query: &str) -> Vec<&'a Regulation>
where
    I: IntoIterator<Item = &'a Regulation>,
{
    if query.trim().is_empty() {
        return items.into_iter().collect();
    }
    let needle = query.to_lowercase();
    items
        .into_iter()
        .filter(|reg| searchable_text(reg).contains(&needle))
        .collect()
}

/// A filter configuration plus a search query, applied in that order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BrowseQuery {
    pub filters: Filters,
    pub query: String,
}

impl BrowseQuery {
    pub fn apply<'a, I>(&self, items: I) -> Vec<&'a Regulation>
    where
        I: IntoIterator<Item = &'a Regulation>,
    {
        search(filter(items, &self.filters), &self.query)
    }
}
