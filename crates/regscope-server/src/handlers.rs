//! HTTP handlers for regscope.

use std::sync::Arc;

use axum::{
    Json,
    extract::{Query, State},
    response::Html,
};
use regscope_core::{BillsEnvelope, BrowseQuery, Card, Facets, Filters, RuleFilter, StatusFilter};
use regscope_store::retrieve;
use serde::Deserialize;
use serde_json::{Value, json};

use crate::error::ApiError;
use crate::pages::{self, PageModel};
use crate::state::AppState;

/// Health check endpoint
pub async fn health() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}

/// Every valid regulation in the store, unfiltered.
pub async fn get_regulations(
    State(state): State<Arc<AppState>>,
) -> Result<Json<BillsEnvelope>, ApiError> {
    let validated = retrieve(state.source.as_ref()).await?;
    tracing::info!(
        bills = validated.bills.len(),
        rejected = validated.rejected.len(),
        "served regulations"
    );
    Ok(Json(BillsEnvelope {
        bills: validated.bills,
    }))
}

/// Distinct states, sections and statuses for selection controls.
pub async fn get_facets(State(state): State<Arc<AppState>>) -> Result<Json<Facets>, ApiError> {
    let validated = retrieve(state.source.as_ref()).await?;
    Ok(Json(Facets::from_items(&validated.bills)))
}

/// Query string of the browse page.
#[derive(Debug, Default, Deserialize)]
pub struct BrowseParams {
    pub state: Option<String>,
    pub status: Option<String>,
    pub rule: Option<String>,
    pub section: Option<String>,
    pub q: Option<String>,
}

impl BrowseParams {
    /// Unrecognised `status`/`rule` values mean "no constraint".
    pub fn to_browse_query(&self) -> BrowseQuery {
        let status = self
            .status
            .as_deref()
            .map(|s| {
                s.parse::<StatusFilter>().unwrap_or_else(|e| {
                    tracing::debug!("{e}; ignoring");
                    StatusFilter::All
                })
            })
            .unwrap_or_default();
        let rule_affected = self
            .rule
            .as_deref()
            .map(|r| {
                r.parse::<RuleFilter>().unwrap_or_else(|e| {
                    tracing::debug!("{e}; ignoring");
                    RuleFilter::All
                })
            })
            .unwrap_or_default();
        BrowseQuery {
            filters: Filters {
                state: self.state.clone().filter(|s| !s.is_empty()),
                status,
                rule_affected,
                section: self.section.clone().filter(|s| !s.is_empty()),
            },
            query: self.q.clone().unwrap_or_default(),
        }
    }
}

/// Server-rendered browse page.
///
/// A failed fetch still renders the page, with no cards and a notice.
pub async fn browse_page(
    State(state): State<Arc<AppState>>,
    Query(params): Query<BrowseParams>,
) -> Html<String> {
    let browse = params.to_browse_query();
    let (bills, notice) = match retrieve(state.source.as_ref()).await {
        Ok(validated) => (validated.bills, None),
        Err(err) => {
            let err = ApiError::from(err);
            tracing::error!("failed to fetch regulations: {}", err);
            (Vec::new(), Some(err.public_message()))
        }
    };

    let facets = Facets::from_items(&bills);
    let cards: Vec<Card> = browse.apply(&bills).into_iter().map(Card::from).collect();

    Html(pages::browse_page(&PageModel {
        browse: &browse,
        facets: &facets,
        cards: &cards,
        notice: notice.as_deref(),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use regscope_core::Rule;

    #[test]
    fn params_parse_into_filters() {
        let params = BrowseParams {
            state: Some("IA".into()),
            status: Some("passed".into()),
            rule: Some("P1".into()),
            section: Some(String::new()),
            q: Some("hb".into()),
        };
        let browse = params.to_browse_query();
        assert_eq!(browse.filters.state.as_deref(), Some("IA"));
        assert_eq!(browse.filters.status, StatusFilter::Passed);
        assert_eq!(browse.filters.rule_affected, RuleFilter::Affected(Rule::P1));
        assert_eq!(browse.filters.section, None);
        assert_eq!(browse.query, "hb");
    }

    #[test]
    fn bad_params_fall_back_to_all() {
        let params = BrowseParams {
            status: Some("pending".into()),
            rule: Some("P9".into()),
            ..BrowseParams::default()
        };
        let browse = params.to_browse_query();
        assert!(browse.filters.is_unconstrained());
        assert!(browse.query.is_empty());
    }
}
