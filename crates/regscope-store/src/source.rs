//! Where raw bill rows come from, and the fetch-then-validate step.

use std::path::Path;

use async_trait::async_trait;
use regscope_core::{ValidatedRows, validate_rows};
use serde_json::Value;
use tracing::{info, warn};

use crate::{StoreError, SupabaseClient};

/// A provider of raw, unvalidated bill rows.
#[async_trait]
pub trait BillSource: Send + Sync {
    /// Return every row. An empty table is `Ok(vec![])`, not an error.
    async fn fetch_rows(&self) -> Result<Vec<Value>, StoreError>;
}

#[async_trait]
impl BillSource for SupabaseClient {
    async fn fetch_rows(&self) -> Result<Vec<Value>, StoreError> {
        self.fetch_all().await
    }
}

/// Rows held in memory, e.g. loaded from an exported JSON file.
#[derive(Debug, Clone, Default)]
pub struct StaticSource {
    rows: Vec<Value>,
}

impl StaticSource {
    pub fn new(rows: Vec<Value>) -> Self {
        Self { rows }
    }

    /// Load a JSON array of rows (or `null`) from `path`.
    pub async fn from_json_file(path: &Path) -> Result<Self, StoreError> {
        let bytes = tokio::fs::read(path).await?;
        let rows: Option<Vec<Value>> = serde_json::from_slice(&bytes)?;
        let rows = rows.unwrap_or_default();
        info!(path = %path.display(), count = rows.len(), "loaded rows file");
        Ok(Self { rows })
    }
}

#[async_trait]
impl BillSource for StaticSource {
    async fn fetch_rows(&self) -> Result<Vec<Value>, StoreError> {
        Ok(self.rows.clone())
    }
}

/// Stand-in used when store credentials are absent.
///
/// Every fetch fails with [`StoreError::MissingConfig`] without touching the
/// network.
#[derive(Debug, Clone, Copy)]
pub struct Unconfigured {
    pub has_url: bool,
    pub has_key: bool,
}

#[async_trait]
impl BillSource for Unconfigured {
    async fn fetch_rows(&self) -> Result<Vec<Value>, StoreError> {
        Err(StoreError::MissingConfig {
            has_url: self.has_url,
            has_key: self.has_key,
        })
    }
}

/// Fetch all rows from `source` and validate them.
///
/// Fetch failures abort the whole retrieval; invalid rows are only dropped.
pub async fn retrieve(source: &dyn BillSource) -> Result<ValidatedRows, StoreError> {
    let rows = source.fetch_rows().await?;
    let total = rows.len();
    let validated = validate_rows(rows);
    if !validated.rejected.is_empty() {
        warn!(
            total,
            rejected = validated.rejected.len(),
            "some rows failed validation"
        );
    }
    Ok(validated)
}
