//! HTTP client for the Supabase REST (PostgREST) interface.

use serde_json::Value;
use tracing::{debug, info};

use crate::{StoreConfig, StoreError};

/// Longest slice of an error body carried into [`StoreError::Server`].
const MAX_ERROR_BODY: usize = 200;

/// Reads whole tables from a Supabase project using a service credential.
pub struct SupabaseClient {
    client: reqwest::Client,
    rest_url: String,
    service_key: String,
    table: String,
}

impl SupabaseClient {
    /// Create a client for the given configuration.
    pub fn new(config: StoreConfig) -> Result<Self, StoreError> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()?;
        Ok(Self {
            client,
            rest_url: format!("{}/rest/v1", config.url.trim_end_matches('/')),
            service_key: config.service_key,
            table: config.table,
        })
    }

    pub fn table(&self) -> &str {
        &self.table
    }

    /// Fetch every row of the configured table.
    ///
    /// No pagination: the whole table comes back in one response. A `null`
    /// body is treated as an empty table.
    pub async fn fetch_all(&self) -> Result<Vec<Value>, StoreError> {
        let rows = self.select(None).await?;
        info!(table = %self.table, count = rows.len(), "fetched rows");
        Ok(rows)
    }

    /// Read at most one row to check connectivity and credentials.
    pub async fn probe(&self) -> Result<(), StoreError> {
        let rows = self.select(Some(1)).await?;
        info!(table = %self.table, sample = rows.len(), "store reachable");
        Ok(())
    }

    async fn select(&self, limit: Option<usize>) -> Result<Vec<Value>, StoreError> {
        let url = format!("{}/{}", self.rest_url, self.table);
        let mut query = vec![("select", "*".to_string())];
        if let Some(n) = limit {
            query.push(("limit", n.to_string()));
        }

        debug!(url = %url, ?limit, "querying store");
        let resp = self
            .client
            .get(&url)
            .query(&query)
            .header("apikey", &self.service_key)
            .bearer_auth(&self.service_key)
            .header("Accept", "application/json")
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(StoreError::Server {
                status: status.as_u16(),
                body: body.chars().take(MAX_ERROR_BODY).collect(),
            });
        }

        let bytes = resp.bytes().await?;
        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(Vec::new());
        }
        let rows: Option<Vec<Value>> = serde_json::from_slice(&bytes)?;
        Ok(rows.unwrap_or_default())
    }
}
