//! Application state for the regscope server.

use std::sync::Arc;

use regscope_store::{BillSource, StoreConfig, StoreError, SupabaseClient, Unconfigured};

/// Shared, read-only state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub source: Arc<dyn BillSource>,
}

impl AppState {
    pub fn new(source: Arc<dyn BillSource>) -> Self {
        Self { source }
    }

    /// Build state from a store configuration attempt.
    ///
    /// Missing credentials do not stop the server: requests are answered with
    /// the configuration error instead.
    pub fn from_config(config: Result<StoreConfig, StoreError>) -> anyhow::Result<Self> {
        let source: Arc<dyn BillSource> = match config {
            Ok(config) => {
                tracing::info!(url = %config.url, table = %config.table, "using Supabase store");
                Arc::new(SupabaseClient::new(config)?)
            }
            Err(StoreError::MissingConfig { has_url, has_key }) => {
                tracing::error!(
                    has_url,
                    has_key,
                    "store credentials missing; data requests will fail"
                );
                Arc::new(Unconfigured { has_url, has_key })
            }
            Err(other) => return Err(other.into()),
        };
        Ok(Self::new(source))
    }
}
