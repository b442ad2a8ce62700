//! Client for a running regscope server's retrieval endpoint.

use std::time::Duration;

use regscope_core::{ErrorEnvelope, Regulation, validate_rows};
use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;
use tracing::info;

#[derive(Error, Debug)]
pub enum RemoteError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("endpoint returned {status}: {message}")]
    Endpoint { status: u16, message: String },
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Deserialize)]
struct RawEnvelope {
    bills: Vec<Value>,
}

/// Reads `GET {base}/api/regulations`.
pub struct EndpointClient {
    client: reqwest::Client,
    url: String,
}

impl EndpointClient {
    /// `base_url` is the server root, e.g. `http://localhost:3000`.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, RemoteError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            url: format!("{}/api/regulations", base_url.trim_end_matches('/')),
        })
    }

    /// Fetch the served bills.
    ///
    /// Entries are re-validated; any that fail are dropped with a warning.
    pub async fn fetch(&self) -> Result<Vec<Regulation>, RemoteError> {
        info!(url = %self.url, "fetching regulations");
        let resp = self.client.get(&self.url).send().await?;
        let status = resp.status();
        let bytes = resp.bytes().await?;

        if !status.is_success() {
            let message = serde_json::from_slice::<ErrorEnvelope>(&bytes)
                .map(|e| e.error)
                .unwrap_or_else(|_| String::from_utf8_lossy(&bytes).into_owned());
            return Err(RemoteError::Endpoint {
                status: status.as_u16(),
                message,
            });
        }

        let envelope: RawEnvelope = serde_json::from_slice(&bytes)?;
        let validated = validate_rows(envelope.bills);
        info!(count = validated.bills.len(), "fetched regulations");
        Ok(validated.bills)
    }
}
