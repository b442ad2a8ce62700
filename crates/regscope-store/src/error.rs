use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("missing store credentials (url set: {has_url}, key set: {has_key})")]
    MissingConfig { has_url: bool, has_key: bool },

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("store returned {status}: {body}")]
    Server { status: u16, body: String },

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("could not read rows file: {0}")]
    Io(#[from] std::io::Error),
}

impl StoreError {
    pub fn is_config(&self) -> bool {
        matches!(self, Self::MissingConfig { .. })
    }
}
