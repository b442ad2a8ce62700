//! Error types for the retrieval endpoint.

use std::any::Any;

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use regscope_core::ErrorEnvelope;
use regscope_store::StoreError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Missing store credentials")]
    Config { has_url: bool, has_key: bool },

    #[error("Database error: {0}")]
    DataAccess(StoreError),

    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::MissingConfig { has_url, has_key } => Self::Config { has_url, has_key },
            other => Self::DataAccess(other),
        }
    }
}

impl ApiError {
    /// Message placed in the `{ "error": ... }` body.
    pub fn public_message(&self) -> String {
        match self {
            ApiError::Config { .. } | ApiError::DataAccess(_) => self.to_string(),
            ApiError::Internal(_) => "Internal Server Error".to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match &self {
            ApiError::Config { has_url, has_key } => {
                tracing::error!(has_url, has_key, "missing store credentials");
            }
            ApiError::DataAccess(e) => tracing::error!("store query failed: {}", e),
            ApiError::Internal(e) => tracing::error!("internal error: {:#}", e),
        }

        let body = Json(ErrorEnvelope {
            error: self.public_message(),
        });
        (StatusCode::INTERNAL_SERVER_ERROR, body).into_response()
    }
}

/// Response for a handler that panicked: logged, answered as
/// [`ApiError::Internal`].
pub fn panic_response(payload: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else {
        "unknown panic payload".to_string()
    };
    ApiError::Internal(anyhow::anyhow!("handler panicked: {detail}")).into_response()
}
