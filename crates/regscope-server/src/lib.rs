//! regscope server: retrieval endpoint and browse page.
//!
//! Routes:
//! - `GET /` server-rendered, filterable card list
//! - `GET /api/regulations` `{ "bills": [...] }` or `{ "error": ... }`
//! - `GET /api/regulations/facets` distinct states, sections, statuses
//! - `GET /api/health`

use std::sync::Arc;

use axum::{Router, routing::get};
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

pub mod error;
pub mod handlers;
pub mod pages;
pub mod state;

pub use error::ApiError;
pub use state::AppState;

/// Build the application router.
pub fn router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(handlers::browse_page))
        .route("/api/health", get(handlers::health))
        .route("/api/regulations", get(handlers::get_regulations))
        .route("/api/regulations/facets", get(handlers::get_facets))
        .layer(CatchPanicLayer::custom(error::panic_response))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
