//! HTTP server for the Roster user directory.
//!
//! The server is built on Axum and wires the `roster-core` operations to a
//! small versioned API: registration, login, listing, retrieval, selective
//! update, and deletion of user accounts. Account-management requests pass
//! through the identity-resolving middleware before authorization and
//! handlers run.

use axum::Router;
use axum::http::HeaderValue;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::warn;

pub mod infra;
pub mod routes;
pub mod users;

pub use infra::app_state::AppState;

/// Assemble the full application router: versioned API routes plus the
/// tracing and CORS layers.
pub fn create_app(state: AppState) -> Router {
    let cors_layer = build_cors_layer(&state.config.cors_allowed_origins);

    Router::new()
        .merge(routes::create_api_router(state.clone()))
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer)
        .with_state(state)
}

fn build_cors_layer(allowed_origins: &[String]) -> CorsLayer {
    if allowed_origins.iter().any(|origin| origin == "*") {
        return CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any);
    }

    let origins: Vec<HeaderValue> = allowed_origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                warn!("Ignoring invalid CORS origin: {origin}");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods(Any)
        .allow_headers(Any)
}
