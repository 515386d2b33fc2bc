//! API routing module
//!
//! # Structure
//!
//! - [`health`] - liveness probe
//! - [`orders`] - order intake, listing and status updates

pub mod health;
pub mod orders;

use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::core::ServerState;

/// Assemble the application router.
///
/// CORS is wide open: the dashboard is served from a different origin and
/// the API carries no credentials.
pub fn router(state: ServerState) -> Router {
    Router::new()
        .merge(health::router())
        .merge(orders::router())
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
