//! Orders API Module
//!
//! REST endpoints for order intake and the kitchen dashboard.

mod handler;

use axum::{Router, routing::get, routing::patch};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new()
        .nest("/api/orders", order_routes())
}

fn order_routes() -> Router<ServerState> {
    Router::new()
        .route("/", get(handler::list).post(handler::create))
        .route("/{id}", patch(handler::update_status))
}
