//! HTTP API application wiring (Axum router + GraphQL schema + services).
//!
//! Layout:
//! - `services.rs`: the inventory store behind a lock, plus logged operations
//! - `schema.rs`: GraphQL query/mutation roots
//! - `routes/`: HTTP routes + handlers
//! - `dto.rs`: GraphQL output objects and mapping from domain types
//! - `errors.rs`: consistent error extensions

use std::sync::Arc;

use axum::{routing::get, Extension, Router};
use tower::ServiceBuilder;

use crate::middleware;

pub mod dto;
pub mod errors;
pub mod routes;
pub mod schema;
pub mod services;

/// Build the full HTTP router (public entrypoint used by `main.rs`).
pub fn build_app(services: Arc<services::AppServices>) -> Router {
    let schema = schema::build_schema(services);

    Router::new()
        .route("/health", get(routes::system::health))
        .merge(routes::router())
        .layer(
            ServiceBuilder::new()
                .layer(axum::middleware::from_fn(middleware::log_requests))
                .layer(Extension(schema)),
        )
}
