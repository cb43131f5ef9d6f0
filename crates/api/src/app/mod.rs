//! HTTP API application wiring (Axum router + service wiring).
//!
//! This folder is structured like:
//! - `services.rs`: the product service (orchestration over the store)
//! - `routes/`: HTTP routes + handlers
//! - `dto.rs`: request DTOs and their mapping into domain types
//! - `errors.rs`: consistent error responses

use std::sync::Arc;

use axum::{routing::get, Extension, Router};
use tower::ServiceBuilder;

use cardapio_infra::ProductStore;

use crate::middleware;

pub mod dto;
pub mod errors;
pub mod routes;
pub mod services;

/// Build the full HTTP router around the given store (public entrypoint used
/// by `main.rs` and the black-box tests).
pub fn build_app(store: Arc<dyn ProductStore>) -> Router {
    let products = Arc::new(services::ProductService::new(store));

    // Tenant-scoped routes: require the restaurante header.
    let scoped = routes::router()
        .layer(Extension(products))
        .layer(axum::middleware::from_fn(middleware::tenant_middleware));

    Router::new()
        .route("/health", get(routes::system::health))
        .merge(scoped)
        .layer(ServiceBuilder::new())
}
