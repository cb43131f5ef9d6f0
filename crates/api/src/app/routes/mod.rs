use axum::Router;

pub mod produtos;
pub mod system;

/// Router for all tenant-scoped endpoints.
pub fn router() -> Router {
    Router::new().nest("/produtos", produtos::router())
}
