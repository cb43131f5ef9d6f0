use axum::http::StatusCode;

/// Liveness check; no auth, no tenant context.
pub async fn health() -> StatusCode {
    StatusCode::OK
}
