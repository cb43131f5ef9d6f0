use axum::{
    http::{HeaderMap, StatusCode},
    middleware::Next,
    response::Response,
};

use cardapio_core::RestauranteId;

use crate::context::RestauranteContext;

/// Header carrying the calling tenant's id. The platform's auth gateway sets
/// it after resolving the session; requests without it are rejected here.
pub const RESTAURANTE_HEADER: &str = "x-restaurante-id";

pub async fn tenant_middleware(
    mut req: axum::http::Request<axum::body::Body>,
    next: Next,
) -> Result<Response, StatusCode> {
    let restaurante_id = extract_restaurante_id(req.headers())?;

    req.extensions_mut()
        .insert(RestauranteContext::new(restaurante_id));

    Ok(next.run(req).await)
}

fn extract_restaurante_id(headers: &HeaderMap) -> Result<RestauranteId, StatusCode> {
    let header = headers
        .get(RESTAURANTE_HEADER)
        .ok_or(StatusCode::UNAUTHORIZED)?;

    let header = header.to_str().map_err(|_| StatusCode::UNAUTHORIZED)?;

    header
        .parse::<RestauranteId>()
        .map_err(|_| StatusCode::UNAUTHORIZED)
}
