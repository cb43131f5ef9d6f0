use std::sync::Arc;

use axum::{
    extract::{Extension, Path},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};

use cardapio_catalog::ProductInput;

use crate::app::services::ProductService;
use crate::app::{dto, errors};
use crate::context::RestauranteContext;

pub fn router() -> Router {
    Router::new()
        .route("/", post(create_product).get(list_products))
        .route(
            "/:id",
            get(get_product).put(edit_product).delete(delete_product),
        )
        .route("/:id/ativar", post(activate_product))
        .route("/:id/desativar", post(deactivate_product))
}

fn confirmation(message: &'static str) -> axum::response::Response {
    (StatusCode::OK, Json(serde_json::json!({ "message": message }))).into_response()
}

pub async fn list_products(
    Extension(products): Extension<Arc<ProductService>>,
    Extension(restaurante): Extension<RestauranteContext>,
) -> axum::response::Response {
    match products.list_products(restaurante.restaurante_id()).await {
        Ok(produtos) => (StatusCode::OK, Json(produtos)).into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}

pub async fn get_product(
    Extension(products): Extension<Arc<ProductService>>,
    Extension(restaurante): Extension<RestauranteContext>,
    Path(id): Path<String>,
) -> axum::response::Response {
    match products.get_product(restaurante.restaurante_id(), &id).await {
        Ok(produto) => (StatusCode::OK, Json(produto)).into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}

pub async fn create_product(
    Extension(products): Extension<Arc<ProductService>>,
    Extension(restaurante): Extension<RestauranteContext>,
    Json(body): Json<ProductInput>,
) -> axum::response::Response {
    match products
        .create_product(restaurante.restaurante_id(), body)
        .await
    {
        Ok(produto) => (
            StatusCode::OK,
            Json(serde_json::json!({
                "message": "O produto foi cadastrado com sucesso.",
                "produto": produto,
            })),
        )
            .into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}

pub async fn edit_product(
    Extension(products): Extension<Arc<ProductService>>,
    Extension(restaurante): Extension<RestauranteContext>,
    Path(id): Path<String>,
    Json(body): Json<dto::EditProductRequest>,
) -> axum::response::Response {
    match products
        .edit_product(restaurante.restaurante_id(), &id, body.into())
        .await
    {
        Ok(()) => confirmation("O produto foi atualizado com sucesso"),
        Err(e) => errors::domain_error_to_response(e),
    }
}

pub async fn delete_product(
    Extension(products): Extension<Arc<ProductService>>,
    Extension(restaurante): Extension<RestauranteContext>,
    Path(id): Path<String>,
) -> axum::response::Response {
    match products
        .delete_product(restaurante.restaurante_id(), &id)
        .await
    {
        Ok(()) => confirmation("Produto excluido com sucesso"),
        Err(e) => errors::domain_error_to_response(e),
    }
}

pub async fn activate_product(
    Extension(products): Extension<Arc<ProductService>>,
    Extension(restaurante): Extension<RestauranteContext>,
    Path(id): Path<String>,
) -> axum::response::Response {
    match products
        .activate_product(restaurante.restaurante_id(), &id)
        .await
    {
        Ok(()) => confirmation("Produto ativado com sucesso"),
        Err(e) => errors::domain_error_to_response(e),
    }
}

pub async fn deactivate_product(
    Extension(products): Extension<Arc<ProductService>>,
    Extension(restaurante): Extension<RestauranteContext>,
    Path(id): Path<String>,
) -> axum::response::Response {
    match products
        .deactivate_product(restaurante.restaurante_id(), &id)
        .await
    {
        Ok(()) => confirmation("Produto desativado com sucesso"),
        Err(e) => errors::domain_error_to_response(e),
    }
}
