use std::sync::Arc;

use async_trait::async_trait;
use reqwest::StatusCode;
use serde_json::json;

use cardapio_catalog::{NewProduct, Product, ProductPatch};
use cardapio_core::{ProductId, RestauranteId};
use cardapio_infra::{InMemoryProductStore, ProductStore, StoreError};

struct TestServer {
    base_url: String,
    handle: tokio::task::JoinHandle<()>,
}

impl TestServer {
    async fn spawn() -> Self {
        Self::spawn_with(Arc::new(InMemoryProductStore::new())).await
    }

    async fn spawn_with(store: Arc<dyn ProductStore>) -> Self {
        // Same router as prod, bound to an ephemeral port.
        let app = cardapio_api::app::build_app(store);
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("failed to bind ephemeral port");
        let addr = listener.local_addr().unwrap();
        let base_url = format!("http://{}", addr);

        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self { base_url, handle }
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

const TENANT_HEADER: &str = "x-restaurante-id";

async fn create_produto(
    client: &reqwest::Client,
    base_url: &str,
    tenant: i64,
    body: serde_json::Value,
) -> reqwest::Response {
    client
        .post(format!("{base_url}/produtos"))
        .header(TENANT_HEADER, tenant.to_string())
        .json(&body)
        .send()
        .await
        .unwrap()
}

/// Create a product and return its assigned id.
async fn create_produto_id(
    client: &reqwest::Client,
    base_url: &str,
    tenant: i64,
    nome: &str,
    preco: i64,
) -> i64 {
    let res = create_produto(
        client,
        base_url,
        tenant,
        json!({ "nome": nome, "preco": preco }),
    )
    .await;
    assert_eq!(res.status(), StatusCode::OK);
    let body: serde_json::Value = res.json().await.unwrap();
    body["produto"]["id"].as_i64().unwrap()
}

async fn get_produto(
    client: &reqwest::Client,
    base_url: &str,
    tenant: i64,
    id: i64,
) -> reqwest::Response {
    client
        .get(format!("{base_url}/produtos/{id}"))
        .header(TENANT_HEADER, tenant.to_string())
        .send()
        .await
        .unwrap()
}

#[tokio::test]
async fn health_needs_no_tenant_header() {
    let srv = TestServer::spawn().await;

    let client = reqwest::Client::new();
    let res = client
        .get(format!("{}/health", srv.base_url))
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::OK);
}

#[tokio::test]
async fn tenant_header_required_for_catalog_routes() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let missing = client
        .get(format!("{}/produtos", srv.base_url))
        .send()
        .await
        .unwrap();
    let garbage = client
        .get(format!("{}/produtos", srv.base_url))
        .header(TENANT_HEADER, "abc")
        .send()
        .await
        .unwrap();
    let zero = client
        .get(format!("{}/produtos", srv.base_url))
        .header(TENANT_HEADER, "0")
        .send()
        .await
        .unwrap();

    assert_eq!(missing.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(garbage.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(zero.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn create_then_get_round_trips_the_record() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let res = create_produto(
        &client,
        &srv.base_url,
        1,
        json!({
            "nome": "Pizza Margherita",
            "descricao": "Molho e mussarela",
            "preco": 4500,
            "permiteObservacoes": true,
        }),
    )
    .await;

    assert_eq!(res.status(), StatusCode::OK);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["message"], "O produto foi cadastrado com sucesso.");
    let produto = &body["produto"];
    assert_eq!(produto["nome"], "Pizza Margherita");
    assert_eq!(produto["permiteObservacoes"], true);
    assert_eq!(produto["ativo"], false);
    let id = produto["id"].as_i64().unwrap();

    let res = get_produto(&client, &srv.base_url, 1, id).await;
    assert_eq!(res.status(), StatusCode::OK);
    let fetched: serde_json::Value = res.json().await.unwrap();
    assert_eq!(fetched["nome"], "Pizza Margherita");
    assert_eq!(fetched["descricao"], "Molho e mussarela");
    assert_eq!(fetched["preco"], 4500);
    assert_eq!(fetched["restauranteId"], 1);
    assert_eq!(fetched["ativo"], false);
}

#[tokio::test]
async fn products_are_hidden_from_other_tenants() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let id = create_produto_id(&client, &srv.base_url, 1, "Pizza", 4500).await;

    let res = get_produto(&client, &srv.base_url, 2, id).await;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["error"], "not_found");
    assert_eq!(body["message"], "Produto não encontrado");

    let res = client
        .get(format!("{}/produtos", srv.base_url))
        .header(TENANT_HEADER, "2")
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let listed: serde_json::Value = res.json().await.unwrap();
    assert_eq!(listed.as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn list_returns_all_of_the_tenants_products() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    create_produto_id(&client, &srv.base_url, 1, "Pizza", 4500).await;
    create_produto_id(&client, &srv.base_url, 1, "Suco", 800).await;
    create_produto_id(&client, &srv.base_url, 2, "Burger", 3000).await;

    let res = client
        .get(format!("{}/produtos", srv.base_url))
        .header(TENANT_HEADER, "1")
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::OK);
    let listed: serde_json::Value = res.json().await.unwrap();
    let nomes: Vec<&str> = listed
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["nome"].as_str().unwrap())
        .collect();
    assert_eq!(nomes, vec!["Pizza", "Suco"]);
}

#[tokio::test]
async fn create_reports_the_first_violated_constraint() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let sem_nome = create_produto(&client, &srv.base_url, 1, json!({ "preco": 100 })).await;
    assert_eq!(sem_nome.status(), StatusCode::BAD_REQUEST);
    let body: serde_json::Value = sem_nome.json().await.unwrap();
    assert_eq!(body["error"], "validation_error");
    assert_eq!(body["message"], "nome é um campo obrigatório");

    let preco_zero = create_produto(
        &client,
        &srv.base_url,
        1,
        json!({ "nome": "Pizza", "preco": 0 }),
    )
    .await;
    assert_eq!(preco_zero.status(), StatusCode::BAD_REQUEST);
    let body: serde_json::Value = preco_zero.json().await.unwrap();
    assert_eq!(body["message"], "preco deve ser um número positivo");

    let nome_longo = create_produto(
        &client,
        &srv.base_url,
        1,
        json!({ "nome": "x".repeat(51), "preco": 100 }),
    )
    .await;
    assert_eq!(nome_longo.status(), StatusCode::BAD_REQUEST);
    let body: serde_json::Value = nome_longo.json().await.unwrap();
    assert_eq!(body["message"], "nome deve ter no máximo 50 caracteres");
}

#[tokio::test]
async fn duplicate_names_conflict_even_across_tenants() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    create_produto_id(&client, &srv.base_url, 1, "Pizza", 4500).await;

    let res = create_produto(
        &client,
        &srv.base_url,
        2,
        json!({ "nome": "pizza", "preco": 3000 }),
    )
    .await;

    assert_eq!(res.status(), StatusCode::CONFLICT);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["error"], "conflict");
    assert_eq!(body["message"], "Já existe produto cadastrado com esse nome");
}

#[tokio::test]
async fn get_with_malformed_id_is_a_client_error() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let res = client
        .get(format!("{}/produtos/abc", srv.base_url))
        .header(TENANT_HEADER, "1")
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["error"], "validation_error");
}

#[tokio::test]
async fn edit_updates_only_the_provided_fields() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();
    let id = create_produto_id(&client, &srv.base_url, 1, "Pizza", 4500).await;

    let res = client
        .put(format!("{}/produtos/{id}", srv.base_url))
        .header(TENANT_HEADER, "1")
        .json(&json!({ "preco": 5000 }))
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::OK);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["message"], "O produto foi atualizado com sucesso");

    let fetched: serde_json::Value = get_produto(&client, &srv.base_url, 1, id)
        .await
        .json()
        .await
        .unwrap();
    assert_eq!(fetched["preco"], 5000);
    assert_eq!(fetched["nome"], "Pizza");
}

#[tokio::test]
async fn edit_with_no_fields_is_rejected_before_the_id_is_looked_at() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    // Unknown and even unparseable ids still get the no-fields answer.
    for id in ["999999", "abc"] {
        let res = client
            .put(format!("{}/produtos/{id}", srv.base_url))
            .header(TENANT_HEADER, "1")
            .json(&json!({}))
            .send()
            .await
            .unwrap();

        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        let body: serde_json::Value = res.json().await.unwrap();
        assert_eq!(
            body["message"],
            "Informe ao menos um campo para atualizaçao do produto"
        );
    }
}

#[tokio::test]
async fn edit_unknown_product_is_not_found() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let res = client
        .put(format!("{}/produtos/999999", srv.base_url))
        .header(TENANT_HEADER, "1")
        .json(&json!({ "preco": 100 }))
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn provided_falsy_values_count_as_real_updates() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();
    let res = create_produto(
        &client,
        &srv.base_url,
        1,
        json!({
            "nome": "Pizza",
            "descricao": "Grande",
            "preco": 4500,
            "permiteObservacoes": true,
        }),
    )
    .await;
    let body: serde_json::Value = res.json().await.unwrap();
    let id = body["produto"]["id"].as_i64().unwrap();

    let res = client
        .put(format!("{}/produtos/{id}", srv.base_url))
        .header(TENANT_HEADER, "1")
        .json(&json!({ "descricao": "", "permiteObservacoes": false }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let fetched: serde_json::Value = get_produto(&client, &srv.base_url, 1, id)
        .await
        .json()
        .await
        .unwrap();
    assert_eq!(fetched["descricao"], "");
    assert_eq!(fetched["permiteObservacoes"], false);
}

#[tokio::test]
async fn activate_twice_succeeds_and_stays_active() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();
    let id = create_produto_id(&client, &srv.base_url, 1, "Pizza", 4500).await;

    for _ in 0..2 {
        let res = client
            .post(format!("{}/produtos/{id}/ativar", srv.base_url))
            .header(TENANT_HEADER, "1")
            .send()
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::OK);
        let body: serde_json::Value = res.json().await.unwrap();
        assert_eq!(body["message"], "Produto ativado com sucesso");
    }

    let fetched: serde_json::Value = get_produto(&client, &srv.base_url, 1, id)
        .await
        .json()
        .await
        .unwrap();
    assert_eq!(fetched["ativo"], true);
}

#[tokio::test]
async fn delete_guard_follows_the_lifecycle() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();
    let id = create_produto_id(&client, &srv.base_url, 1, "Soda", 700).await;

    // Activate: product becomes undeletable.
    let res = client
        .post(format!("{}/produtos/{id}/ativar", srv.base_url))
        .header(TENANT_HEADER, "1")
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let res = client
        .delete(format!("{}/produtos/{id}", srv.base_url))
        .header(TENANT_HEADER, "1")
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["error"], "invalid_state");
    assert_eq!(body["message"], "Não é possível excluir um produto ativo");

    // Deactivate: deletion is allowed again.
    let res = client
        .post(format!("{}/produtos/{id}/desativar", srv.base_url))
        .header(TENANT_HEADER, "1")
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["message"], "Produto desativado com sucesso");

    let res = client
        .delete(format!("{}/produtos/{id}", srv.base_url))
        .header(TENANT_HEADER, "1")
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["message"], "Produto excluido com sucesso");

    let res = get_produto(&client, &srv.base_url, 1, id).await;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn delete_unknown_product_is_not_found() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let res = client
        .delete(format!("{}/produtos/123", srv.base_url))
        .header(TENANT_HEADER, "1")
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}

/// Store whose backend is gone: every call fails before reaching a row.
struct OfflineStore;

fn offline() -> StoreError {
    StoreError::Unavailable("connection refused".to_string())
}

#[async_trait]
impl ProductStore for OfflineStore {
    async fn list_by_tenant(
        &self,
        _restaurante_id: RestauranteId,
    ) -> Result<Vec<Product>, StoreError> {
        Err(offline())
    }

    async fn find_by_tenant_and_id(
        &self,
        _restaurante_id: RestauranteId,
        _id: ProductId,
    ) -> Result<Option<Product>, StoreError> {
        Err(offline())
    }

    async fn find_by_nome(&self, _nome: &str) -> Result<Option<Product>, StoreError> {
        Err(offline())
    }

    async fn insert(
        &self,
        _restaurante_id: RestauranteId,
        _novo: &NewProduct,
    ) -> Result<Product, StoreError> {
        Err(offline())
    }

    async fn update(
        &self,
        _restaurante_id: RestauranteId,
        _id: ProductId,
        _patch: &ProductPatch,
    ) -> Result<u64, StoreError> {
        Err(offline())
    }

    async fn delete(
        &self,
        _restaurante_id: RestauranteId,
        _id: ProductId,
    ) -> Result<u64, StoreError> {
        Err(offline())
    }
}

#[tokio::test]
async fn store_failures_become_server_errors() {
    let srv = TestServer::spawn_with(Arc::new(OfflineStore)).await;
    let client = reqwest::Client::new();

    let res = client
        .get(format!("{}/produtos", srv.base_url))
        .header(TENANT_HEADER, "1")
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["error"], "store_error");
    assert_eq!(body["message"], "connection refused");
}
