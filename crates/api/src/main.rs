use std::sync::Arc;

use anyhow::Context;

use cardapio_api::{app, observability};
use cardapio_infra::{InMemoryProductStore, PostgresProductStore, ProductStore};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    observability::init();

    let store: Arc<dyn ProductStore> = match std::env::var("DATABASE_URL") {
        Ok(url) => {
            let store = PostgresProductStore::connect(&url)
                .await
                .context("failed to open database pool")?;
            store
                .ensure_schema()
                .await
                .context("failed to prepare database schema")?;
            Arc::new(store)
        }
        Err(_) => {
            tracing::warn!("DATABASE_URL not set; using in-memory store");
            Arc::new(InMemoryProductStore::new())
        }
    };

    let app = app::build_app(store);

    let bind_addr = std::env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:8080".to_string());
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {bind_addr}"))?;

    tracing::info!("listening on {}", listener.local_addr()?);

    axum::serve(listener, app).await.context("server error")?;
    Ok(())
}
