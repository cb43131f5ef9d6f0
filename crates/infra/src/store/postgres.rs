//! Postgres-backed product store.
//!
//! All statements fold `restaurante_id` into the `WHERE` clause, and the
//! catalog-wide name rule lives in a unique index over `LOWER(nome)`, so the
//! database is the last line of defense against racing writers.
//!
//! ## Error mapping
//!
//! | sqlx failure | Mapped to |
//! |---|---|
//! | `Database` error with code `23505` | [`StoreError::UniqueViolation`] |
//! | `PoolClosed`, `PoolTimedOut`, `Io` | [`StoreError::Unavailable`] |
//! | Anything else | [`StoreError::Query`] |

use std::sync::Arc;

use async_trait::async_trait;
use sqlx::postgres::{PgPoolOptions, PgRow};
use sqlx::{FromRow, PgPool, Row};
use tracing::instrument;

use cardapio_catalog::{NewProduct, Product, ProductPatch};
use cardapio_core::{ProductId, RestauranteId};

use super::{ProductStore, StoreError};

/// [`ProductStore`] implementation on top of a Postgres connection pool.
pub struct PostgresProductStore {
    pool: Arc<PgPool>,
}

impl PostgresProductStore {
    pub fn new(pool: PgPool) -> Self {
        Self {
            pool: Arc::new(pool),
        }
    }

    /// Open a connection pool against `database_url`.
    pub async fn connect(database_url: &str) -> Result<Self, StoreError> {
        let pool = PgPoolOptions::new()
            .max_connections(10)
            .connect(database_url)
            .await
            .map_err(|e| StoreError::Unavailable(format!("failed to connect: {e}")))?;
        Ok(Self::new(pool))
    }

    /// Create the `produto` table and its indexes when they do not exist yet.
    /// Safe to call on every startup.
    pub async fn ensure_schema(&self) -> Result<(), StoreError> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS produto (
                id BIGSERIAL PRIMARY KEY,
                restaurante_id BIGINT NOT NULL,
                nome TEXT NOT NULL,
                descricao TEXT,
                preco BIGINT NOT NULL,
                permite_observacoes BOOLEAN NOT NULL DEFAULT FALSE,
                ativo BOOLEAN NOT NULL DEFAULT FALSE
            )
            "#,
        )
        .execute(self.pool.as_ref())
        .await
        .map_err(|e| map_sqlx_error("ensure_schema", e))?;

        sqlx::query(
            "CREATE UNIQUE INDEX IF NOT EXISTS produto_nome_lower_idx ON produto (LOWER(nome))",
        )
        .execute(self.pool.as_ref())
        .await
        .map_err(|e| map_sqlx_error("ensure_schema", e))?;

        sqlx::query(
            "CREATE INDEX IF NOT EXISTS produto_restaurante_idx ON produto (restaurante_id)",
        )
        .execute(self.pool.as_ref())
        .await
        .map_err(|e| map_sqlx_error("ensure_schema", e))?;

        Ok(())
    }
}

/// Raw `produto` row as stored.
struct ProductRow {
    id: i64,
    restaurante_id: i64,
    nome: String,
    descricao: Option<String>,
    preco: i64,
    permite_observacoes: bool,
    ativo: bool,
}

impl<'r> FromRow<'r, PgRow> for ProductRow {
    fn from_row(row: &'r PgRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            id: row.try_get("id")?,
            restaurante_id: row.try_get("restaurante_id")?,
            nome: row.try_get("nome")?,
            descricao: row.try_get("descricao")?,
            preco: row.try_get("preco")?,
            permite_observacoes: row.try_get("permite_observacoes")?,
            ativo: row.try_get("ativo")?,
        })
    }
}

impl From<ProductRow> for Product {
    fn from(row: ProductRow) -> Self {
        Product {
            id: ProductId::from_i64(row.id),
            restaurante_id: RestauranteId::from_i64(row.restaurante_id),
            nome: row.nome,
            descricao: row.descricao,
            preco: row.preco,
            permite_observacoes: row.permite_observacoes,
            ativo: row.ativo,
        }
    }
}

fn decode_row(row: &PgRow) -> Result<Product, StoreError> {
    let parsed = ProductRow::from_row(row)
        .map_err(|e| StoreError::Query(format!("failed to decode product row: {e}")))?;
    Ok(parsed.into())
}

fn map_sqlx_error(operation: &str, err: sqlx::Error) -> StoreError {
    match err {
        sqlx::Error::Database(db_err) => {
            let message = format!("database error in {operation}: {}", db_err.message());
            if let Some(code) = db_err.code() {
                if code.as_ref() == "23505" {
                    return StoreError::UniqueViolation(message);
                }
            }
            StoreError::Query(message)
        }
        sqlx::Error::PoolClosed => {
            StoreError::Unavailable(format!("connection pool closed during {operation}"))
        }
        sqlx::Error::PoolTimedOut => {
            StoreError::Unavailable(format!("connection pool timed out during {operation}"))
        }
        sqlx::Error::Io(io_err) => {
            StoreError::Unavailable(format!("io error during {operation}: {io_err}"))
        }
        other => StoreError::Query(format!("sqlx error during {operation}: {other}")),
    }
}

#[async_trait]
impl ProductStore for PostgresProductStore {
    #[instrument(skip(self), fields(restaurante_id = %restaurante_id.as_i64()), err)]
    async fn list_by_tenant(
        &self,
        restaurante_id: RestauranteId,
    ) -> Result<Vec<Product>, StoreError> {
        let rows = sqlx::query(
            r#"
            SELECT id, restaurante_id, nome, descricao, preco, permite_observacoes, ativo
            FROM produto
            WHERE restaurante_id = $1
            ORDER BY id
            "#,
        )
        .bind(restaurante_id.as_i64())
        .fetch_all(self.pool.as_ref())
        .await
        .map_err(|e| map_sqlx_error("list_by_tenant", e))?;

        let mut products = Vec::with_capacity(rows.len());
        for row in &rows {
            products.push(decode_row(row)?);
        }
        Ok(products)
    }

    #[instrument(
        skip(self),
        fields(restaurante_id = %restaurante_id.as_i64(), produto_id = %id.as_i64()),
        err
    )]
    async fn find_by_tenant_and_id(
        &self,
        restaurante_id: RestauranteId,
        id: ProductId,
    ) -> Result<Option<Product>, StoreError> {
        let maybe_row = sqlx::query(
            r#"
            SELECT id, restaurante_id, nome, descricao, preco, permite_observacoes, ativo
            FROM produto
            WHERE restaurante_id = $1 AND id = $2
            "#,
        )
        .bind(restaurante_id.as_i64())
        .bind(id.as_i64())
        .fetch_optional(self.pool.as_ref())
        .await
        .map_err(|e| map_sqlx_error("find_by_tenant_and_id", e))?;

        match maybe_row {
            Some(row) => Ok(Some(decode_row(&row)?)),
            None => Ok(None),
        }
    }

    #[instrument(skip(self), err)]
    async fn find_by_nome(&self, nome: &str) -> Result<Option<Product>, StoreError> {
        let maybe_row = sqlx::query(
            r#"
            SELECT id, restaurante_id, nome, descricao, preco, permite_observacoes, ativo
            FROM produto
            WHERE LOWER(nome) = LOWER($1)
            "#,
        )
        .bind(nome)
        .fetch_optional(self.pool.as_ref())
        .await
        .map_err(|e| map_sqlx_error("find_by_nome", e))?;

        match maybe_row {
            Some(row) => Ok(Some(decode_row(&row)?)),
            None => Ok(None),
        }
    }

    #[instrument(
        skip(self, novo),
        fields(restaurante_id = %restaurante_id.as_i64(), nome = %novo.nome),
        err
    )]
    async fn insert(
        &self,
        restaurante_id: RestauranteId,
        novo: &NewProduct,
    ) -> Result<Product, StoreError> {
        let row = sqlx::query(
            r#"
            INSERT INTO produto (restaurante_id, nome, descricao, preco, permite_observacoes, ativo)
            VALUES ($1, $2, $3, $4, $5, FALSE)
            RETURNING id, restaurante_id, nome, descricao, preco, permite_observacoes, ativo
            "#,
        )
        .bind(restaurante_id.as_i64())
        .bind(&novo.nome)
        .bind(novo.descricao.as_deref())
        .bind(novo.preco)
        .bind(novo.permite_observacoes)
        .fetch_one(self.pool.as_ref())
        .await
        .map_err(|e| map_sqlx_error("insert", e))?;

        decode_row(&row)
    }

    #[instrument(
        skip(self, patch),
        fields(restaurante_id = %restaurante_id.as_i64(), produto_id = %id.as_i64()),
        err
    )]
    async fn update(
        &self,
        restaurante_id: RestauranteId,
        id: ProductId,
        patch: &ProductPatch,
    ) -> Result<u64, StoreError> {
        let result = sqlx::query(
            r#"
            UPDATE produto SET
                nome = COALESCE($3, nome),
                descricao = COALESCE($4, descricao),
                preco = COALESCE($5, preco),
                permite_observacoes = COALESCE($6, permite_observacoes),
                ativo = COALESCE($7, ativo)
            WHERE restaurante_id = $1 AND id = $2
            "#,
        )
        .bind(restaurante_id.as_i64())
        .bind(id.as_i64())
        .bind(patch.nome.as_deref())
        .bind(patch.descricao.as_deref())
        .bind(patch.preco)
        .bind(patch.permite_observacoes)
        .bind(patch.ativo)
        .execute(self.pool.as_ref())
        .await
        .map_err(|e| map_sqlx_error("update", e))?;

        Ok(result.rows_affected())
    }

    #[instrument(
        skip(self),
        fields(restaurante_id = %restaurante_id.as_i64(), produto_id = %id.as_i64()),
        err
    )]
    async fn delete(
        &self,
        restaurante_id: RestauranteId,
        id: ProductId,
    ) -> Result<u64, StoreError> {
        let result = sqlx::query(
            "DELETE FROM produto WHERE restaurante_id = $1 AND id = $2 AND ativo = FALSE",
        )
        .bind(restaurante_id.as_i64())
        .bind(id.as_i64())
        .execute(self.pool.as_ref())
        .await
        .map_err(|e| map_sqlx_error("delete", e))?;

        Ok(result.rows_affected())
    }
}
