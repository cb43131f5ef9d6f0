//! Tenant-scoped persistence for catalog products.
//!
//! ## Contract
//!
//! Every operation except [`ProductStore::find_by_nome`] takes the owning
//! `restaurante_id` and folds it into the storage predicate, so a tenant can
//! never read or mutate another tenant's rows. `find_by_nome` deliberately
//! searches the whole catalog: product names are unique across all tenants.
//!
//! ## Conditional writes
//!
//! `update` and `delete` report how many rows the statement touched instead
//! of re-checking existence first. A count of zero means the row was gone
//! (or no longer eligible) by the time the write ran; callers decide what
//! that means for their operation. The store never turns zero into an error.

mod memory;
mod postgres;

use async_trait::async_trait;
use thiserror::Error;

use cardapio_catalog::{NewProduct, Product, ProductPatch};
use cardapio_core::{ProductId, RestauranteId};

pub use memory::InMemoryProductStore;
pub use postgres::PostgresProductStore;

/// Failures surfaced by a product store backend.
#[derive(Debug, Error)]
pub enum StoreError {
    /// A unique constraint rejected the write. Raised when two writers race
    /// on the same product name and the index catches the loser.
    #[error("unique violation: {0}")]
    UniqueViolation(String),

    /// The backend could not be reached or is shutting down.
    #[error("store unavailable: {0}")]
    Unavailable(String),

    /// The backend rejected or failed the statement for any other reason.
    #[error("query failed: {0}")]
    Query(String),
}

/// Repository contract for catalog products.
#[async_trait]
pub trait ProductStore: Send + Sync {
    /// All products owned by the tenant. Empty result is not an error.
    async fn list_by_tenant(
        &self,
        restaurante_id: RestauranteId,
    ) -> Result<Vec<Product>, StoreError>;

    /// Single product by tenant and id. `None` means no such row for this
    /// tenant; the caller maps that to its own not-found outcome.
    async fn find_by_tenant_and_id(
        &self,
        restaurante_id: RestauranteId,
        id: ProductId,
    ) -> Result<Option<Product>, StoreError>;

    /// Case-insensitive name lookup across the whole catalog, ignoring
    /// tenant boundaries.
    async fn find_by_nome(&self, nome: &str) -> Result<Option<Product>, StoreError>;

    /// Persist a new product and return the stored row with its assigned id.
    /// New products are always stored inactive.
    async fn insert(
        &self,
        restaurante_id: RestauranteId,
        novo: &NewProduct,
    ) -> Result<Product, StoreError>;

    /// Apply the provided fields of `patch` to the tenant's product and
    /// return the affected-row count.
    async fn update(
        &self,
        restaurante_id: RestauranteId,
        id: ProductId,
        patch: &ProductPatch,
    ) -> Result<u64, StoreError>;

    /// Remove the tenant's product and return the affected-row count. The
    /// predicate also requires the row to be inactive, so an activation that
    /// lands between the caller's guard and this statement yields zero.
    async fn delete(
        &self,
        restaurante_id: RestauranteId,
        id: ProductId,
    ) -> Result<u64, StoreError>;
}
