//! In-memory product store backed by a `RwLock<HashMap>`.
//!
//! Keeps the same observable contract as the Postgres backend: ids are
//! assigned on insert and the catalog-wide case-insensitive name rule is
//! enforced on every write, atomically under the write lock. Intended for
//! tests and local development.

use std::collections::HashMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use async_trait::async_trait;

use cardapio_catalog::{NewProduct, Product, ProductPatch};
use cardapio_core::{ProductId, RestauranteId};

use super::{ProductStore, StoreError};

#[derive(Debug, Default)]
struct Inner {
    rows: HashMap<(RestauranteId, ProductId), Product>,
    next_id: i64,
}

/// HashMap-backed [`ProductStore`] keyed by `(restaurante_id, product_id)`.
#[derive(Debug, Default)]
pub struct InMemoryProductStore {
    inner: RwLock<Inner>,
}

impl InMemoryProductStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, Inner>, StoreError> {
        self.inner
            .read()
            .map_err(|_| StoreError::Unavailable("store lock poisoned".to_string()))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, Inner>, StoreError> {
        self.inner
            .write()
            .map_err(|_| StoreError::Unavailable("store lock poisoned".to_string()))
    }
}

fn nome_taken(inner: &Inner, nome: &str, exclude: Option<(RestauranteId, ProductId)>) -> bool {
    let wanted = nome.to_lowercase();
    inner.rows.iter().any(|(key, row)| {
        if Some(*key) == exclude {
            return false;
        }
        row.nome.to_lowercase() == wanted
    })
}

#[async_trait]
impl ProductStore for InMemoryProductStore {
    async fn list_by_tenant(
        &self,
        restaurante_id: RestauranteId,
    ) -> Result<Vec<Product>, StoreError> {
        let inner = self.read()?;
        let mut products: Vec<Product> = inner
            .rows
            .iter()
            .filter(|((owner, _), _)| *owner == restaurante_id)
            .map(|(_, row)| row.clone())
            .collect();
        products.sort_by_key(|p| p.id.as_i64());
        Ok(products)
    }

    async fn find_by_tenant_and_id(
        &self,
        restaurante_id: RestauranteId,
        id: ProductId,
    ) -> Result<Option<Product>, StoreError> {
        let inner = self.read()?;
        Ok(inner.rows.get(&(restaurante_id, id)).cloned())
    }

    async fn find_by_nome(&self, nome: &str) -> Result<Option<Product>, StoreError> {
        let inner = self.read()?;
        let wanted = nome.to_lowercase();
        Ok(inner
            .rows
            .values()
            .find(|row| row.nome.to_lowercase() == wanted)
            .cloned())
    }

    async fn insert(
        &self,
        restaurante_id: RestauranteId,
        novo: &NewProduct,
    ) -> Result<Product, StoreError> {
        let mut inner = self.write()?;
        if nome_taken(&inner, &novo.nome, None) {
            return Err(StoreError::UniqueViolation(format!(
                "nome already exists: {}",
                novo.nome
            )));
        }

        inner.next_id += 1;
        let id = ProductId::from_i64(inner.next_id);
        let product = Product {
            id,
            restaurante_id,
            nome: novo.nome.clone(),
            descricao: novo.descricao.clone(),
            preco: novo.preco,
            permite_observacoes: novo.permite_observacoes,
            ativo: false,
        };
        inner.rows.insert((restaurante_id, id), product.clone());
        Ok(product)
    }

    async fn update(
        &self,
        restaurante_id: RestauranteId,
        id: ProductId,
        patch: &ProductPatch,
    ) -> Result<u64, StoreError> {
        let mut inner = self.write()?;
        let key = (restaurante_id, id);
        if !inner.rows.contains_key(&key) {
            return Ok(0);
        }
        if let Some(nome) = &patch.nome {
            if nome_taken(&inner, nome, Some(key)) {
                return Err(StoreError::UniqueViolation(format!(
                    "nome already exists: {nome}"
                )));
            }
        }
        if let Some(row) = inner.rows.get_mut(&key) {
            patch.apply_to(row);
            return Ok(1);
        }
        Ok(0)
    }

    async fn delete(
        &self,
        restaurante_id: RestauranteId,
        id: ProductId,
    ) -> Result<u64, StoreError> {
        let mut inner = self.write()?;
        let key = (restaurante_id, id);
        let removable = inner.rows.get(&key).is_some_and(|row| !row.ativo);
        if removable {
            inner.rows.remove(&key);
            return Ok(1);
        }
        Ok(0)
    }
}
