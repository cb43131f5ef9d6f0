//! Product service: the orchestration layer over the store.
//!
//! Each operation is one fallible unit. Validation and not-found checks run
//! before any mutating call; every mutating statement is conditional, and a
//! zero affected-row count after the guards passed means the write lost a
//! race, surfaced as [`DomainError::NoOp`].

use std::sync::Arc;

use cardapio_catalog::{
    ensure_deletable, parse_path_id, validate_create, Product, ProductInput, ProductPatch,
};
use cardapio_core::{DomainError, DomainResult, RestauranteId};
use cardapio_infra::{ProductStore, StoreError};

const MSG_NOME_DUPLICADO: &str = "Já existe produto cadastrado com esse nome";
const MSG_NENHUM_CAMPO: &str = "Informe ao menos um campo para atualizaçao do produto";
const MSG_NAO_ATUALIZADO: &str = "O produto não foi atualizado";
const MSG_NAO_EXCLUIDO: &str = "O produto não foi excluido";
const MSG_NAO_ATIVADO: &str = "O produto não foi ativado";
const MSG_NAO_DESATIVADO: &str = "O produto não foi desativado";

fn map_store_error(err: StoreError) -> DomainError {
    match err {
        // A unique-index hit means the pre-check raced another create; report
        // it exactly like the pre-check would have.
        StoreError::UniqueViolation(_) => DomainError::conflict(MSG_NOME_DUPLICADO),
        StoreError::Unavailable(msg) | StoreError::Query(msg) => DomainError::storage(msg),
    }
}

/// Catalog operations for one product store.
pub struct ProductService {
    store: Arc<dyn ProductStore>,
}

impl ProductService {
    pub fn new(store: Arc<dyn ProductStore>) -> Self {
        Self { store }
    }

    /// All products owned by the tenant; empty is a normal result.
    pub async fn list_products(
        &self,
        restaurante_id: RestauranteId,
    ) -> DomainResult<Vec<Product>> {
        self.store
            .list_by_tenant(restaurante_id)
            .await
            .map_err(map_store_error)
    }

    /// Single product, or `NotFound` when the tenant owns no such row.
    pub async fn get_product(
        &self,
        restaurante_id: RestauranteId,
        raw_id: &str,
    ) -> DomainResult<Product> {
        let id = parse_path_id(raw_id)?;
        self.store
            .find_by_tenant_and_id(restaurante_id, id)
            .await
            .map_err(map_store_error)?
            .ok_or(DomainError::NotFound)
    }

    /// Validate, enforce the catalog-wide name rule, insert inactive.
    pub async fn create_product(
        &self,
        restaurante_id: RestauranteId,
        input: ProductInput,
    ) -> DomainResult<Product> {
        let novo = validate_create(&input)?;

        // Name uniqueness is catalog-wide, not per tenant.
        let existente = self
            .store
            .find_by_nome(&novo.nome)
            .await
            .map_err(map_store_error)?;
        if existente.is_some() {
            return Err(DomainError::conflict(MSG_NOME_DUPLICADO));
        }

        self.store
            .insert(restaurante_id, &novo)
            .await
            .map_err(map_store_error)
    }

    /// Partial update. The no-fields check runs before anything else, so an
    /// empty payload is rejected even when the id is garbage or unknown.
    pub async fn edit_product(
        &self,
        restaurante_id: RestauranteId,
        raw_id: &str,
        patch: ProductPatch,
    ) -> DomainResult<()> {
        if patch.is_empty() {
            return Err(DomainError::validation(MSG_NENHUM_CAMPO));
        }
        let id = parse_path_id(raw_id)?;

        self.store
            .find_by_tenant_and_id(restaurante_id, id)
            .await
            .map_err(map_store_error)?
            .ok_or(DomainError::NotFound)?;

        let affected = self
            .store
            .update(restaurante_id, id, &patch)
            .await
            .map_err(map_store_error)?;
        if affected == 0 {
            return Err(DomainError::no_op(MSG_NAO_ATUALIZADO));
        }
        Ok(())
    }

    /// Remove an inactive product. The delete statement re-asserts the
    /// inactive state, so an activation racing past the guard yields `NoOp`.
    pub async fn delete_product(
        &self,
        restaurante_id: RestauranteId,
        raw_id: &str,
    ) -> DomainResult<()> {
        let id = parse_path_id(raw_id)?;
        let produto = self
            .store
            .find_by_tenant_and_id(restaurante_id, id)
            .await
            .map_err(map_store_error)?
            .ok_or(DomainError::NotFound)?;
        ensure_deletable(&produto)?;

        let affected = self
            .store
            .delete(restaurante_id, id)
            .await
            .map_err(map_store_error)?;
        if affected == 0 {
            return Err(DomainError::no_op(MSG_NAO_EXCLUIDO));
        }
        Ok(())
    }

    /// Idempotent: activating an already-active product still succeeds.
    pub async fn activate_product(
        &self,
        restaurante_id: RestauranteId,
        raw_id: &str,
    ) -> DomainResult<()> {
        self.toggle(restaurante_id, raw_id, true, MSG_NAO_ATIVADO)
            .await
    }

    /// Idempotent: deactivating an already-inactive product still succeeds.
    pub async fn deactivate_product(
        &self,
        restaurante_id: RestauranteId,
        raw_id: &str,
    ) -> DomainResult<()> {
        self.toggle(restaurante_id, raw_id, false, MSG_NAO_DESATIVADO)
            .await
    }

    async fn toggle(
        &self,
        restaurante_id: RestauranteId,
        raw_id: &str,
        ativo: bool,
        zero_message: &str,
    ) -> DomainResult<()> {
        let id = parse_path_id(raw_id)?;
        self.store
            .find_by_tenant_and_id(restaurante_id, id)
            .await
            .map_err(map_store_error)?
            .ok_or(DomainError::NotFound)?;

        let affected = self
            .store
            .update(restaurante_id, id, &ProductPatch::set_ativo(ativo))
            .await
            .map_err(map_store_error)?;
        if affected == 0 {
            return Err(DomainError::no_op(zero_message));
        }
        Ok(())
    }
}
