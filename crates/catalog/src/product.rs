use serde::{Deserialize, Serialize};

use cardapio_core::{ProductId, RestauranteId};

/// A sellable catalog item owned by exactly one restaurante.
///
/// `id` is assigned by storage on insert and never changes; `restaurante_id`
/// is set once at creation. Wire names are camelCase on both reads and
/// writes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: ProductId,
    pub restaurante_id: RestauranteId,
    pub nome: String,
    pub descricao: Option<String>,
    pub preco: i64,
    pub permite_observacoes: bool,
    pub ativo: bool,
}

/// Raw create payload as received from the wire, before schema validation.
///
/// Every field is optional here so the schema owns the requiredness rules
/// and their messages.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductInput {
    pub nome: Option<String>,
    pub descricao: Option<String>,
    pub preco: Option<i64>,
    pub permite_observacoes: Option<bool>,
}

/// A validated, normalized record ready for insert. Products start inactive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewProduct {
    pub nome: String,
    pub descricao: Option<String>,
    pub preco: i64,
    pub permite_observacoes: bool,
}

/// Partial update set applied by edit and the lifecycle toggles.
///
/// `None` leaves the column untouched. Provided-but-falsy values (empty
/// string, zero, `false`) are real updates; only absent or `null` fields are
/// skipped.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductPatch {
    pub nome: Option<String>,
    pub descricao: Option<String>,
    pub preco: Option<i64>,
    pub permite_observacoes: Option<bool>,
    pub ativo: Option<bool>,
}

impl ProductPatch {
    /// Patch that only toggles the lifecycle flag.
    pub fn set_ativo(ativo: bool) -> Self {
        Self {
            ativo: Some(ativo),
            ..Self::default()
        }
    }

    /// True when no field would change (the edit guard's "no fields" case).
    pub fn is_empty(&self) -> bool {
        self.nome.is_none()
            && self.descricao.is_none()
            && self.preco.is_none()
            && self.permite_observacoes.is_none()
            && self.ativo.is_none()
    }

    /// Apply this patch to an owned product, returning the updated row as the
    /// store would persist it.
    pub fn apply_to(&self, product: &mut Product) {
        if let Some(nome) = &self.nome {
            product.nome = nome.clone();
        }
        if let Some(descricao) = &self.descricao {
            product.descricao = Some(descricao.clone());
        }
        if let Some(preco) = self.preco {
            product.preco = preco;
        }
        if let Some(permite) = self.permite_observacoes {
            product.permite_observacoes = permite;
        }
        if let Some(ativo) = self.ativo {
            product.ativo = ativo;
        }
    }
}
