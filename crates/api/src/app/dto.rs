//! Request DTOs and their mapping into domain types.
//!
//! Create bodies deserialize straight into `cardapio_catalog::ProductInput`;
//! only edit needs its own wire type so `ativo` stays unsettable from the
//! outside (the lifecycle toggles own that flag).

use serde::Deserialize;

use cardapio_catalog::ProductPatch;

/// Edit payload. Absent and `null` fields leave the column untouched;
/// provided falsy values (empty string, zero, `false`) are real updates.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EditProductRequest {
    pub nome: Option<String>,
    pub descricao: Option<String>,
    pub preco: Option<i64>,
    pub permite_observacoes: Option<bool>,
}

impl From<EditProductRequest> for ProductPatch {
    fn from(req: EditProductRequest) -> Self {
        ProductPatch {
            nome: req.nome,
            descricao: req.descricao,
            preco: req.preco,
            permite_observacoes: req.permite_observacoes,
            ativo: None,
        }
    }
}
