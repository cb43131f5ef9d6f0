//! Active/inactive lifecycle rules.
//!
//! Two states, `Inactive` (initial) ⇄ `Active`, projected from the `ativo`
//! flag. The toggles are idempotent; deletion is only reachable from
//! `Inactive`.

use cardapio_core::{DomainError, DomainResult};

use crate::product::Product;

/// Lifecycle state of a product.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProductState {
    Inactive,
    Active,
}

impl ProductState {
    pub fn from_flag(ativo: bool) -> Self {
        if ativo { Self::Active } else { Self::Inactive }
    }

    pub fn as_flag(self) -> bool {
        matches!(self, Self::Active)
    }

    /// Deletion is gated on the inactive state.
    pub fn can_delete(self) -> bool {
        self == Self::Inactive
    }
}

impl Product {
    pub fn state(&self) -> ProductState {
        ProductState::from_flag(self.ativo)
    }
}

/// Guard for the delete transition.
///
/// Existence is the caller's check; this one only rules on state, so
/// not-found keeps precedence over the state guard.
pub fn ensure_deletable(product: &Product) -> DomainResult<()> {
    if !product.state().can_delete() {
        return Err(DomainError::invalid_state(
            "Não é possível excluir um produto ativo",
        ));
    }
    Ok(())
}
