use cardapio_core::RestauranteId;

/// Tenant context for a request.
///
/// This is immutable and must be present for all catalog routes.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct RestauranteContext {
    restaurante_id: RestauranteId,
}

impl RestauranteContext {
    pub fn new(restaurante_id: RestauranteId) -> Self {
        Self { restaurante_id }
    }

    pub fn restaurante_id(&self) -> RestauranteId {
        self.restaurante_id
    }
}
