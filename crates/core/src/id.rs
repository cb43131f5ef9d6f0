//! Strongly-typed identifiers used across the domain.

use core::str::FromStr;
use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// Identifier of a restaurante (multi-tenant boundary).
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RestauranteId(i64);

/// Identifier of a product. Assigned by storage on insert, never minted here.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(i64);

macro_rules! impl_id_newtype {
    ($t:ty, $field:literal) => {
        impl $t {
            pub fn from_i64(id: i64) -> Self {
                Self(id)
            }

            pub fn as_i64(&self) -> i64 {
                self.0
            }
        }

        impl core::fmt::Display for $t {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                core::fmt::Display::fmt(&self.0, f)
            }
        }

        impl From<i64> for $t {
            fn from(value: i64) -> Self {
                Self(value)
            }
        }

        impl From<$t> for i64 {
            fn from(value: $t) -> Self {
                value.0
            }
        }

        impl FromStr for $t {
            type Err = DomainError;

            /// Storage ids are positive integers; anything else is a caller error.
            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let id: i64 = s
                    .trim()
                    .parse()
                    .map_err(|_| DomainError::validation(concat!($field, " deve ser um número positivo")))?;
                if id <= 0 {
                    return Err(DomainError::validation(concat!(
                        $field,
                        " deve ser um número positivo"
                    )));
                }
                Ok(Self(id))
            }
        }
    };
}

impl_id_newtype!(RestauranteId, "restauranteId");
impl_id_newtype!(ProductId, "id");
