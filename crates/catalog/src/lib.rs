//! Catalog domain module.
//!
//! This crate contains the business rules for the tenant product catalog as
//! deterministic domain logic with no IO: the product entity with its
//! payload shapes, the declarative field-constraint schemas, and the
//! active/inactive lifecycle rules.

pub mod lifecycle;
pub mod product;
pub mod schema;

pub use lifecycle::{ensure_deletable, ProductState};
pub use product::{NewProduct, Product, ProductInput, ProductPatch};
pub use schema::{parse_path_id, validate_create};
