//! Storage backends for the product catalog.
//!
//! The [`store`] module defines the tenant-scoped repository contract and
//! ships two implementations: an in-memory store for tests and local
//! development, and a Postgres store for production.

pub mod store;

pub use store::{InMemoryProductStore, PostgresProductStore, ProductStore, StoreError};
