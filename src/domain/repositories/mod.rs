//! Store contract for URL mappings.
//!
//! The trait is implemented in `crate::infrastructure::store` and mocked via
//! `mockall` for service tests.

pub mod mapping_store;

pub use mapping_store::{MappingStore, PutOutcome, StoreError, StoreResult};

#[cfg(test)]
pub use mapping_store::MockMappingStore;
