//! Infrastructure layer for external integrations.
//!
//! Provides the concrete [`crate::domain::repositories::MappingStore`]
//! implementations.
//!
//! # Modules
//!
//! - [`store`] - Redis-backed gateway with its connection pool, plus an in-memory store

pub mod store;
