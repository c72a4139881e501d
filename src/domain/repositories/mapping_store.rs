//! Mapping store trait, outcomes and errors.

use crate::domain::entities::Code;
use async_trait::async_trait;

/// Errors surfaced by a [`MappingStore`].
///
/// `NotFound` is a regular outcome of a lookup and is kept apart from the
/// transport failures so callers can answer 404 instead of 500.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("no mapping for code {code}")]
    NotFound { code: String },

    #[error("store unavailable: {0}")]
    Unavailable(String),

    #[error("store rejected write: {0}")]
    WriteFailed(String),

    #[error("store rejected read: {0}")]
    ReadFailed(String),
}

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Result of an atomic claim on a code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PutOutcome {
    /// The code was free and now maps to the target.
    Created,
    /// The code already mapped to this exact target. Nothing was written.
    AlreadyPresentSame,
    /// The code maps to a different target. Nothing was written.
    Collision,
}

/// Gateway to the key-value store holding code → target mappings.
///
/// Every method performs exactly one store command (or one atomic script)
/// on a connection that is released before the method returns.
///
/// # Implementations
///
/// - [`crate::infrastructure::store::RedisMappingStore`] - Redis behind a bounded pool
/// - [`crate::infrastructure::store::MemoryMappingStore`] - in-process map for development and tests
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MappingStore: Send + Sync {
    /// Writes or overwrites the mapping for `code`.
    ///
    /// # Errors
    ///
    /// [`StoreError::Unavailable`] if the store cannot be reached in time,
    /// [`StoreError::WriteFailed`] for any other rejection.
    async fn put(&self, code: &Code, target: &str) -> StoreResult<()>;

    /// Reads the target for `code`.
    ///
    /// # Errors
    ///
    /// [`StoreError::NotFound`] when the key does not exist,
    /// [`StoreError::Unavailable`] on connectivity failure or timeout.
    async fn get(&self, code: &Code) -> StoreResult<String>;

    /// Atomically writes the mapping only if `code` is free.
    ///
    /// Reports [`PutOutcome::AlreadyPresentSame`] when the code already maps
    /// to `target` and [`PutOutcome::Collision`] when it maps to anything else.
    /// A collision never overwrites the existing value.
    async fn try_put_if_absent_or_same(&self, code: &Code, target: &str)
    -> StoreResult<PutOutcome>;

    /// Round-trips to the store to confirm it is reachable.
    async fn ping(&self) -> StoreResult<()>;
}
