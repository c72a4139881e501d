//! Mapping store implementations.
//!
//! - [`RedisMappingStore`] - Production store, one pooled connection per operation
//! - [`MemoryMappingStore`] - In-process map for development and tests

mod memory_store;
mod pool;
mod redis_store;

pub use memory_store::MemoryMappingStore;
pub use pool::{CommandFailure, PoolSettings, RedisConnection, RedisConnectionManager, RedisPool};
pub use redis_store::RedisMappingStore;

use std::sync::Arc;

use crate::config::{Config, StoreBackend};
use crate::domain::repositories::{MappingStore, StoreResult};

/// Builds the store selected by [`Config::store_backend`].
///
/// The Redis store is pinged once so that a wrong address fails at startup
/// rather than on the first request.
///
/// # Errors
///
/// Returns a store error if the Redis URL is invalid or the server does not answer.
pub async fn connect(config: &Config) -> StoreResult<Arc<dyn MappingStore>> {
    match config.store_backend {
        StoreBackend::Redis => {
            let pool = RedisPool::new(&config.redis_url, config.pool_settings())?;
            let store = RedisMappingStore::new(pool, config.key_prefix.clone());
            store.ping().await?;
            tracing::info!("Store ready (Redis)");
            Ok(Arc::new(store))
        }
        StoreBackend::Memory => {
            tracing::warn!("Store is in-process memory, mappings are lost on restart");
            Ok(Arc::new(MemoryMappingStore::new()))
        }
    }
}
