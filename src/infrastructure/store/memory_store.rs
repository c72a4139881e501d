//! In-process mapping store.

use async_trait::async_trait;
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use tracing::debug;

use crate::domain::entities::Code;
use crate::domain::repositories::{MappingStore, PutOutcome, StoreError, StoreResult};

/// Mapping store kept in a concurrent hash map.
///
/// The claim runs under the shard lock of the key's entry, which gives the
/// same all-or-nothing behavior as the Redis script. Contents live only as
/// long as the process.
#[derive(Debug, Default)]
pub struct MemoryMappingStore {
    entries: DashMap<String, String>,
}

impl MemoryMappingStore {
    pub fn new() -> Self {
        debug!("Using in-memory mapping store");
        Self::default()
    }

    /// Number of stored mappings.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[async_trait]
impl MappingStore for MemoryMappingStore {
    async fn put(&self, code: &Code, target: &str) -> StoreResult<()> {
        self.entries
            .insert(code.as_str().to_owned(), target.to_owned());
        Ok(())
    }

    async fn get(&self, code: &Code) -> StoreResult<String> {
        self.entries
            .get(code.as_str())
            .map(|entry| entry.value().clone())
            .ok_or_else(|| StoreError::NotFound {
                code: code.to_string(),
            })
    }

    async fn try_put_if_absent_or_same(
        &self,
        code: &Code,
        target: &str,
    ) -> StoreResult<PutOutcome> {
        let outcome = match self.entries.entry(code.as_str().to_owned()) {
            Entry::Vacant(slot) => {
                slot.insert(target.to_owned());
                PutOutcome::Created
            }
            Entry::Occupied(existing) if existing.get() == target => PutOutcome::AlreadyPresentSame,
            Entry::Occupied(_) => PutOutcome::Collision,
        };
        Ok(outcome)
    }

    async fn ping(&self) -> StoreResult<()> {
        Ok(())
    }
}
