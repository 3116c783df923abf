//! In-memory partitioned cache backed by dashmap.

use std::sync::Arc;

use dashmap::DashMap;
use log::debug;
use serde::{de::DeserializeOwned, Serialize};

use super::{CachePartition, CacheRegistry, CacheStats, CacheStore};
use crate::errors::{Error, Result};

/// In-memory cache with one [`CachePartition`] per declared name.
///
/// Reads and evictions on an undeclared partition fail with
/// [`Error::UnknownPartition`].
#[derive(Debug, Default)]
pub struct InMemoryCacheStore {
    partitions: DashMap<String, Arc<CachePartition>>,
}

impl InMemoryCacheStore {
    /// Create an empty store with no partitions.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store with every partition the registry declares.
    pub fn for_registry(registry: &CacheRegistry) -> Self {
        let store = Self::new();
        for name in registry.all_partitions() {
            store.declare(name);
        }
        store
    }

    /// Declare a partition. Declaring an existing name keeps its contents.
    pub fn declare(&self, name: &str) {
        self.partitions
            .entry(name.to_string())
            .or_insert_with(|| Arc::new(CachePartition::new(name)));
    }

    /// Read-through lookup on a partition.
    pub fn get_or_compute<T, F>(&self, partition: &str, key: &str, compute: F) -> Result<T>
    where
        T: Serialize + DeserializeOwned,
        F: FnOnce() -> Result<T>,
    {
        self.partition(partition)?.get_or_compute(key, compute)
    }

    /// Counters for a partition.
    pub fn stats(&self, partition: &str) -> Result<CacheStats> {
        Ok(self.partition(partition)?.stats())
    }

    // The Arc is cloned out so no dashmap shard lock is held while computing.
    fn partition(&self, name: &str) -> Result<Arc<CachePartition>> {
        self.partitions
            .get(name)
            .map(|partition| Arc::clone(partition.value()))
            .ok_or_else(|| Error::UnknownPartition(name.to_string()))
    }
}

impl CacheStore for InMemoryCacheStore {
    fn evict(&self, partition: &str) -> Result<()> {
        let partition = self.partition(partition)?;
        partition.clear()?;
        debug!("Cache partition '{}' evicted", partition.name());
        Ok(())
    }
}
