use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::RwLock;

use dashmap::DashMap;
use serde::{de::DeserializeOwned, Serialize};

use crate::errors::{Error, Result};

/// Counters for a single partition.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    pub evictions: u64,
    pub entries: usize,
}

/// A named, independently evictable group of cached values.
///
/// Values are stored as JSON so one partition can hold any serde type.
#[derive(Debug)]
pub struct CachePartition {
    name: String,
    entries: DashMap<String, serde_json::Value>,
    // Held for write while clearing, for read while filling, so a value computed
    // before an eviction is never stored after it.
    generation: RwLock<u64>,
    hits: AtomicU64,
    misses: AtomicU64,
    evictions: AtomicU64,
}

impl CachePartition {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            entries: DashMap::new(),
            generation: RwLock::new(0),
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
            evictions: AtomicU64::new(0),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the cached value for `key`, computing and storing it on a miss.
    pub fn get_or_compute<T, F>(&self, key: &str, compute: F) -> Result<T>
    where
        T: Serialize + DeserializeOwned,
        F: FnOnce() -> Result<T>,
    {
        let cached = self.entries.get(key).map(|entry| entry.value().clone());
        if let Some(value) = cached {
            self.hits.fetch_add(1, Ordering::Relaxed);
            return Ok(serde_json::from_value(value)?);
        }

        self.misses.fetch_add(1, Ordering::Relaxed);
        let started_at = self.current_generation()?;
        let computed = compute()?;
        let serialized = serde_json::to_value(&computed)?;

        let generation = self.generation.read().map_err(|_| self.poisoned())?;
        if *generation == started_at {
            self.entries.insert(key.to_string(), serialized);
        }
        Ok(computed)
    }

    /// Removes every entry.
    pub fn clear(&self) -> Result<()> {
        let mut generation = self.generation.write().map_err(|_| self.poisoned())?;
        self.entries.clear();
        *generation += 1;
        self.evictions.fetch_add(1, Ordering::Relaxed);
        Ok(())
    }

    pub fn stats(&self) -> CacheStats {
        CacheStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            evictions: self.evictions.load(Ordering::Relaxed),
            entries: self.entries.len(),
        }
    }

    fn current_generation(&self) -> Result<u64> {
        self.generation
            .read()
            .map(|generation| *generation)
            .map_err(|_| self.poisoned())
    }

    fn poisoned(&self) -> Error {
        Error::Cache(format!("partition '{}' lock poisoned", self.name))
    }
}
