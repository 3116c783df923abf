use crate::errors::Result;

/// Trait for the cache collaborator that owns partitioned read-models.
///
/// Eviction is always whole-partition: after `evict` returns, every read on
/// that partition recomputes from the source of truth.
pub trait CacheStore: Send + Sync {
    /// Clear all entries of the named partition.
    fn evict(&self, partition: &str) -> Result<()>;
}
