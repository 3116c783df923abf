//! Cache module - partitions, registry, store, and invalidation policy.

mod cache_model;
mod cache_registry;
mod cache_store;
mod cache_traits;
mod invalidation_policy;

pub use cache_model::{CachePartition, CacheStats};
pub use cache_registry::{default_registry, CacheRegistry};
pub use cache_store::InMemoryCacheStore;
pub use cache_traits::CacheStore;
pub use invalidation_policy::CacheInvalidationPolicy;
