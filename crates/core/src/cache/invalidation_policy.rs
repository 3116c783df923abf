use std::sync::Arc;

use log::debug;

use super::{CacheRegistry, CacheStore};
use crate::errors::Result;
use crate::events::{EntityChangeHandler, EntityChangeNotification};

/// Evicts every partition derived from a changed entity type.
///
/// Created, updated and deleted notifications evict identically. Eviction is
/// whole-partition, so the cost per notification depends only on how many
/// partitions the registry declares. Store failures are returned to the
/// notifier and from there to the committing caller.
pub struct CacheInvalidationPolicy {
    registry: CacheRegistry,
    store: Arc<dyn CacheStore>,
}

impl CacheInvalidationPolicy {
    pub fn new(registry: CacheRegistry, store: Arc<dyn CacheStore>) -> Self {
        Self { registry, store }
    }

    pub fn registry(&self) -> &CacheRegistry {
        &self.registry
    }
}

impl EntityChangeHandler for CacheInvalidationPolicy {
    fn on_change(&self, notification: &EntityChangeNotification) -> Result<()> {
        for partition in self.registry.affected_partitions(notification.entity_type()) {
            self.store.evict(partition)?;
            debug!(
                "{} cache evicted, due to change on {} with id: {}",
                partition,
                notification.entity_type(),
                notification.entity_id()
            );
        }
        Ok(())
    }
}
