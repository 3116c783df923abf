//! Property-based integration tests for cache invalidation.
//!
//! Drives the notifier with random notifications and checks which partitions
//! the policy evicted, using the `proptest` crate for case generation.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use changefeed_core::cache::{default_registry, CacheStore};
use changefeed_core::{
    CacheInvalidationPolicy, ChangeKind, EntityChangeNotification, EntityType, LifecycleNotifier,
    Result,
};
use proptest::prelude::*;

// =============================================================================
// Helpers
// =============================================================================

/// Cache store that counts evictions per partition.
#[derive(Default)]
struct CountingStore {
    evictions: Mutex<HashMap<String, usize>>,
}

impl CountingStore {
    fn take(&self) -> HashMap<String, usize> {
        std::mem::take(&mut *self.evictions.lock().unwrap())
    }
}

impl CacheStore for CountingStore {
    fn evict(&self, partition: &str) -> Result<()> {
        *self
            .evictions
            .lock()
            .unwrap()
            .entry(partition.to_string())
            .or_insert(0) += 1;
        Ok(())
    }
}

fn arb_entity_type() -> impl Strategy<Value = EntityType> {
    prop_oneof![
        Just(EntityType::Clan),
        Just(EntityType::ClanMembership),
        Just(EntityType::UserProfile),
    ]
}

fn arb_change_kind() -> impl Strategy<Value = ChangeKind> {
    prop_oneof![
        Just(ChangeKind::Created),
        Just(ChangeKind::Updated),
        Just(ChangeKind::Deleted),
    ]
}

fn arb_notification() -> impl Strategy<Value = EntityChangeNotification> {
    (arb_entity_type(), "[0-9]{1,6}", arb_change_kind())
        .prop_map(|(entity_type, id, kind)| EntityChangeNotification::new(entity_type, id, kind))
}

fn expected_partitions(entity_type: EntityType) -> Vec<&'static str> {
    match entity_type {
        EntityType::Clan => vec!["clan"],
        EntityType::ClanMembership => vec!["clanMembership", "clan"],
        EntityType::UserProfile => vec!["player"],
    }
}

// =============================================================================
// Property Tests
// =============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Each notification evicts the partitions of its type and of every
    /// dependent type exactly once, whatever the change kind.
    #[test]
    fn prop_each_notification_evicts_affected_partitions_once(
        notifications in proptest::collection::vec(arb_notification(), 1..40)
    ) {
        let store = Arc::new(CountingStore::default());
        let notifier = LifecycleNotifier::new().with_handler(Arc::new(
            CacheInvalidationPolicy::new(default_registry(), store.clone()),
        ));

        for notification in notifications {
            let entity_type = notification.entity_type();
            notifier.notify(notification).unwrap();

            let evictions = store.take();
            let expected = expected_partitions(entity_type);
            prop_assert_eq!(evictions.len(), expected.len());
            for partition in expected {
                prop_assert_eq!(
                    evictions.get(partition).copied(),
                    Some(1),
                    "partition {} should be evicted once",
                    partition
                );
            }
        }
    }
}
