use std::collections::{HashMap, HashSet, VecDeque};

use crate::events::EntityType;

/// Declares which cache partitions are derived from which entity types.
///
/// Besides its own partitions, an entity type may list dependent types whose
/// read-models embed its data (clan read-models embed memberships). A change
/// on a type invalidates its partitions and those of every type that depends
/// on it, transitively.
#[derive(Debug, Clone, Default)]
pub struct CacheRegistry {
    partitions: HashMap<EntityType, Vec<String>>,
    dependents: HashMap<EntityType, Vec<EntityType>>,
}

impl CacheRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Declares a partition derived from `entity_type`.
    pub fn with_partition(
        mut self,
        entity_type: EntityType,
        partition: impl Into<String>,
    ) -> Self {
        let partition = partition.into();
        let declared = self.partitions.entry(entity_type).or_default();
        if !declared.contains(&partition) {
            declared.push(partition);
        }
        self
    }

    /// Declares that read-models of `dependent` embed data of `source`.
    pub fn with_dependent(mut self, source: EntityType, dependent: EntityType) -> Self {
        let declared = self.dependents.entry(source).or_default();
        if !declared.contains(&dependent) {
            declared.push(dependent);
        }
        self
    }

    /// Every declared partition name, deduplicated and sorted.
    pub fn all_partitions(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self
            .partitions
            .values()
            .flatten()
            .map(String::as_str)
            .collect();
        names.sort_unstable();
        names.dedup();
        names
    }

    /// Partitions to evict for a change on `entity_type`.
    ///
    /// Walks the dependency graph breadth-first from `entity_type`. Each type
    /// is visited once, so cycles terminate, and each partition appears once.
    pub fn affected_partitions(&self, entity_type: EntityType) -> Vec<&str> {
        let mut visited = HashSet::new();
        let mut queue = VecDeque::from([entity_type]);
        let mut affected: Vec<&str> = Vec::new();

        while let Some(current) = queue.pop_front() {
            if !visited.insert(current) {
                continue;
            }
            for partition in self.partitions.get(&current).into_iter().flatten() {
                if !affected.contains(&partition.as_str()) {
                    affected.push(partition.as_str());
                }
            }
            for dependent in self.dependents.get(&current).into_iter().flatten() {
                queue.push_back(*dependent);
            }
        }
        affected
    }
}

/// Default mapping of the entity-management API's cached types.
pub fn default_registry() -> CacheRegistry {
    CacheRegistry::new()
        .with_partition(EntityType::Clan, EntityType::Clan.type_name())
        .with_partition(
            EntityType::ClanMembership,
            EntityType::ClanMembership.type_name(),
        )
        .with_partition(EntityType::UserProfile, EntityType::UserProfile.type_name())
        .with_dependent(EntityType::ClanMembership, EntityType::Clan)
}
