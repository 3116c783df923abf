//! Entity change notification types.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Entity types watched by the lifecycle notifier.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum EntityType {
    Clan,
    ClanMembership,
    UserProfile,
}

impl EntityType {
    /// Type name as exposed through the API (e.g. "clanMembership").
    pub fn type_name(&self) -> &'static str {
        match self {
            EntityType::Clan => "clan",
            EntityType::ClanMembership => "clanMembership",
            EntityType::UserProfile => "player",
        }
    }
}

impl fmt::Display for EntityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.type_name())
    }
}

/// Kind of mutation that completed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChangeKind {
    Created,
    Updated,
    Deleted,
}

/// A completed mutation on a watched entity.
///
/// Created at the moment the mutation commits and handed to every registered
/// handler in turn. Notifications are never stored.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntityChangeNotification {
    entity_type: EntityType,
    entity_id: String,
    change_kind: ChangeKind,
}

impl EntityChangeNotification {
    pub fn new(
        entity_type: EntityType,
        entity_id: impl Into<String>,
        change_kind: ChangeKind,
    ) -> Self {
        Self {
            entity_type,
            entity_id: entity_id.into(),
            change_kind,
        }
    }

    /// Creates a notification for a newly persisted entity.
    pub fn created(entity_type: EntityType, entity_id: impl Into<String>) -> Self {
        Self::new(entity_type, entity_id, ChangeKind::Created)
    }

    /// Creates a notification for an updated entity.
    pub fn updated(entity_type: EntityType, entity_id: impl Into<String>) -> Self {
        Self::new(entity_type, entity_id, ChangeKind::Updated)
    }

    /// Creates a notification for a removed entity.
    pub fn deleted(entity_type: EntityType, entity_id: impl Into<String>) -> Self {
        Self::new(entity_type, entity_id, ChangeKind::Deleted)
    }

    pub fn entity_type(&self) -> EntityType {
        self.entity_type
    }

    pub fn entity_id(&self) -> &str {
        &self.entity_id
    }

    pub fn change_kind(&self) -> ChangeKind {
        self.change_kind
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constructors_set_change_kind() {
        let created = EntityChangeNotification::created(EntityType::Clan, "12");
        let updated = EntityChangeNotification::updated(EntityType::Clan, "12");
        let deleted = EntityChangeNotification::deleted(EntityType::Clan, "12");

        assert_eq!(created.change_kind(), ChangeKind::Created);
        assert_eq!(updated.change_kind(), ChangeKind::Updated);
        assert_eq!(deleted.change_kind(), ChangeKind::Deleted);
        assert_eq!(deleted.entity_id(), "12");
    }

    #[test]
    fn test_notification_serialization() {
        let event = EntityChangeNotification::created(EntityType::ClanMembership, "m-7");

        let json = serde_json::to_string(&event).unwrap();
        assert!(json.contains("\"entityType\":\"clanMembership\""));
        assert!(json.contains("\"changeKind\":\"created\""));

        let deserialized: EntityChangeNotification = serde_json::from_str(&json).unwrap();
        assert_eq!(deserialized, event);
    }

    #[test]
    fn test_type_names() {
        assert_eq!(EntityType::Clan.to_string(), "clan");
        assert_eq!(EntityType::ClanMembership.to_string(), "clanMembership");
        assert_eq!(EntityType::UserProfile.to_string(), "player");
    }
}
