//! Tracked entities as delivered by the driver on every tick.
//!
//! The driver owns these records; the engine only reads them. Optional
//! fields are defaulted at deserialization time so detectors never have
//! to deal with missing data.

use serde::{Deserialize, Deserializer, Serialize};
use ts_rs::TS;

use crate::error::EntityError;
use crate::geometry::Vec3;

/// The physical nature of a tracked entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[ts(export, export_to = "bindings/")]
pub enum EntityKind {
    /// A single individual.
    Person,
    /// An inanimate object (ball, equipment).
    Object,
    /// A crowd block standing in for several individuals.
    Group,
}

/// The role an entity plays at the venue.
///
/// Determines speed ceilings and restricted-zone exemptions. Absent roles
/// default to [`Role::Spectator`], the lowest-privilege role.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[ts(export, export_to = "bindings/")]
pub enum Role {
    /// An active participant in play.
    Player,
    /// A referee or other match official.
    Official,
    /// A member of the public.
    #[default]
    Spectator,
    /// A combat-sport participant.
    Fighter,
}

impl Role {
    /// Wire name of the role, as used in event text.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Player => "PLAYER",
            Self::Official => "OFFICIAL",
            Self::Spectator => "SPECTATOR",
            Self::Fighter => "FIGHTER",
        }
    }
}

impl core::fmt::Display for Role {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One entity in a tick snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "bindings/")]
pub struct Entity {
    /// Identifier, stable across ticks.
    pub id: String,
    /// Physical nature of the entity.
    #[serde(alias = "type")]
    pub kind: EntityKind,
    /// Venue role; defaults to spectator when absent or null.
    #[serde(default, deserialize_with = "null_as_default")]
    pub role: Role,
    /// Team label. Carried for consumers, ignored by detection.
    #[serde(default)]
    pub team: Option<String>,
    /// Position in venue-local meters.
    pub position: Vec3,
    /// Velocity in meters/second; zero when absent or null.
    #[serde(default, deserialize_with = "null_as_default")]
    pub velocity: Vec3,
    /// Number of individuals represented (groups only; 1 otherwise).
    #[serde(default = "default_count")]
    pub count: u32,
}

impl Entity {
    /// Create a single-individual entity at rest.
    pub fn new(id: impl Into<String>, kind: EntityKind, role: Role, position: Vec3) -> Self {
        Self {
            id: id.into(),
            kind,
            role,
            team: None,
            position,
            velocity: Vec3::ZERO,
            count: 1,
        }
    }

    /// Builder-style velocity override.
    #[must_use]
    pub const fn with_velocity(mut self, velocity: Vec3) -> Self {
        self.velocity = velocity;
        self
    }

    /// Whether this entity is an individual person.
    pub fn is_person(&self) -> bool {
        self.kind == EntityKind::Person
    }

    /// Check that the record is usable by the detectors.
    ///
    /// # Errors
    ///
    /// Returns [`EntityError`] describing the first problem found.
    pub fn validate(&self) -> Result<(), EntityError> {
        if self.id.is_empty() {
            return Err(EntityError::EmptyId);
        }
        if !self.position.is_finite() {
            return Err(EntityError::NonFinitePosition {
                id: self.id.clone(),
            });
        }
        if !self.velocity.is_finite() {
            return Err(EntityError::NonFiniteVelocity {
                id: self.id.clone(),
            });
        }
        if self.count == 0 {
            return Err(EntityError::ZeroCount {
                id: self.id.clone(),
            });
        }
        Ok(())
    }
}

const fn default_count() -> u32 {
    1
}

/// Treat an explicit `null` like a missing field.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn missing_optional_fields_default() {
        let json = r#"{"id":"fan-1","type":"PERSON","position":{"x":1.0,"y":2.0,"z":0.0}}"#;
        let entity: Entity = serde_json::from_str(json).unwrap();
        assert_eq!(entity.kind, EntityKind::Person);
        assert_eq!(entity.role, Role::Spectator);
        assert_eq!(entity.velocity, Vec3::ZERO);
        assert_eq!(entity.count, 1);
        assert!(entity.team.is_none());
    }

    #[test]
    fn null_role_and_velocity_default() {
        let json = r#"{"id":"usher","type":"PERSON","role":null,"velocity":null,
            "position":{"x":3.0,"y":4.0}}"#;
        let entity: Entity = serde_json::from_str(json).unwrap();
        assert_eq!(entity.role, Role::Spectator);
        assert_eq!(entity.velocity, Vec3::ZERO);
    }

    #[test]
    fn unknown_role_is_rejected() {
        let json = r#"{"id":"c","type":"PERSON","role":"COACH","position":{"x":0.0,"y":0.0}}"#;
        assert!(serde_json::from_str::<Entity>(json).is_err());
    }

    #[test]
    fn group_entity_keeps_count() {
        let json = r#"{"id":"crowd-3","kind":"GROUP","role":"SPECTATOR","count":40,
            "position":{"x":0.0,"y":0.0}}"#;
        let entity: Entity = serde_json::from_str(json).unwrap();
        assert_eq!(entity.kind, EntityKind::Group);
        assert_eq!(entity.count, 40);
    }

    #[test]
    fn validate_rejects_nan_position() {
        let entity = Entity::new(
            "p1",
            EntityKind::Person,
            Role::Player,
            Vec3::new(f64::NAN, 0.0, 0.0),
        );
        assert_eq!(
            entity.validate(),
            Err(EntityError::NonFinitePosition { id: "p1".to_owned() })
        );
    }

    #[test]
    fn validate_rejects_infinite_velocity() {
        let entity = Entity::new("p2", EntityKind::Person, Role::Player, Vec3::ZERO)
            .with_velocity(Vec3::new(f64::INFINITY, 0.0, 0.0));
        assert!(matches!(
            entity.validate(),
            Err(EntityError::NonFiniteVelocity { .. })
        ));
    }

    #[test]
    fn validate_accepts_well_formed_entity() {
        let entity = Entity::new("ref", EntityKind::Person, Role::Official, Vec3::ZERO);
        assert!(entity.validate().is_ok());
    }

    #[test]
    fn role_wire_names() {
        assert_eq!(Role::Fighter.to_string(), "FIGHTER");
        let json = serde_json::to_string(&Role::Official).unwrap();
        assert_eq!(json, "\"OFFICIAL\"");
    }
}
