//! Shared type definitions for the Venue Sentinel anomaly engine.
//!
//! This crate is the single source of truth for the world model the driver
//! hands to the engine each tick and for the anomaly events the engine
//! hands back. Event types flow downstream to `TypeScript` via `ts-rs` for
//! the monitoring dashboard.
//!
//! # Modules
//!
//! - [`ids`] -- Type-safe UUID wrappers for anomalies and sessions
//! - [`geometry`] -- Venue-local points, vectors, and rectangles
//! - [`entity`] -- Tracked entities (people, objects, crowd groups)
//! - [`zone`] -- Validated venue zones
//! - [`anomaly`] -- The anomaly event record and its enumerations
//! - [`error`] -- Validation errors for zones and entities

pub mod anomaly;
pub mod entity;
pub mod error;
pub mod geometry;
pub mod ids;
pub mod zone;

// Re-export all public types at crate root for convenience.
pub use anomaly::{
    AnomalyCategory, AnomalyEvent, AnomalyMetrics, AnomalySubtype, Severity, UNKNOWN_ZONE,
};
pub use entity::{Entity, EntityKind, Role};
pub use error::{EntityError, ZoneError};
pub use geometry::{Bounds, Vec3};
pub use ids::{AnomalyId, SessionId};
pub use zone::{Zone, ZoneKind, ZoneSpec};

#[cfg(test)]
mod tests {
    //! `TypeScript` binding generation for the dashboard.

    #[test]
    fn export_bindings() {
        // ts-rs writes the files to `bindings/` relative to the crate root.
        use ts_rs::TS;

        // IDs
        let _ = crate::ids::AnomalyId::export_all();
        let _ = crate::ids::SessionId::export_all();

        // Geometry
        let _ = crate::geometry::Vec3::export_all();
        let _ = crate::geometry::Bounds::export_all();

        // Entities and zones
        let _ = crate::entity::EntityKind::export_all();
        let _ = crate::entity::Role::export_all();
        let _ = crate::entity::Entity::export_all();
        let _ = crate::zone::ZoneKind::export_all();

        // Anomalies
        let _ = crate::anomaly::AnomalyCategory::export_all();
        let _ = crate::anomaly::AnomalySubtype::export_all();
        let _ = crate::anomaly::Severity::export_all();
        let _ = crate::anomaly::AnomalyMetrics::export_all();
        let _ = crate::anomaly::AnomalyEvent::export_all();
    }
}
