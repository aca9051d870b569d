//! Validation errors for the externally supplied world model.
//!
//! Zones are validated once at construction and reject bad geometry
//! outright. Entities are validated per tick; the engine skips a rejected
//! entity rather than failing the whole tick.

/// A zone definition that cannot be used for detection.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ZoneError {
    /// The zone name is empty.
    #[error("zone name must not be empty")]
    EmptyName,

    /// The zone area is zero, negative, or not a number.
    #[error("zone {name} has non-positive area {area}")]
    NonPositiveArea {
        /// The offending zone.
        name: String,
        /// The supplied area in square meters.
        area: f64,
    },

    /// A bound coordinate is NaN or infinite.
    #[error("zone {name} has non-finite bounds")]
    NonFiniteBounds {
        /// The offending zone.
        name: String,
    },

    /// The minimum corner lies beyond the maximum corner.
    #[error("zone {name} has inverted bounds")]
    InvertedBounds {
        /// The offending zone.
        name: String,
    },
}

/// An entity record that cannot be evaluated this tick.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EntityError {
    /// The entity identifier is empty.
    #[error("entity id must not be empty")]
    EmptyId,

    /// A position component is NaN or infinite.
    #[error("entity {id} has a non-finite position")]
    NonFinitePosition {
        /// The offending entity.
        id: String,
    },

    /// A velocity component is NaN or infinite.
    #[error("entity {id} has a non-finite velocity")]
    NonFiniteVelocity {
        /// The offending entity.
        id: String,
    },

    /// A group entity claims to represent zero individuals.
    #[error("entity {id} has a zero member count")]
    ZeroCount {
        /// The offending entity.
        id: String,
    },
}
