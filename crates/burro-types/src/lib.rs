//! Shared type definitions for the Burro simulation.
//!
//! This crate is the single source of truth for the records passed between
//! the star graph, the donkey model, and the route planners.
//!
//! # Modules
//!
//! - [`ids`] -- Star labels and document-local star identifiers
//! - [`enums`] -- The ordered [`HealthTier`]
//! - [`structs`] -- Stars, edges, constellations, agent hints, and logs

pub mod enums;
pub mod ids;
pub mod structs;

// Re-export all public types at crate root for convenience.
pub use enums::HealthTier;
pub use ids::{StarId, StarLabel};
pub use structs::{
    Connection, Constellation, DonkeyHints, FoodLogEntry, Position, ResearchLogEntry, Rgb, Star,
    StarEffects, StarPair,
};
