//! Star graph, constellation loading, and shortest paths for the Burro
//! simulation.
//!
//! This crate is the graph store: stars as nodes, undirected weighted
//! connections as edges, constellation groupings, and a set of blocked
//! pairs that every traversal respects.
//!
//! # Modules
//!
//! - [`document`] -- Serde schema of the JSON constellation document.
//! - [`error`] -- Error types for loading and querying ([`GraphError`]).
//! - [`layout`] -- Projection of raw coordinates onto the drawing board.
//! - [`palette`] -- Deterministic constellation colours.
//! - [`pathfinding`] -- Single-source shortest paths with predecessor legs.
//! - [`star_map`] -- The graph itself ([`StarMap`]): load, neighbors,
//!   distances, positions, blocking.

pub mod document;
pub mod error;
pub mod layout;
pub mod palette;
pub mod pathfinding;
pub mod star_map;

// Re-export primary types at crate root.
pub use document::StarDocument;
pub use error::GraphError;
pub use layout::BoardLayout;
pub use pathfinding::{PathLeg, ShortestPaths};
pub use star_map::{FALLBACK_PIXEL_SCALE, StarMap};
