//! Donkey state, resource rules, and death checks for the Burro simulation.
//!
//! This crate contains the logic layer for the traveller: everything that
//! operates on donkey state without touching the graph. It sits between
//! `burro-types` (which defines the star records and logs) and
//! `burro-core` (which plans routes over a star map).
//!
//! # Modules
//!
//! - [`config`] -- Configurable rates and budgets ([`DonkeyConfig`])
//! - [`death`] -- Death conditions ([`DeathCause`], [`check_death`])
//! - [`donkey`] -- The donkey itself and its transitions ([`Donkey`])
//! - [`error`] -- Construction errors ([`AgentError`])

pub mod config;
pub mod death;
pub mod donkey;
pub mod error;

// Re-export primary types at crate root for convenience.
pub use config::DonkeyConfig;
pub use death::{DeathCause, check_death};
pub use donkey::{Donkey, initial_life_budget};
pub use error::AgentError;
