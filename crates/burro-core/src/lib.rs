//! Route planning, replay, and reporting for the Burro simulation.
//!
//! This crate runs the two planners over a [`StarMap`](burro_world::StarMap)
//! with a cloned [`Donkey`](burro_agents::Donkey), and produces everything a
//! presentation layer consumes: the route, the committed transitions, a
//! tick-driven replay, and a per-star report.
//!
//! # Modules
//!
//! - [`config`] -- YAML simulation configuration ([`SimulationConfig`])
//! - [`economical`] -- Score-driven walk over shortest paths
//! - [`endurance`] -- Greedy walk maximising distinct stars visited
//! - [`error`] -- Planning errors ([`PlanError`])
//! - [`plan`] -- Plan records ([`RoutePlan`], [`Transition`], [`Termination`])
//! - [`planner`] -- Planning entry point ([`RoutePlanner`])
//! - [`replay`] -- Step-wise re-simulation ([`RouteReplay`])
//! - [`report`] -- Per-star visit report ([`VisitReport`])

pub mod config;
pub mod economical;
pub mod endurance;
pub mod error;
pub mod plan;
pub mod planner;
pub mod replay;
pub mod report;

// Re-export primary types at crate root for convenience.
pub use config::{ConfigError, SimulationConfig};
pub use endurance::EnduranceReachability;
pub use error::PlanError;
pub use plan::{Algorithm, RoutePlan, Termination, Transition};
pub use planner::RoutePlanner;
pub use replay::{ReplayEvent, RouteReplay};
pub use report::{VisitReport, render_report};
