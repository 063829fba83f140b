//! Error types for the engine binary.
//!
//! [`EngineError`] is the top-level error type that wraps all possible
//! failure modes during startup and planning.

/// Top-level error for the engine binary.
///
/// Each variant wraps a specific subsystem error, providing a single
/// error type that `main` can propagate with `?`.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// Configuration loading failed.
    #[error("config error: {source}")]
    Config {
        /// The underlying config error.
        #[from]
        source: burro_core::ConfigError,
    },

    /// The constellation document could not be loaded, or a block request
    /// named an unknown star.
    #[error("graph error: {source}")]
    Graph {
        /// The underlying graph error.
        #[from]
        source: burro_world::GraphError,
    },

    /// The donkey's starting attributes are invalid.
    #[error("donkey error: {source}")]
    Agent {
        /// The underlying agent error.
        #[from]
        source: burro_agents::AgentError,
    },

    /// Planning or replay failed.
    #[error("planning error: {source}")]
    Plan {
        /// The underlying planning error.
        #[from]
        source: burro_core::PlanError,
    },

    /// No constellation document path was given.
    #[error("no constellation document: pass a path as the first argument or set BURRO_DATA")]
    MissingData,

    /// No start star was configured and the map has no stars.
    #[error("no start star: the constellation document is empty")]
    NoStartStar,
}
