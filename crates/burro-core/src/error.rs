//! Error types for the burro-core crate.
//!
//! Planning never fails because the donkey cannot go on. That is a normal
//! [`Termination`](crate::Termination). Errors only surface structural
//! problems with the inputs.

use burro_world::GraphError;

/// Errors that can occur while planning or replaying a route.
#[derive(Debug, thiserror::Error)]
pub enum PlanError {
    /// The star map rejected a query (for example an unknown start star).
    #[error("graph error: {source}")]
    Graph {
        /// The underlying graph error.
        #[from]
        source: GraphError,
    },
}
