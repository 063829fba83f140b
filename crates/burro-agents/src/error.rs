//! Error types for the burro-agents crate.
//!
//! Running out of life or energy is not an error: it is a simulation outcome
//! reported by [`check_death`](crate::check_death). Errors here only cover
//! invalid construction parameters.

/// Errors that can occur while building a donkey.
#[derive(Debug, thiserror::Error)]
pub enum AgentError {
    /// The health tier name is not one of the five known tiers.
    #[error("unknown health tier: {0}")]
    UnknownHealthTier(String),

    /// A starting attribute is outside its valid range.
    #[error("invalid {field}: {reason}")]
    InvalidAttribute {
        /// Name of the offending attribute.
        field: &'static str,
        /// Description of the accepted range.
        reason: String,
    },
}
