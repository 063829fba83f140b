//! Error types for the `burro-world` crate.
//!
//! All fallible operations in this crate return [`GraphError`] through the
//! standard [`Result`] type.

use burro_types::StarLabel;

/// Errors that can occur while loading or querying the star graph.
#[derive(Debug, thiserror::Error)]
pub enum GraphError {
    /// The input document is malformed (bad JSON, wrong field types, or
    /// values outside their valid range).
    #[error("malformed constellation data: {reason}")]
    DataFormat {
        /// Description of what is wrong with the input.
        reason: String,
    },

    /// The input document could not be read.
    #[error("failed to read constellation data: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// A label does not name any star in the current graph.
    #[error("unknown star: {0}")]
    UnknownStar(StarLabel),

    /// Block/unblock was requested for a star paired with itself.
    #[error("cannot block a star against itself: {0}")]
    SelfPair(StarLabel),
}

impl From<serde_json::Error> for GraphError {
    fn from(err: serde_json::Error) -> Self {
        Self::DataFormat {
            reason: err.to_string(),
        }
    }
}
