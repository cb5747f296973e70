//! Error types for code generation.
//!
//! Rendering itself never fails; only the file and target-name conveniences
//! do.

use thiserror::Error;

/// Error type for code generation operations.
#[derive(Debug, Error)]
pub enum CodegenError {
    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Target name that matches no known target.
    #[error("unknown target '{name}', expected one of: typescript, swift, rust")]
    UnknownTarget {
        /// The name as given.
        name: String,
    },
}

impl CodegenError {
    /// Creates an unknown-target error.
    pub fn unknown_target(name: impl Into<String>) -> Self {
        Self::UnknownTarget { name: name.into() }
    }
}
