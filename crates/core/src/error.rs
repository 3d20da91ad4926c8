//! Error types for Sympathy experiments
//!
//! One variant per failure class. The class decides how far a failure
//! propagates: invalid configuration and allocation failures halt the whole
//! experiment, I/O and integrity failures abort only the strategy that hit
//! them, cleanup failures are logged and swallowed by the caller.

use crate::checksum::Checksum;
use crate::trial::Phase;
use std::io;
use thiserror::Error;

/// Result type alias for experiment operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for experiments
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration violates an invariant (zero size, size not a multiple
    /// of the chunk, unknown strategy, ...)
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Backing file or word region could not be created or sized
    #[error("Failed to allocate backing resource '{resource}': {source}")]
    ResourceAllocation {
        /// Path or description of the resource
        resource: String,
        /// Underlying error
        #[source]
        source: io::Error,
    },

    /// A read or write call failed mid-phase, including short transfers
    #[error("I/O failure in {strategy} during {phase}: {source}")]
    Io {
        /// Strategy that was running
        strategy: String,
        /// Phase that was running
        phase: Phase,
        /// Underlying error
        #[source]
        source: io::Error,
    },

    /// Checksum mismatch between what was produced and what came back
    #[error("Integrity failure in {strategy}: expected checksum {expected}, got {actual}")]
    Integrity {
        /// Strategy under verification
        strategy: String,
        /// Checksum of the reference phase
        expected: Checksum,
        /// Checksum actually observed
        actual: Checksum,
    },

    /// Backing resource could not be released
    #[error("Failed to release backing resource '{resource}': {source}")]
    Cleanup {
        /// Path or description of the resource
        resource: String,
        /// Underlying error
        #[source]
        source: io::Error,
    },
}

impl Error {
    /// Shorthand for [`Error::InvalidConfig`].
    pub fn invalid_config(msg: impl Into<String>) -> Self {
        Error::InvalidConfig(msg.into())
    }

    /// Whether this failure must halt the whole experiment rather than just
    /// the strategy that raised it.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            Error::InvalidConfig(_) | Error::ResourceAllocation { .. }
        )
    }
}
