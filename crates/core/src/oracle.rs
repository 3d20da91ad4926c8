//! Correctness oracle.
//!
//! A mismatch means the measured throughput is meaningless, so it is an
//! error, never a warning.

use crate::checksum::Checksum;
use crate::error::{Error, Result};

/// Compare the reference checksum against the one actually observed.
pub fn verify(strategy: &str, expected: Checksum, actual: Checksum) -> Result<()> {
    if expected == actual {
        Ok(())
    } else {
        Err(Error::Integrity {
            strategy: strategy.to_string(),
            expected,
            actual,
        })
    }
}
