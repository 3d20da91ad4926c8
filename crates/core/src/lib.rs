//! Core types for Sympathy experiments
//!
//! This crate defines the pieces every experiment family shares:
//! - Error: the failure taxonomy (allocation, I/O, integrity, cleanup)
//! - ExperimentConfig: the validated, immutable experiment description
//! - Checksum: wrapping running sum over every byte or word touched
//! - Workload: deterministic value sequence plus its expected checksum
//! - oracle: write/read checksum verification
//! - Phase, TrialState, TrialResult: what a trial produces

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod checksum;
pub mod config;
pub mod error;
pub mod oracle;
pub mod trial;
pub mod workload;

pub use checksum::Checksum;
pub use config::ExperimentConfig;
pub use error::{Error, Result};
pub use trial::{Phase, TrialResult, TrialState};
pub use workload::Workload;
