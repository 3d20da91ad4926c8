//! Experiment configuration.
//!
//! An `ExperimentConfig` is validated once on construction and never
//! mutated afterwards. Family-specific knobs (file path, stride increment,
//! ...) live next to the family that uses them.

use crate::error::{Error, Result};

/// Validated description of one experiment.
///
/// Invariants: `resource_size` is a positive multiple of `chunk_size`,
/// `trials` is positive and at least one strategy is named.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExperimentConfig {
    resource_size: u64,
    chunk_size: usize,
    trials: u32,
    strategies: Vec<String>,
}

impl ExperimentConfig {
    /// Build and validate a configuration.
    pub fn new(
        resource_size: u64,
        chunk_size: usize,
        trials: u32,
        strategies: Vec<String>,
    ) -> Result<Self> {
        if resource_size == 0 {
            return Err(Error::invalid_config("resource size must be positive"));
        }
        if chunk_size == 0 {
            return Err(Error::invalid_config("chunk size must be positive"));
        }
        if resource_size % chunk_size as u64 != 0 {
            return Err(Error::invalid_config(format!(
                "resource size {} is not a multiple of chunk size {}",
                resource_size, chunk_size
            )));
        }
        if trials == 0 {
            return Err(Error::invalid_config("trial count must be positive"));
        }
        if strategies.is_empty() {
            return Err(Error::invalid_config("at least one strategy is required"));
        }

        Ok(ExperimentConfig {
            resource_size,
            chunk_size,
            trials,
            strategies,
        })
    }

    /// Size of the backing file or word region in bytes.
    pub fn resource_size(&self) -> u64 {
        self.resource_size
    }

    /// Page/chunk size in bytes.
    pub fn chunk_size(&self) -> usize {
        self.chunk_size
    }

    /// Number of chunks that make up the resource.
    pub fn chunk_count(&self) -> u64 {
        self.resource_size / self.chunk_size as u64
    }

    /// Trials per strategy.
    pub fn trials(&self) -> u32 {
        self.trials
    }

    /// Strategy identifiers, in the order they run.
    pub fn strategies(&self) -> &[String] {
        &self.strategies
    }

    /// Configuration for testing: 64KB resource in 4KB chunks, one trial.
    pub fn for_testing(strategies: &[&str]) -> Result<Self> {
        Self::new(
            64 * 1024,
            4096,
            1,
            strategies.iter().map(|s| s.to_string()).collect(),
        )
    }
}
