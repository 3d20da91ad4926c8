//! Experiment runner for Sympathy
//!
//! Drives trials strategy by strategy, one phase at a time, verifies every
//! trial with the correctness oracle and hands verified measurements to a
//! [`ResultSink`]. Failures are contained at strategy granularity; only
//! configuration and allocation failures stop an experiment.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod environment;
pub mod runner;
pub mod settings;
pub mod sink;

pub use environment::Environment;
pub use runner::{ExperimentRunner, ExperimentSummary, StrategyOutcome};
pub use settings::{ExperimentFile, IoSection, MemorySection, CONFIG_FILE_NAME};
pub use sink::{Collector, JsonLinesReporter, ResultSink, TextReporter};
