//! Sympathy - mechanical sympathy experiments
//!
//! Two families of experiments that hold the work constant and vary only how
//! it reaches the hardware:
//!
//! - **File access**: five strategies write the same byte sequence into a
//!   pre-allocated backing file and read it back.
//! - **Memory traversal**: three walks visit every word of the same region,
//!   differing only in the order.
//!
//! Every trial is checked by a checksum oracle before its timing is reported.
//!
//! # Quick Start
//!
//! ```ignore
//! use sympathy::{Collector, ExperimentConfig, ExperimentRunner, IoSettings};
//!
//! let config = ExperimentConfig::new(4096 * 1024, 4096, 3, vec!["direct".into(), "mapped".into()])?;
//! let mut sink = Collector::new();
//! let summary = ExperimentRunner::new(config).run_io(&IoSettings::default(), &mut sink)?;
//! assert!(summary.all_verified());
//! ```

pub use sympathy_core::{
    oracle, Checksum, Error, ExperimentConfig, Phase, Result, TrialResult, TrialState, Workload,
};
pub use sympathy_io::{
    BackingFile, BufferedStreamFileAccess, ChannelFileAccess, DirectFileAccess, IoSettings,
    IoStrategy, IoStrategyKind, MappedFileAccess, StreamFileAccess,
};
pub use sympathy_memory::{Geometry, MemorySettings, Stride, Traversal, Walk, WordRegion};
pub use sympathy_runner::{
    Collector, Environment, ExperimentFile, ExperimentRunner, ExperimentSummary,
    JsonLinesReporter, ResultSink, StrategyOutcome, TextReporter,
};

/// Strategy registries, keyed by family.
pub mod registry {
    pub use sympathy_io::registry::{all_ids as io_ids, resolve as resolve_io};
    pub use sympathy_memory::resolve as resolve_memory;
}
