//! Experiment runner
//!
//! Strategies run one after another, trials one after another, write before
//! read. Nothing here is concurrent: timings are only meaningful when a
//! single phase owns the machine.
//!
//! A trial's records reach the sink only after both checksums have been
//! verified. An I/O or integrity failure aborts the remaining trials of the
//! strategy that raised it and the experiment moves on to the next strategy.

use std::time::Instant;

use sympathy_core::{
    oracle, Checksum, Error, ExperimentConfig, Phase, Result, TrialResult, TrialState, Workload,
};
use sympathy_io::{BackingFile, IoSettings, IoStrategy};
use sympathy_memory::{Geometry, MemorySettings, Traversal, WordRegion};
use tracing::{debug, error, info, warn};

use crate::sink::ResultSink;

/// How one strategy fared across its trials.
#[derive(Debug)]
pub struct StrategyOutcome {
    /// Strategy display name
    pub strategy: String,
    /// Trials that passed verification and were reported
    pub verified_trials: u32,
    /// The failure that aborted the strategy, if any
    pub failure: Option<Error>,
}

impl StrategyOutcome {
    fn new(strategy: &str) -> Self {
        StrategyOutcome {
            strategy: strategy.to_string(),
            verified_trials: 0,
            failure: None,
        }
    }

    /// Whether every attempted trial verified.
    pub fn is_verified(&self) -> bool {
        self.failure.is_none()
    }
}

/// Per-strategy outcomes of one experiment, in run order.
#[derive(Debug, Default)]
pub struct ExperimentSummary {
    /// One entry per strategy that was run
    pub outcomes: Vec<StrategyOutcome>,
}

impl ExperimentSummary {
    /// True when no strategy failed.
    pub fn all_verified(&self) -> bool {
        self.outcomes.iter().all(StrategyOutcome::is_verified)
    }

    /// Strategies that were aborted.
    pub fn failed(&self) -> impl Iterator<Item = &StrategyOutcome> {
        self.outcomes.iter().filter(|o| !o.is_verified())
    }

    /// Outcome for a strategy by display name.
    pub fn outcome(&self, strategy: &str) -> Option<&StrategyOutcome> {
        self.outcomes.iter().find(|o| o.strategy == strategy)
    }
}

/// Tracks one trial through its lifecycle.
struct TrialTracker<'a> {
    strategy: &'a str,
    trial: u32,
    state: TrialState,
}

impl<'a> TrialTracker<'a> {
    fn new(strategy: &'a str, trial: u32) -> Self {
        TrialTracker {
            strategy,
            trial,
            state: TrialState::Idle,
        }
    }

    fn advance(&mut self, next: TrialState) {
        debug_assert!(
            self.state.can_transition_to(next),
            "illegal trial transition {:?} -> {:?}",
            self.state,
            next
        );
        debug!(
            target: "sympathy::runner",
            strategy = self.strategy,
            trial = self.trial,
            from = ?self.state,
            to = ?next,
            "Trial transition"
        );
        self.state = next;
    }

    /// Mark the trial failed and hand the error back.
    fn fail(&mut self, err: Error) -> Error {
        self.advance(TrialState::Failed);
        err
    }
}

/// Runs an experiment described by an [`ExperimentConfig`].
#[derive(Debug, Clone)]
pub struct ExperimentRunner {
    config: ExperimentConfig,
    settle: bool,
}

impl ExperimentRunner {
    /// Runner with settling enabled.
    pub fn new(config: ExperimentConfig) -> Self {
        ExperimentRunner {
            config,
            settle: true,
        }
    }

    /// Enable or disable the settle step before each phase (builder pattern).
    pub fn with_settle(mut self, settle: bool) -> Self {
        self.settle = settle;
        self
    }

    /// The configuration being run.
    pub fn config(&self) -> &ExperimentConfig {
        &self.config
    }

    /// Run the configured file access strategies.
    ///
    /// Allocates the backing file, runs every strategy and removes the file.
    /// Configuration and allocation errors are returned; strategy failures
    /// are recorded in the summary.
    pub fn run_io(
        &self,
        settings: &IoSettings,
        sink: &mut dyn ResultSink,
    ) -> Result<ExperimentSummary> {
        settings.validate()?;
        let strategies = sympathy_io::resolve(self.config.strategies(), settings)?;

        info!(
            target: "sympathy::runner",
            path = %settings.path.display(),
            size = self.config.resource_size(),
            chunk = self.config.chunk_size(),
            trials = self.config.trials(),
            strategies = strategies.len(),
            "Starting file access experiment"
        );

        let file = BackingFile::allocate(&settings.path, &self.config)?;
        let summary = self.run_io_strategies(&file, &strategies, sink);

        if let Err(e) = file.release() {
            warn!(target: "sympathy::runner", error = %e, "Cleanup failed");
        }
        Ok(summary)
    }

    /// Run `strategies` against an already allocated backing file.
    pub fn run_io_strategies(
        &self,
        file: &BackingFile,
        strategies: &[Box<dyn IoStrategy>],
        sink: &mut dyn ResultSink,
    ) -> ExperimentSummary {
        let workload = file.workload();
        let expected = workload.expected_checksum();
        let mut summary = ExperimentSummary::default();

        for strategy in strategies {
            let mut outcome = StrategyOutcome::new(strategy.name());
            for trial in 0..self.config.trials() {
                match self.io_trial(strategy.as_ref(), trial, file, &workload, expected, sink) {
                    Ok(()) => outcome.verified_trials += 1,
                    Err(e) => {
                        abort(strategy.name(), trial, &e, sink);
                        outcome.failure = Some(e);
                        break;
                    }
                }
            }
            summary.outcomes.push(outcome);
        }
        summary
    }

    fn io_trial(
        &self,
        strategy: &dyn IoStrategy,
        trial: u32,
        file: &BackingFile,
        workload: &Workload,
        expected: Checksum,
        sink: &mut dyn ResultSink,
    ) -> Result<()> {
        let name = strategy.name();
        let mut tracker = TrialTracker::new(name, trial);
        let io_error = |phase, source| Error::Io {
            strategy: name.to_string(),
            phase,
            source,
        };

        self.settle(file);
        tracker.advance(TrialState::WriteRunning);
        let start = Instant::now();
        let written = strategy.write(file, workload);
        let write_elapsed = start.elapsed();
        let written = written.map_err(|e| tracker.fail(io_error(Phase::Write, e)))?;
        oracle::verify(name, expected, written).map_err(|e| tracker.fail(e))?;
        tracker.advance(TrialState::WriteDone);

        self.settle(file);
        tracker.advance(TrialState::ReadRunning);
        let start = Instant::now();
        let read = strategy.read(file);
        let read_elapsed = start.elapsed();
        let read = read.map_err(|e| tracker.fail(io_error(Phase::Read, e)))?;
        oracle::verify(name, written, read).map_err(|e| tracker.fail(e))?;
        tracker.advance(TrialState::Verified);

        let write = TrialResult {
            strategy: name.to_string(),
            trial,
            phase: Phase::Write,
            elapsed: write_elapsed,
            bytes: file.len(),
            checksum: written,
        };
        let read = TrialResult {
            phase: Phase::Read,
            elapsed: read_elapsed,
            checksum: read,
            ..write.clone()
        };
        log_verified(&write);
        log_verified(&read);
        sink.record(&write);
        sink.record(&read);
        tracker.advance(TrialState::Reported);
        Ok(())
    }

    fn settle(&self, file: &BackingFile) {
        if !self.settle {
            return;
        }
        if let Err(e) = file.settle() {
            warn!(target: "sympathy::runner", error = %e, "Settle failed, continuing");
        }
    }

    /// Run the configured traversals.
    ///
    /// The configured resource size is the region size and the chunk size
    /// is the page size, both in bytes.
    pub fn run_memory(
        &self,
        settings: &MemorySettings,
        sink: &mut dyn ResultSink,
    ) -> Result<ExperimentSummary> {
        let geometry = Geometry::from_config(&self.config, settings)?;
        let traversals = sympathy_memory::resolve(self.config.strategies(), geometry)?;

        info!(
            target: "sympathy::runner",
            words = geometry.array_words(),
            page_words = geometry.page_words(),
            increment = geometry.increment(),
            trials = self.config.trials(),
            strategies = traversals.len(),
            "Starting traversal experiment"
        );

        let region = WordRegion::allocate(geometry.array_words(), settings.fill)?;
        self.run_traversals(&region, &traversals, sink)
    }

    /// Run `traversals` over an already allocated region.
    ///
    /// A fatal error (a traversal built for a different region) halts the
    /// experiment and is returned; other failures end only their traversal.
    pub fn run_traversals(
        &self,
        region: &WordRegion,
        traversals: &[Box<dyn Traversal>],
        sink: &mut dyn ResultSink,
    ) -> Result<ExperimentSummary> {
        let expected = region.expected_checksum();
        let mut summary = ExperimentSummary::default();

        for traversal in traversals {
            let mut outcome = StrategyOutcome::new(traversal.name());
            for trial in 0..self.config.trials() {
                match traversal_trial(traversal.as_ref(), trial, region, expected, sink) {
                    Ok(()) => outcome.verified_trials += 1,
                    Err(e) if e.is_fatal() => {
                        error!(
                            target: "sympathy::runner",
                            strategy = traversal.name(),
                            trial,
                            error = %e,
                            "Fatal error, halting experiment"
                        );
                        sink.failure(traversal.name(), trial, &e);
                        return Err(e);
                    }
                    Err(e) => {
                        abort(traversal.name(), trial, &e, sink);
                        outcome.failure = Some(e);
                        break;
                    }
                }
            }
            summary.outcomes.push(outcome);
        }
        Ok(summary)
    }
}

fn traversal_trial(
    traversal: &dyn Traversal,
    trial: u32,
    region: &WordRegion,
    expected: Checksum,
    sink: &mut dyn ResultSink,
) -> Result<()> {
    let name = traversal.name();
    let mut tracker = TrialTracker::new(name, trial);

    tracker.advance(TrialState::ReadRunning);
    let start = Instant::now();
    let sum = traversal.traverse(region);
    let elapsed = start.elapsed();
    let sum = sum.map_err(|e| tracker.fail(e))?;
    oracle::verify(name, expected, sum).map_err(|e| tracker.fail(e))?;
    tracker.advance(TrialState::Verified);

    let result = TrialResult {
        strategy: name.to_string(),
        trial,
        phase: Phase::Traverse,
        elapsed,
        bytes: traversal.bytes(),
        checksum: sum,
    };
    log_verified(&result);
    sink.record(&result);
    tracker.advance(TrialState::Reported);
    Ok(())
}

fn log_verified(result: &TrialResult) {
    info!(
        target: "sympathy::runner",
        strategy = %result.strategy,
        trial = result.trial,
        phase = %result.phase,
        elapsed_ms = result.elapsed.as_secs_f64() * 1000.0,
        mb_per_sec = result.megabytes_per_sec(),
        "Trial verified"
    );
}

fn abort(strategy: &str, trial: u32, err: &Error, sink: &mut dyn ResultSink) {
    match err {
        Error::Integrity { expected, actual, .. } => error!(
            target: "sympathy::runner",
            strategy,
            trial,
            expected = expected.value(),
            actual = actual.value(),
            "Checksum mismatch, skipping remaining trials"
        ),
        other => error!(
            target: "sympathy::runner",
            strategy,
            trial,
            error = %other,
            "Trial failed, skipping remaining trials"
        ),
    }
    sink.failure(strategy, trial, err);
}
