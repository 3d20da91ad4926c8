//! Trial phases, lifecycle states and result records.

use crate::checksum::Checksum;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

/// Which half of a trial a measurement belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    /// Emitting the generated sequence into the backing file
    Write,
    /// Consuming the backing file back
    Read,
    /// One full walk over the word region
    Traverse,
}

impl Phase {
    /// Lowercase label used in logs and reports.
    pub fn as_str(self) -> &'static str {
        match self {
            Phase::Write => "write",
            Phase::Read => "read",
            Phase::Traverse => "traverse",
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Lifecycle of a single trial of a single strategy.
///
/// ```text
/// Idle -> WriteRunning -> WriteDone -> ReadRunning -> Verified -> Reported
///              |                            |
///              +---------> Failed <---------+
/// ```
///
/// Traversal trials skip the write half: `Idle -> ReadRunning -> Verified`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TrialState {
    /// Not started
    Idle,
    /// Write phase in progress
    WriteRunning,
    /// Write phase returned a checksum
    WriteDone,
    /// Read (or traversal) phase in progress
    ReadRunning,
    /// Checksums agreed
    Verified,
    /// Results handed to the sink
    Reported,
    /// An I/O fault or checksum mismatch ended the trial
    Failed,
}

impl TrialState {
    /// Whether `next` is a legal successor of `self`.
    pub fn can_transition_to(self, next: TrialState) -> bool {
        use TrialState::*;
        matches!(
            (self, next),
            (Idle, WriteRunning)
                | (Idle, ReadRunning)
                | (WriteRunning, WriteDone)
                | (WriteDone, ReadRunning)
                | (ReadRunning, Verified)
                | (Verified, Reported)
                | (WriteRunning, Failed)
                | (WriteDone, Failed)
                | (ReadRunning, Failed)
        )
    }

    /// Whether the trial has finished, successfully or not.
    pub fn is_terminal(self) -> bool {
        matches!(self, TrialState::Reported | TrialState::Failed)
    }
}

/// One measured phase of one trial.
///
/// Created once, never mutated, handed to a result sink and dropped.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrialResult {
    /// Strategy display name
    pub strategy: String,
    /// Zero-based trial index within the strategy
    pub trial: u32,
    /// Phase measured
    pub phase: Phase,
    /// Wall-clock time around the phase call
    pub elapsed: Duration,
    /// Bytes written, read or traversed
    pub bytes: u64,
    /// Checksum the phase produced
    pub checksum: Checksum,
}

impl TrialResult {
    /// Bytes per second, or zero when the elapsed time rounds to zero.
    pub fn throughput(&self) -> f64 {
        let secs = self.elapsed.as_secs_f64();
        if secs > 0.0 {
            self.bytes as f64 / secs
        } else {
            0.0
        }
    }

    /// Throughput in MB/s (10^6 bytes), the unit reports print.
    pub fn megabytes_per_sec(&self) -> f64 {
        self.throughput() / 1_000_000.0
    }
}
