//! Result sinks: where verified measurements and failures go.

use serde::Serialize;
use std::io::Write;
use sympathy_core::{Error, Phase, TrialResult};
use tracing::warn;

/// Consumer of trial records.
///
/// Records arrive only for verified trials, write before read, in run order.
pub trait ResultSink {
    /// A verified measurement.
    fn record(&mut self, result: &TrialResult);

    /// A trial that was aborted. The strategy's remaining trials are skipped.
    fn failure(&mut self, _strategy: &str, _trial: u32, _error: &Error) {}
}

/// Tab-separated human-readable lines.
///
/// ```text
/// DirectFileAccess    trial=0  write  12.345 ms  331 MB/sec
/// ```
pub struct TextReporter<W: Write> {
    out: W,
}

impl<W: Write> TextReporter<W> {
    /// Reporter writing to `out`.
    pub fn new(out: W) -> Self {
        TextReporter { out }
    }

    /// Recover the writer.
    pub fn into_inner(self) -> W {
        self.out
    }

    /// Format one record.
    pub fn format(result: &TrialResult) -> String {
        format!(
            "{}\ttrial={}\t{}\t{:.3} ms\t{:.0} MB/sec",
            result.strategy,
            result.trial,
            result.phase,
            result.elapsed.as_secs_f64() * 1000.0,
            result.megabytes_per_sec()
        )
    }
}

impl<W: Write> ResultSink for TextReporter<W> {
    fn record(&mut self, result: &TrialResult) {
        if let Err(e) = writeln!(self.out, "{}", Self::format(result)) {
            warn!(target: "sympathy::report", error = %e, "Failed to write result line");
        }
    }

    fn failure(&mut self, strategy: &str, trial: u32, error: &Error) {
        if let Err(e) = writeln!(self.out, "{}\ttrial={}\tFAILED\t{}", strategy, trial, error) {
            warn!(target: "sympathy::report", error = %e, "Failed to write failure line");
        }
    }
}

#[derive(Serialize)]
struct RecordLine<'a> {
    strategy: &'a str,
    trial: u32,
    phase: Phase,
    elapsed_ns: u128,
    bytes: u64,
    checksum: u64,
    bytes_per_sec: f64,
}

#[derive(Serialize)]
struct FailureLine<'a> {
    strategy: &'a str,
    trial: u32,
    error: String,
}

/// One JSON object per line.
pub struct JsonLinesReporter<W: Write> {
    out: W,
}

impl<W: Write> JsonLinesReporter<W> {
    /// Reporter writing to `out`.
    pub fn new(out: W) -> Self {
        JsonLinesReporter { out }
    }

    /// Recover the writer.
    pub fn into_inner(self) -> W {
        self.out
    }

    fn emit<T: Serialize>(&mut self, line: &T) {
        let written = serde_json::to_writer(&mut self.out, line)
            .map_err(std::io::Error::from)
            .and_then(|_| self.out.write_all(b"\n"));
        if let Err(e) = written {
            warn!(target: "sympathy::report", error = %e, "Failed to write JSON line");
        }
    }
}

impl<W: Write> ResultSink for JsonLinesReporter<W> {
    fn record(&mut self, result: &TrialResult) {
        self.emit(&RecordLine {
            strategy: &result.strategy,
            trial: result.trial,
            phase: result.phase,
            elapsed_ns: result.elapsed.as_nanos(),
            bytes: result.bytes,
            checksum: result.checksum.value(),
            bytes_per_sec: result.throughput(),
        });
    }

    fn failure(&mut self, strategy: &str, trial: u32, error: &Error) {
        self.emit(&FailureLine {
            strategy,
            trial,
            error: error.to_string(),
        });
    }
}

/// Keeps everything it is given.
#[derive(Debug, Default)]
pub struct Collector {
    /// Verified records, in arrival order
    pub records: Vec<TrialResult>,
    /// `(strategy, trial, error message)` for every aborted trial
    pub failures: Vec<(String, u32, String)>,
}

impl Collector {
    /// Empty collector.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records for one strategy.
    pub fn for_strategy<'a>(&'a self, strategy: &'a str) -> impl Iterator<Item = &'a TrialResult> {
        self.records.iter().filter(move |r| r.strategy == strategy)
    }
}

impl ResultSink for Collector {
    fn record(&mut self, result: &TrialResult) {
        self.records.push(result.clone());
    }

    fn failure(&mut self, strategy: &str, trial: u32, error: &Error) {
        self.failures
            .push((strategy.to_string(), trial, error.to_string()));
    }
}
