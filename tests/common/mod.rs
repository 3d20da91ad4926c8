//! Shared test utilities for the integration suites.
//!
//! Import via `#[path = "../common/mod.rs"] mod common;` from a suite's main.rs.

#![allow(dead_code)]

use std::io::{self, Seek, SeekFrom, Write};
use std::path::PathBuf;

pub use sympathy::{
    BackingFile, Checksum, Collector, Error, ExperimentConfig, ExperimentRunner, IoSettings,
    IoStrategy, IoStrategyKind, Phase, Workload,
};
use tempfile::TempDir;

/// Owned strategy identifiers.
pub fn ids(names: &[&str]) -> Vec<String> {
    names.iter().map(|s| s.to_string()).collect()
}

/// Temp directory plus a backing file path inside it.
pub struct Scratch {
    pub dir: TempDir,
    pub path: PathBuf,
}

impl Scratch {
    pub fn new() -> Self {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let path = dir.path().join("backing.dat");
        Scratch { dir, path }
    }

    /// Allocate a backing file of `len` bytes in `chunk` pieces.
    pub fn backing(&self, len: u64, chunk: usize) -> BackingFile {
        BackingFile::with_size(&self.path, len, chunk).expect("Failed to allocate backing file")
    }

    /// Settings pointing at this scratch path, with a small map window.
    pub fn settings(&self) -> IoSettings {
        IoSettings::new()
            .with_path(&self.path)
            .with_map_window(64 * 1024)
    }
}

/// Every built-in strategy, built from `settings`.
pub fn all_strategies(settings: &IoSettings) -> Vec<Box<dyn IoStrategy>> {
    IoStrategyKind::ALL
        .into_iter()
        .map(|kind| kind.build(settings))
        .collect()
}

/// Overwrite one byte of the file behind `file`.
pub fn flip_byte(file: &BackingFile, offset: u64) {
    let mut handle = file.open_write().expect("open for corruption");
    handle.seek(SeekFrom::Start(offset)).unwrap();
    // f(i) = i mod 256, so (offset + 1) mod 256 always differs from what is there
    handle.write_all(&[(offset as u8).wrapping_add(1)]).unwrap();
    handle.sync_all().unwrap();
}

/// Delegates to `inner` but corrupts one byte between write and read.
pub struct CorruptBetweenPhases {
    pub inner: Box<dyn IoStrategy>,
    pub offset: u64,
}

impl IoStrategy for CorruptBetweenPhases {
    fn name(&self) -> &str {
        self.inner.name()
    }

    fn write(&self, file: &BackingFile, workload: &Workload) -> io::Result<Checksum> {
        let sum = self.inner.write(file, workload)?;
        flip_byte(file, self.offset);
        Ok(sum)
    }

    fn read(&self, file: &BackingFile) -> io::Result<Checksum> {
        self.inner.read(file)
    }
}

/// Writes nothing and honestly reports it: its read agrees with its write,
/// only the generator's expected checksum catches it.
pub struct SilentSkipper;

impl IoStrategy for SilentSkipper {
    fn name(&self) -> &str {
        "SilentSkipper"
    }

    fn write(&self, _file: &BackingFile, _workload: &Workload) -> io::Result<Checksum> {
        Ok(Checksum::ZERO)
    }

    fn read(&self, file: &BackingFile) -> io::Result<Checksum> {
        sympathy::DirectFileAccess::new().read(file)
    }
}

/// Truncates the file during write so the read comes up short.
pub struct Truncating;

impl IoStrategy for Truncating {
    fn name(&self) -> &str {
        "Truncating"
    }

    fn write(&self, file: &BackingFile, workload: &Workload) -> io::Result<Checksum> {
        let sum = sympathy::DirectFileAccess::new().write(file, workload)?;
        file.open_write()?.set_len(file.len() / 2)?;
        Ok(sum)
    }

    fn read(&self, file: &BackingFile) -> io::Result<Checksum> {
        sympathy::DirectFileAccess::new().read(file)
    }
}
