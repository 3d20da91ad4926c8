//! Backing file lifecycle.
//!
//! The file is created zero-filled, one chunk at a time, before the first
//! trial and removed after the last. Strategies only ever see `&BackingFile`
//! and open their own short-lived handles through it.

use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use sympathy_core::{Error, ExperimentConfig, Result, Workload};
use tracing::{debug, info, warn};

/// Fixed-size flat file every I/O strategy writes and reads.
#[derive(Debug)]
pub struct BackingFile {
    path: PathBuf,
    len: u64,
    chunk_size: usize,
    released: bool,
}

impl BackingFile {
    /// Allocate a backing file sized by `config`.
    pub fn allocate(path: impl Into<PathBuf>, config: &ExperimentConfig) -> Result<Self> {
        Self::with_size(path, config.resource_size(), config.chunk_size())
    }

    /// Allocate a zero-filled file of `len` bytes written in `chunk_size` pieces.
    ///
    /// Any failure here is a [`Error::ResourceAllocation`]; a partially
    /// written file is removed before returning.
    pub fn with_size(path: impl Into<PathBuf>, len: u64, chunk_size: usize) -> Result<Self> {
        let path = path.into();
        if len == 0 || chunk_size == 0 || len % chunk_size as u64 != 0 {
            return Err(Error::invalid_config(format!(
                "backing file size {} must be a positive multiple of chunk size {}",
                len, chunk_size
            )));
        }

        if let Err(source) = preallocate(&path, len, chunk_size) {
            let _ = fs::remove_file(&path);
            return Err(Error::ResourceAllocation {
                resource: path.display().to_string(),
                source,
            });
        }

        info!(
            target: "sympathy::workspace",
            path = %path.display(),
            bytes = len,
            chunk = chunk_size,
            "Allocated backing file"
        );

        Ok(BackingFile {
            path,
            len,
            chunk_size,
            released: false,
        })
    }

    /// Location on disk.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Size in bytes.
    pub fn len(&self) -> u64 {
        self.len
    }

    /// Always false: zero-sized files are rejected at allocation.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Page/chunk size the file was allocated with.
    pub fn chunk_size(&self) -> usize {
        self.chunk_size
    }

    /// The byte sequence a write phase must produce for this file.
    pub fn workload(&self) -> Workload {
        Workload::sequential(self.len)
    }

    /// Open for reading.
    pub fn open_read(&self) -> io::Result<File> {
        File::open(&self.path)
    }

    /// Open for writing from offset zero without truncating.
    pub fn open_write(&self) -> io::Result<File> {
        OpenOptions::new().write(true).open(&self.path)
    }

    /// Open for reading and writing (needed for writable mappings).
    pub fn open_read_write(&self) -> io::Result<File> {
        OpenOptions::new().read(true).write(true).open(&self.path)
    }

    /// Push dirty pages to the device so one phase's writeback does not land
    /// inside the next phase's measurement. Advisory only.
    pub fn settle(&self) -> io::Result<()> {
        let file = self.open_read_write()?;
        file.sync_all()?;
        debug!(target: "sympathy::workspace", path = %self.path.display(), "Settled backing file");
        Ok(())
    }

    /// Remove the file.
    ///
    /// Returns [`Error::Cleanup`] when the file cannot be deleted; the caller
    /// decides whether that is worth more than a warning.
    pub fn release(mut self) -> Result<()> {
        self.released = true;
        fs::remove_file(&self.path).map_err(|source| Error::Cleanup {
            resource: self.path.display().to_string(),
            source,
        })?;
        info!(target: "sympathy::workspace", path = %self.path.display(), "Removed backing file");
        Ok(())
    }
}

impl Drop for BackingFile {
    fn drop(&mut self) {
        if self.released {
            return;
        }
        if let Err(e) = fs::remove_file(&self.path) {
            warn!(
                target: "sympathy::workspace",
                path = %self.path.display(),
                error = %e,
                "Failed to remove backing file"
            );
        }
    }
}

fn preallocate(path: &Path, len: u64, chunk_size: usize) -> io::Result<()> {
    let mut file = OpenOptions::new()
        .read(true)
        .write(true)
        .create(true)
        .truncate(true)
        .open(path)?;
    let blank = vec![0u8; chunk_size];
    let mut written = 0u64;
    while written < len {
        file.write_all(&blank)?;
        written += chunk_size as u64;
    }
    file.sync_all()
}
