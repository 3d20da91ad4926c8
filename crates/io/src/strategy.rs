//! The capability every file access strategy implements.

use crate::workspace::BackingFile;
use std::fs::File;
use std::io::{self, Read};
use sympathy_core::{Checksum, Workload};

/// One way of performing the write-then-read-back workload.
///
/// Implementations hold configuration only. Buffers and file handles are
/// created per call and released before the call returns, on success and
/// on failure alike.
pub trait IoStrategy {
    /// Display name used in reports and errors.
    fn name(&self) -> &str;

    /// Write every byte of `workload` to `file`, in order, exactly once,
    /// and return the checksum accumulated while writing. All data must be
    /// handed to the OS before returning.
    fn write(&self, file: &BackingFile, workload: &Workload) -> io::Result<Checksum>;

    /// Read the whole of `file` and return the checksum of every byte read.
    ///
    /// Reading fewer (or more) bytes than `file.len()` is an error, never a
    /// truncated checksum.
    fn read(&self, file: &BackingFile) -> io::Result<Checksum>;
}

/// `Read::read` that retries on `Interrupted`.
pub(crate) fn read_some<R: Read + ?Sized>(reader: &mut R, buf: &mut [u8]) -> io::Result<usize> {
    loop {
        match reader.read(buf) {
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            other => return other,
        }
    }
}

/// Fail if the file on disk is longer than the backing file's declared size.
pub(crate) fn check_not_grown(handle: &File, expected: u64) -> io::Result<()> {
    let actual = handle.metadata()?.len();
    if actual > expected {
        return Err(io::Error::new(
            io::ErrorKind::InvalidData,
            format!("backing file grew: expected {} bytes, found {}", expected, actual),
        ));
    }
    Ok(())
}

/// Fail unless exactly `expected` bytes were transferred.
pub(crate) fn check_transfer(expected: u64, actual: u64) -> io::Result<()> {
    if actual < expected {
        Err(io::Error::new(
            io::ErrorKind::UnexpectedEof,
            format!("short read: expected {} bytes, got {}", expected, actual),
        ))
    } else if actual > expected {
        Err(io::Error::new(
            io::ErrorKind::InvalidData,
            format!("backing file grew: expected {} bytes, got {}", expected, actual),
        ))
    } else {
        Ok(())
    }
}
