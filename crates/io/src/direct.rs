//! Unbuffered positional access: one system call per chunk at an explicit
//! offset, no user-space buffering beyond the single chunk.

use crate::strategy::{check_not_grown, check_transfer, IoStrategy};
use crate::workspace::BackingFile;
use std::fs::File;
use std::io;
use sympathy_core::{Checksum, Workload};

/// Chunk-at-a-time positional reads and writes.
#[derive(Debug, Clone, Default)]
pub struct DirectFileAccess;

impl DirectFileAccess {
    /// Create the strategy.
    pub fn new() -> Self {
        DirectFileAccess
    }
}

impl IoStrategy for DirectFileAccess {
    fn name(&self) -> &str {
        "DirectFileAccess"
    }

    fn write(&self, file: &BackingFile, workload: &Workload) -> io::Result<Checksum> {
        let handle = file.open_write()?;
        let sum = write_chunks(&handle, workload, file.chunk_size())?;
        handle.sync_data()?;
        Ok(sum)
    }

    fn read(&self, file: &BackingFile) -> io::Result<Checksum> {
        let handle = file.open_read()?;
        check_not_grown(&handle, file.len())?;
        let (sum, transferred) = read_chunks(&handle, file.len(), file.chunk_size())?;
        check_transfer(file.len(), transferred)?;
        Ok(sum)
    }
}

/// Offset-addressed transfers, one call each.
trait Positional {
    fn write_all_at(&self, buf: &[u8], offset: u64) -> io::Result<()>;
    fn read_at(&self, buf: &mut [u8], offset: u64) -> io::Result<usize>;
}

impl Positional for File {
    fn write_all_at(&self, buf: &[u8], offset: u64) -> io::Result<()> {
        positional::write_all_at(self, buf, offset)
    }

    fn read_at(&self, buf: &mut [u8], offset: u64) -> io::Result<usize> {
        positional::read_at(self, buf, offset)
    }
}

/// Write `workload` one chunk per call.
fn write_chunks<P: Positional>(
    target: &P,
    workload: &Workload,
    chunk: usize,
) -> io::Result<Checksum> {
    let mut buffer = vec![0u8; chunk];
    let mut sum = Checksum::ZERO;

    let mut offset = 0u64;
    while offset < workload.len() {
        let n = chunk.min((workload.len() - offset) as usize);
        let buf = &mut buffer[..n];
        workload.fill(offset, buf);
        sum.add_bytes(buf);
        target.write_all_at(buf, offset)?;
        offset += n as u64;
    }
    Ok(sum)
}

/// Read up to `len` bytes one chunk per call; returns the sum and the bytes
/// actually transferred.
fn read_chunks<P: Positional>(
    source: &P,
    len: u64,
    chunk: usize,
) -> io::Result<(Checksum, u64)> {
    let mut buffer = vec![0u8; chunk];
    let mut sum = Checksum::ZERO;

    let mut offset = 0u64;
    while offset < len {
        let want = buffer.len().min((len - offset) as usize);
        let n = source.read_at(&mut buffer[..want], offset)?;
        if n == 0 {
            break;
        }
        sum.add_bytes(&buffer[..n]);
        offset += n as u64;
    }
    Ok((sum, offset))
}

#[cfg(unix)]
mod positional {
    use std::fs::File;
    use std::io;
    use std::os::unix::fs::FileExt;

    pub(super) fn write_all_at(file: &File, buf: &[u8], offset: u64) -> io::Result<()> {
        file.write_all_at(buf, offset)
    }

    pub(super) fn read_at(file: &File, buf: &mut [u8], offset: u64) -> io::Result<usize> {
        loop {
            match file.read_at(buf, offset) {
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                other => return other,
            }
        }
    }
}

#[cfg(windows)]
mod positional {
    use std::fs::File;
    use std::io;
    use std::os::windows::fs::FileExt;

    pub(super) fn write_all_at(file: &File, mut buf: &[u8], mut offset: u64) -> io::Result<()> {
        while !buf.is_empty() {
            match file.seek_write(buf, offset) {
                Ok(0) => return Err(io::ErrorKind::WriteZero.into()),
                Ok(n) => {
                    buf = &buf[n..];
                    offset += n as u64;
                }
                Err(e) if e.kind() == io::ErrorKind::Interrupted => {}
                Err(e) => return Err(e),
            }
        }
        Ok(())
    }

    pub(super) fn read_at(file: &File, buf: &mut [u8], offset: u64) -> io::Result<usize> {
        match file.seek_read(buf, offset) {
            // Reading at or past EOF reports ERROR_HANDLE_EOF (38) on Windows.
            Err(e) if e.raw_os_error() == Some(38) => Ok(0),
            other => other,
        }
    }
}
