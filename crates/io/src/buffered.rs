//! User-space buffered stream: single-byte calls through `BufWriter` and
//! `BufReader`, so every byte pays the buffering layer's per-call cost.

use crate::strategy::{check_not_grown, check_transfer, IoStrategy};
use crate::workspace::BackingFile;
use std::io::{self, BufReader, BufWriter, Read, Write};
use sympathy_core::{Checksum, Workload};

/// Byte-at-a-time access through std's buffered stream adapters.
#[derive(Debug, Clone)]
pub struct BufferedStreamFileAccess {
    capacity: usize,
}

impl BufferedStreamFileAccess {
    /// Buffered stream with the given adapter capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        BufferedStreamFileAccess {
            capacity: capacity.max(1),
        }
    }
}

impl Default for BufferedStreamFileAccess {
    fn default() -> Self {
        BufferedStreamFileAccess::with_capacity(8 * 1024)
    }
}

impl IoStrategy for BufferedStreamFileAccess {
    fn name(&self) -> &str {
        "BufferedStreamFileAccess"
    }

    fn write(&self, file: &BackingFile, workload: &Workload) -> io::Result<Checksum> {
        let mut out = BufWriter::with_capacity(self.capacity, file.open_write()?);
        let mut sum = Checksum::ZERO;

        for i in 0..workload.len() {
            let b = workload.value_at(i);
            sum.add_byte(b);
            out.write_all(&[b])?;
        }

        // into_inner flushes; the error carries the flush failure.
        let handle = out.into_inner().map_err(|e| e.into_error())?;
        handle.sync_data()?;
        Ok(sum)
    }

    fn read(&self, file: &BackingFile) -> io::Result<Checksum> {
        let handle = file.open_read()?;
        check_not_grown(&handle, file.len())?;
        let input = BufReader::with_capacity(self.capacity, handle);
        let mut sum = Checksum::ZERO;

        let mut total = 0u64;
        for byte in input.take(file.len()).bytes() {
            sum.add_byte(byte?);
            total += 1;
        }

        check_transfer(file.len(), total)?;
        Ok(sum)
    }
}
