//! Raw stream access: plain `Write`/`Read` calls on the file handle with a
//! fixed block on each side and no buffering layer in between.

use crate::strategy::{check_not_grown, check_transfer, read_some, IoStrategy};
use crate::workspace::BackingFile;
use std::io::{self, Write};
use sympathy_core::{Checksum, Workload};

/// Block-sized raw stream reads and writes.
#[derive(Debug, Clone)]
pub struct StreamFileAccess {
    write_block: usize,
    read_block: usize,
}

impl StreamFileAccess {
    /// Stream with the given write and read block sizes.
    pub fn new(write_block: usize, read_block: usize) -> Self {
        StreamFileAccess {
            write_block: write_block.max(1),
            read_block: read_block.max(1),
        }
    }
}

impl Default for StreamFileAccess {
    fn default() -> Self {
        StreamFileAccess::new(8 * 1024, 32 * 1024)
    }
}

impl IoStrategy for StreamFileAccess {
    fn name(&self) -> &str {
        "StreamFileAccess"
    }

    fn write(&self, file: &BackingFile, workload: &Workload) -> io::Result<Checksum> {
        let mut out = file.open_write()?;
        let mut block = vec![0u8; self.write_block];
        let mut sum = Checksum::ZERO;

        let mut offset = 0u64;
        while offset < workload.len() {
            let n = self.write_block.min((workload.len() - offset) as usize);
            let buf = &mut block[..n];
            workload.fill(offset, buf);
            sum.add_bytes(buf);
            out.write_all(buf)?;
            offset += n as u64;
        }

        out.flush()?;
        out.sync_data()?;
        Ok(sum)
    }

    fn read(&self, file: &BackingFile) -> io::Result<Checksum> {
        let mut input = file.open_read()?;
        check_not_grown(&input, file.len())?;
        let mut block = vec![0u8; self.read_block];
        let mut sum = Checksum::ZERO;

        let mut total = 0u64;
        while total < file.len() {
            let want = self.read_block.min((file.len() - total) as usize);
            let n = read_some(&mut input, &mut block[..want])?;
            if n == 0 {
                break;
            }
            sum.add_bytes(&block[..n]);
            total += n as u64;
        }

        check_transfer(file.len(), total)?;
        Ok(sum)
    }
}
