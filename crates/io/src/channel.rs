//! Channel-style bulk transfer: bytes are staged one at a time in an explicit
//! in-memory buffer with a cursor, and the whole buffer moves to or from the
//! file in a single bulk call when it is full or drained.

use crate::strategy::{check_not_grown, check_transfer, read_some, IoStrategy};
use crate::workspace::BackingFile;
use std::io::{self, Write};
use sympathy_core::{Checksum, Workload};

/// Fixed-capacity staging buffer with position/limit cursors.
///
/// Filling advances `position` up to capacity; `flip` turns the filled
/// region into the readable region; `clear` resets for the next fill.
struct TransferBuffer {
    data: Box<[u8]>,
    position: usize,
    limit: usize,
}

impl TransferBuffer {
    fn new(capacity: usize) -> Self {
        TransferBuffer {
            data: vec![0u8; capacity].into_boxed_slice(),
            position: 0,
            limit: capacity,
        }
    }

    #[inline(always)]
    fn put(&mut self, b: u8) {
        self.data[self.position] = b;
        self.position += 1;
    }

    #[inline(always)]
    fn get(&mut self) -> u8 {
        let b = self.data[self.position];
        self.position += 1;
        b
    }

    #[inline(always)]
    fn has_remaining(&self) -> bool {
        self.position < self.limit
    }

    fn flip(&mut self) {
        self.limit = self.position;
        self.position = 0;
    }

    fn clear(&mut self) {
        self.position = 0;
        self.limit = self.data.len();
    }

    fn remaining(&self) -> &[u8] {
        &self.data[self.position..self.limit]
    }

    fn writable(&mut self) -> &mut [u8] {
        &mut self.data[self.position..self.limit]
    }
}

/// Cursor-buffered bulk transfer, one chunk per system call.
#[derive(Debug, Clone, Default)]
pub struct ChannelFileAccess;

impl ChannelFileAccess {
    /// Create the strategy.
    pub fn new() -> Self {
        ChannelFileAccess
    }
}

impl IoStrategy for ChannelFileAccess {
    fn name(&self) -> &str {
        "ChannelFileAccess"
    }

    fn write(&self, file: &BackingFile, workload: &Workload) -> io::Result<Checksum> {
        let mut channel = file.open_write()?;
        let mut buffer = TransferBuffer::new(file.chunk_size());
        let mut sum = Checksum::ZERO;

        for i in 0..workload.len() {
            let b = workload.value_at(i);
            sum.add_byte(b);
            buffer.put(b);

            if !buffer.has_remaining() {
                buffer.flip();
                channel.write_all(buffer.remaining())?;
                buffer.clear();
            }
        }

        // Tail when the workload is not a whole number of chunks.
        if buffer.position > 0 {
            buffer.flip();
            channel.write_all(buffer.remaining())?;
        }

        channel.sync_data()?;
        Ok(sum)
    }

    fn read(&self, file: &BackingFile) -> io::Result<Checksum> {
        let mut channel = file.open_read()?;
        check_not_grown(&channel, file.len())?;
        let mut buffer = TransferBuffer::new(file.chunk_size());
        let mut sum = Checksum::ZERO;

        let mut total = 0u64;
        while total < file.len() {
            let want = buffer.data.len().min((file.len() - total) as usize);
            buffer.limit = want;
            let n = read_some(&mut channel, buffer.writable())?;
            if n == 0 {
                break;
            }
            buffer.position = n;
            buffer.flip();

            while buffer.has_remaining() {
                sum.add_byte(buffer.get());
            }

            buffer.clear();
            total += n as u64;
        }

        check_transfer(file.len(), total)?;
        Ok(sum)
    }
}
