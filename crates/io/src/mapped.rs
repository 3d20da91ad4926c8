//! Memory-mapped access in successive windows.
//!
//! A single mapping may not cover the whole file, so the file is walked in
//! windows of at most `window` bytes. Window offsets are absolute file
//! offsets; the byte sequence and checksum do not depend on where window
//! boundaries fall. Writes go through writable mappings that are flushed
//! before being unmapped; reads use read-only mappings.

use crate::settings::MAP_ALIGNMENT;
use crate::strategy::{check_transfer, IoStrategy};
use crate::workspace::BackingFile;
use memmap2::MmapOptions;
use std::fs::File;
use std::io;
use sympathy_core::{Checksum, Workload};
use tracing::trace;

/// Windowed memory-mapped reads and writes.
#[derive(Debug, Clone)]
pub struct MappedFileAccess {
    window: u64,
}

impl MappedFileAccess {
    /// Mapped access with windows of at most `window` bytes.
    ///
    /// The window is rounded down to a multiple of 64KB (minimum 64KB) so
    /// that every window offset is a valid mapping offset.
    pub fn new(window: u64) -> Self {
        let aligned = (window / MAP_ALIGNMENT).max(1) * MAP_ALIGNMENT;
        MappedFileAccess { window: aligned }
    }

    /// Effective window size.
    pub fn window(&self) -> u64 {
        self.window
    }

    /// Successive `(offset, len)` windows covering `total` bytes.
    fn windows(&self, total: u64) -> impl Iterator<Item = (u64, usize)> {
        let window = self.window;
        (0..total)
            .step_by(window as usize)
            .map(move |offset| (offset, window.min(total - offset) as usize))
    }
}

impl Default for MappedFileAccess {
    fn default() -> Self {
        MappedFileAccess::new(1024 * 1024 * 1024)
    }
}

fn file_len(handle: &File) -> io::Result<u64> {
    Ok(handle.metadata()?.len())
}

impl IoStrategy for MappedFileAccess {
    fn name(&self) -> &str {
        "MappedFileAccess"
    }

    fn write(&self, file: &BackingFile, workload: &Workload) -> io::Result<Checksum> {
        let handle = file.open_read_write()?;
        // Touching a mapped page past EOF faults.
        let on_disk = file_len(&handle)?;
        if on_disk != workload.len() {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                format!("backing file is {} bytes, write maps {}", on_disk, workload.len()),
            ));
        }

        let mut sum = Checksum::ZERO;
        for (offset, len) in self.windows(workload.len()) {
            trace!(target: "sympathy::io", offset, len, "Mapping write window");
            // SAFETY: the file is open read-write, sized to cover the window,
            // and not mapped or truncated by anyone else while this call runs.
            let mut view = unsafe { MmapOptions::new().offset(offset).len(len).map_mut(&handle)? };

            for (k, slot) in view.iter_mut().enumerate() {
                let b = workload.value_at(offset + k as u64);
                sum.add_byte(b);
                *slot = b;
            }

            view.flush()?;
        }

        Ok(sum)
    }

    fn read(&self, file: &BackingFile) -> io::Result<Checksum> {
        let handle = file.open_read()?;
        let on_disk = file_len(&handle)?;
        check_transfer(file.len(), on_disk)?;

        let mut sum = Checksum::ZERO;
        let mut total = 0u64;
        for (offset, len) in self.windows(file.len()) {
            trace!(target: "sympathy::io", offset, len, "Mapping read window");
            // SAFETY: read-only mapping of a range verified to lie within the
            // file; nothing writes the file while this call runs.
            let view = unsafe { MmapOptions::new().offset(offset).len(len).map(&handle)? };
            sum.add_bytes(&view);
            total += view.len() as u64;
        }

        check_transfer(file.len(), total)?;
        Ok(sum)
    }
}
