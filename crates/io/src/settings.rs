//! I/O family settings.

use std::path::PathBuf;
use sympathy_core::{Error, Result};

/// Mapping offsets must be multiples of this. 64KB covers the allocation
/// granularity on Windows as well as the 4KB page size elsewhere.
pub const MAP_ALIGNMENT: u64 = 64 * 1024;

/// Knobs the I/O strategies need beyond the shared experiment config.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IoSettings {
    /// Location of the backing file (default: `sympathy.dat`).
    pub path: PathBuf,

    /// Block size for raw stream writes (default: 8KB).
    pub stream_write_buffer: usize,

    /// Block size for raw stream reads (default: 32KB).
    pub stream_read_buffer: usize,

    /// Largest span mapped at once by the mapped strategy (default: 1GB).
    ///
    /// Files larger than this are walked in successive windows.
    pub map_window: u64,
}

impl Default for IoSettings {
    fn default() -> Self {
        IoSettings {
            path: PathBuf::from("sympathy.dat"),
            stream_write_buffer: 8 * 1024,
            stream_read_buffer: 32 * 1024,
            map_window: 1024 * 1024 * 1024,
        }
    }
}

impl IoSettings {
    /// Settings with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set backing file path (builder pattern).
    pub fn with_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.path = path.into();
        self
    }

    /// Set stream block sizes (builder pattern).
    pub fn with_stream_buffers(mut self, write: usize, read: usize) -> Self {
        self.stream_write_buffer = write;
        self.stream_read_buffer = read;
        self
    }

    /// Set mapped window size (builder pattern).
    pub fn with_map_window(mut self, bytes: u64) -> Self {
        self.map_window = bytes;
        self
    }

    /// Validate settings.
    pub fn validate(&self) -> Result<()> {
        if self.stream_write_buffer == 0 || self.stream_read_buffer == 0 {
            return Err(Error::invalid_config("stream buffers must be non-empty"));
        }
        if self.map_window == 0 || self.map_window % MAP_ALIGNMENT != 0 {
            return Err(Error::invalid_config(format!(
                "map window {} must be a positive multiple of {}",
                self.map_window, MAP_ALIGNMENT
            )));
        }
        Ok(())
    }
}
