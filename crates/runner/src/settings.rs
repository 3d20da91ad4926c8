//! Experiment settings via `sympathy.toml`
//!
//! Every field has a default, so an empty file (or no file) runs the full
//! experiment at the default sizes. Command-line flags override the file.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use sympathy_core::{Error, ExperimentConfig, Result};
use sympathy_io::{registry, IoSettings};
use sympathy_memory::{MemorySettings, Stride};

/// Default settings file name.
pub const CONFIG_FILE_NAME: &str = "sympathy.toml";

fn default_trials() -> u32 {
    5
}

fn default_settle() -> bool {
    true
}

/// Contents of a settings file.
///
/// # Example
///
/// ```toml
/// trials = 5
///
/// [io]
/// file_size = 409600000
/// chunk_size = 4096
///
/// [memory]
/// strategies = ["linear", "random-heap"]
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ExperimentFile {
    /// Trials per strategy.
    #[serde(default = "default_trials")]
    pub trials: u32,
    /// Sync the backing file before each phase.
    #[serde(default = "default_settle")]
    pub settle: bool,
    /// File access experiment.
    #[serde(default)]
    pub io: IoSection,
    /// Traversal experiment.
    #[serde(default)]
    pub memory: MemorySection,
}

impl Default for ExperimentFile {
    fn default() -> Self {
        ExperimentFile {
            trials: default_trials(),
            settle: default_settle(),
            io: IoSection::default(),
            memory: MemorySection::default(),
        }
    }
}

/// `[io]` section.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct IoSection {
    /// Backing file size in bytes
    pub file_size: u64,
    /// Chunk size in bytes
    pub chunk_size: usize,
    /// Backing file location
    pub path: PathBuf,
    /// Strategies to run, in order
    pub strategies: Vec<String>,
    /// Raw stream write block in bytes
    pub stream_write_buffer: usize,
    /// Raw stream read block in bytes
    pub stream_read_buffer: usize,
    /// Largest mapped window in bytes
    pub map_window: u64,
}

impl Default for IoSection {
    fn default() -> Self {
        let io = IoSettings::default();
        IoSection {
            file_size: 409_600_000,
            chunk_size: 4096,
            path: io.path,
            strategies: registry::all_ids(),
            stream_write_buffer: io.stream_write_buffer,
            stream_read_buffer: io.stream_read_buffer,
            map_window: io.map_window,
        }
    }
}

/// `[memory]` section.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct MemorySection {
    /// Region size in bytes
    pub region_size: u64,
    /// Page size in bytes
    pub page_size: usize,
    /// Stride increment of the random walks
    pub increment: usize,
    /// Value every word is filled with
    pub fill: u64,
    /// Traversals to run, in order
    pub strategies: Vec<String>,
}

impl Default for MemorySection {
    fn default() -> Self {
        let memory = MemorySettings::default();
        MemorySection {
            region_size: 2 * 1024 * 1024 * 1024,
            page_size: 2 * 1024 * 1024,
            increment: memory.increment,
            fill: memory.fill,
            strategies: Stride::ALL.iter().map(|s| s.id().to_string()).collect(),
        }
    }
}

impl ExperimentFile {
    /// Returns the default settings file content with comments.
    pub fn default_toml() -> &'static str {
        r#"# Sympathy experiment settings
#
# Trials per strategy (default: 5)
trials = 5

# Sync the backing file before each write and read phase so one phase's
# writeback is not timed inside the next (default: true)
settle = true

[io]
# Backing file size and chunk size in bytes; size must be a multiple of chunk
file_size = 409600000
chunk_size = 4096
path = "sympathy.dat"
# Any of: direct, stream, buffered-stream, channel, mapped
strategies = ["direct", "stream", "buffered-stream", "channel", "mapped"]
stream_write_buffer = 8192
stream_read_buffer = 32768
# Largest span mapped at once, a multiple of 64KB (default: 1GB)
map_window = 1073741824

[memory]
# Region and page size in bytes; region must be a whole number of pages
region_size = 2147483648
page_size = 2097152
# Stride of the random walks; must share no factor with the word counts
increment = 514229
fill = 777
# Any of: linear, random-page, random-heap
strategies = ["linear", "random-page", "random-heap"]
"#
    }

    /// Read and parse settings from a file path.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::invalid_config(format!(
                "Failed to read settings file '{}': {}",
                path.display(),
                e
            ))
        })?;
        Self::from_toml(&content).map_err(|e| match e {
            Error::InvalidConfig(msg) => {
                Error::invalid_config(format!("{} in '{}'", msg, path.display()))
            }
            other => other,
        })
    }

    /// Parse settings from TOML text.
    pub fn from_toml(content: &str) -> Result<Self> {
        toml::from_str(content)
            .map_err(|e| Error::invalid_config(format!("Failed to parse settings: {}", e)))
    }

    /// Write the default settings file if it does not already exist.
    pub fn write_default_if_missing(path: &Path) -> Result<()> {
        if !path.exists() {
            std::fs::write(path, Self::default_toml()).map_err(|source| {
                Error::ResourceAllocation {
                    resource: path.display().to_string(),
                    source,
                }
            })?;
        }
        Ok(())
    }

    /// Validated configuration and settings for the file access experiment.
    pub fn io_config(&self) -> Result<(ExperimentConfig, IoSettings)> {
        let config = ExperimentConfig::new(
            self.io.file_size,
            self.io.chunk_size,
            self.trials,
            self.io.strategies.clone(),
        )?;
        let settings = IoSettings::new()
            .with_path(self.io.path.clone())
            .with_stream_buffers(self.io.stream_write_buffer, self.io.stream_read_buffer)
            .with_map_window(self.io.map_window);
        settings.validate()?;
        Ok((config, settings))
    }

    /// Validated configuration and settings for the traversal experiment.
    pub fn memory_config(&self) -> Result<(ExperimentConfig, MemorySettings)> {
        let config = ExperimentConfig::new(
            self.memory.region_size,
            self.memory.page_size,
            self.trials,
            self.memory.strategies.clone(),
        )?;
        let settings = MemorySettings::new()
            .with_increment(self.memory.increment)
            .with_fill(self.memory.fill);
        Ok((config, settings))
    }
}
