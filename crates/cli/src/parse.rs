//! Turn parsed arguments into experiment settings.
//!
//! The settings file is loaded first, then every flag that was given
//! overrides the matching field.

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::ArgMatches;
use sympathy_runner::{ExperimentFile, CONFIG_FILE_NAME};

/// Parse a byte size: a plain number or one with a `K`, `M` or `G` suffix
/// (binary multiples, optional trailing `B`, case-insensitive).
pub fn parse_size(input: &str) -> Result<u64> {
    let trimmed = input.trim();
    let upper = trimmed.to_ascii_uppercase();
    let digits = upper.strip_suffix('B').unwrap_or(&upper);
    let (number, multiplier) = match digits.chars().last() {
        Some('K') => (&digits[..digits.len() - 1], 1u64 << 10),
        Some('M') => (&digits[..digits.len() - 1], 1u64 << 20),
        Some('G') => (&digits[..digits.len() - 1], 1u64 << 30),
        _ => (digits, 1),
    };
    let value: u64 = number
        .trim()
        .replace('_', "")
        .parse()
        .with_context(|| format!("invalid size '{}'", trimmed))?;
    match value.checked_mul(multiplier) {
        Some(bytes) => Ok(bytes),
        None => bail!("size '{}' overflows", trimmed),
    }
}

/// Load the settings file named by `--config`, or `./sympathy.toml` when it
/// exists, or the defaults.
pub fn load_settings(matches: &ArgMatches) -> Result<ExperimentFile> {
    match matches.get_one::<String>("config") {
        Some(path) => Ok(ExperimentFile::from_file(Path::new(path))?),
        None => {
            let default = Path::new(CONFIG_FILE_NAME);
            if default.exists() {
                Ok(ExperimentFile::from_file(default)?)
            } else {
                Ok(ExperimentFile::default())
            }
        }
    }
}

fn strategies(sub: &ArgMatches) -> Option<Vec<String>> {
    sub.get_many::<String>("strategy")
        .map(|values| values.cloned().collect())
}

fn size_arg(sub: &ArgMatches, name: &str) -> Result<Option<u64>> {
    sub.get_one::<String>(name)
        .map(|s| parse_size(s).with_context(|| format!("--{}", name)))
        .transpose()
}

fn usize_size_arg(sub: &ArgMatches, name: &str) -> Result<Option<usize>> {
    size_arg(sub, name)?
        .map(|v| usize::try_from(v).with_context(|| format!("--{} is too large", name)))
        .transpose()
}

/// Apply `sympathy io` flags on top of `file`.
pub fn apply_io_overrides(file: &mut ExperimentFile, sub: &ArgMatches) -> Result<()> {
    if let Some(trials) = sub.get_one::<u32>("trials") {
        file.trials = *trials;
    }
    if let Some(size) = size_arg(sub, "size")? {
        file.io.file_size = size;
    }
    if let Some(chunk) = usize_size_arg(sub, "chunk")? {
        file.io.chunk_size = chunk;
    }
    if let Some(list) = strategies(sub) {
        file.io.strategies = list;
    }
    if let Some(path) = sub.get_one::<String>("file") {
        file.io.path = PathBuf::from(path);
    }
    if let Some(window) = size_arg(sub, "window")? {
        file.io.map_window = window;
    }
    if sub.get_flag("no-settle") {
        file.settle = false;
    }
    Ok(())
}

/// Apply `sympathy memory` flags on top of `file`.
pub fn apply_memory_overrides(file: &mut ExperimentFile, sub: &ArgMatches) -> Result<()> {
    if let Some(trials) = sub.get_one::<u32>("trials") {
        file.trials = *trials;
    }
    if let Some(size) = size_arg(sub, "size")? {
        file.memory.region_size = size;
    }
    if let Some(page) = usize_size_arg(sub, "chunk")? {
        file.memory.page_size = page;
    }
    if let Some(list) = strategies(sub) {
        file.memory.strategies = list;
    }
    if let Some(increment) = sub.get_one::<usize>("increment") {
        file.memory.increment = *increment;
    }
    Ok(())
}
