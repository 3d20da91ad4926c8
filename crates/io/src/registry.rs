//! Strategy identifiers and construction.
//!
//! The runner never names a concrete strategy. Configured identifiers are
//! resolved here into boxed [`IoStrategy`] values, in the order given.

use crate::buffered::BufferedStreamFileAccess;
use crate::channel::ChannelFileAccess;
use crate::direct::DirectFileAccess;
use crate::mapped::MappedFileAccess;
use crate::settings::IoSettings;
use crate::strategy::IoStrategy;
use crate::stream::StreamFileAccess;
use std::fmt;
use std::str::FromStr;
use sympathy_core::{Error, Result};

/// Built-in file access strategies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IoStrategyKind {
    /// [`DirectFileAccess`]
    Direct,
    /// [`StreamFileAccess`]
    Stream,
    /// [`BufferedStreamFileAccess`]
    BufferedStream,
    /// [`ChannelFileAccess`]
    Channel,
    /// [`MappedFileAccess`]
    Mapped,
}

impl IoStrategyKind {
    /// Every built-in strategy, in canonical run order.
    pub const ALL: [IoStrategyKind; 5] = [
        IoStrategyKind::Direct,
        IoStrategyKind::Stream,
        IoStrategyKind::BufferedStream,
        IoStrategyKind::Channel,
        IoStrategyKind::Mapped,
    ];

    /// Short identifier accepted in configuration.
    pub fn id(self) -> &'static str {
        match self {
            IoStrategyKind::Direct => "direct",
            IoStrategyKind::Stream => "stream",
            IoStrategyKind::BufferedStream => "buffered-stream",
            IoStrategyKind::Channel => "channel",
            IoStrategyKind::Mapped => "mapped",
        }
    }

    /// Display name of the strategy this kind builds.
    pub fn name(self) -> &'static str {
        match self {
            IoStrategyKind::Direct => "DirectFileAccess",
            IoStrategyKind::Stream => "StreamFileAccess",
            IoStrategyKind::BufferedStream => "BufferedStreamFileAccess",
            IoStrategyKind::Channel => "ChannelFileAccess",
            IoStrategyKind::Mapped => "MappedFileAccess",
        }
    }

    /// Construct the strategy.
    pub fn build(self, settings: &IoSettings) -> Box<dyn IoStrategy> {
        match self {
            IoStrategyKind::Direct => Box::new(DirectFileAccess::new()),
            IoStrategyKind::Stream => Box::new(StreamFileAccess::new(
                settings.stream_write_buffer,
                settings.stream_read_buffer,
            )),
            IoStrategyKind::BufferedStream => {
                Box::new(BufferedStreamFileAccess::with_capacity(settings.stream_write_buffer))
            }
            IoStrategyKind::Channel => Box::new(ChannelFileAccess::new()),
            IoStrategyKind::Mapped => Box::new(MappedFileAccess::new(settings.map_window)),
        }
    }
}

impl fmt::Display for IoStrategyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for IoStrategyKind {
    type Err = Error;

    /// Accepts the short id or the display name, ignoring case, `-` and `_`.
    fn from_str(s: &str) -> Result<Self> {
        let wanted = normalize(s);
        IoStrategyKind::ALL
            .into_iter()
            .find(|kind| normalize(kind.id()) == wanted || normalize(kind.name()) == wanted)
            .ok_or_else(|| {
                Error::invalid_config(format!(
                    "unknown I/O strategy '{}' (expected one of: {})",
                    s,
                    IoStrategyKind::ALL.map(|k| k.id()).join(", ")
                ))
            })
    }
}

fn normalize(s: &str) -> String {
    s.chars()
        .filter(|c| *c != '-' && *c != '_')
        .flat_map(char::to_lowercase)
        .collect()
}

/// Resolve configured identifiers into strategies, preserving order.
pub fn resolve(names: &[String], settings: &IoSettings) -> Result<Vec<Box<dyn IoStrategy>>> {
    names
        .iter()
        .map(|name| name.parse::<IoStrategyKind>().map(|kind| kind.build(settings)))
        .collect()
}

/// Identifiers of every built-in strategy, in canonical order.
pub fn all_ids() -> Vec<String> {
    IoStrategyKind::ALL.iter().map(|k| k.id().to_string()).collect()
}
