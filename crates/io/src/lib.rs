//! File access strategies for Sympathy
//!
//! Every strategy writes the same deterministic byte sequence into a
//! pre-allocated backing file and reads it back, accumulating a checksum on
//! both sides. They differ only in how bytes reach the kernel:
//!
//! | Strategy | Write path | Read path |
//! |----------|-----------|-----------|
//! | `DirectFileAccess` | positional chunk writes | positional chunk reads |
//! | `StreamFileAccess` | raw `Write` calls, fixed block | raw `Read` calls, larger block |
//! | `BufferedStreamFileAccess` | byte-at-a-time through `BufWriter` | byte-at-a-time through `BufReader` |
//! | `ChannelFileAccess` | explicit cursor buffer, bulk drain | bulk fill, cursor drain |
//! | `MappedFileAccess` | writable mapped windows | read-only mapped windows |
//!
//! Strategies never own the file: they borrow a [`BackingFile`] for one call
//! and every handle or mapping they derive is dropped before they return.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod buffered;
pub mod channel;
pub mod direct;
pub mod mapped;
pub mod registry;
pub mod settings;
pub mod strategy;
pub mod stream;
pub mod workspace;

pub use buffered::BufferedStreamFileAccess;
pub use channel::ChannelFileAccess;
pub use direct::DirectFileAccess;
pub use mapped::MappedFileAccess;
pub use registry::{resolve, IoStrategyKind};
pub use settings::IoSettings;
pub use strategy::IoStrategy;
pub use stream::StreamFileAccess;
pub use workspace::BackingFile;
