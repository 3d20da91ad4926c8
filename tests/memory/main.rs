//! Memory traversal tests.

#[path = "../common/mod.rs"]
mod common;

mod properties;
mod walks;
