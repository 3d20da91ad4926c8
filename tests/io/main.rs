//! File access strategy tests.

#[path = "../common/mod.rs"]
mod common;

mod corruption;
mod strategies;
mod workspace;
