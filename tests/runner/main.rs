//! End-to-end experiment tests.

#[path = "../common/mod.rs"]
mod common;

mod containment;
mod reporting;
