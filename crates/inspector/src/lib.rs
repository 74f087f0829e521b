//! `v3-inspector` library crate.
//!
//! Re-exports internal modules for integration testing. The binary
//! entrypoint lives in `main.rs`.

pub mod inspect;
pub mod report;

pub use inspect::{inspect, InspectError, INSPECT_LIMIT};
