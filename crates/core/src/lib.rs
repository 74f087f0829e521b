//! Domain types shared by the V3 Creative Factory tools.
//!
//! Everything here is pure: no I/O, no async. The store, inspector and
//! gallery crates build on these types.

pub mod error;
pub mod job;
pub mod job_events;
pub mod test_job;
pub mod time_ago;
pub mod types;
