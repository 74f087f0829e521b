//! Document-store and remote-procedure clients for the `jobs` collection.
//!
//! Provides the [`DocumentStore`] and [`JobProcedures`] seams, a Firestore
//! REST implementation, a Firebase callable-function client, service-account
//! credentials, a polling live-query subscription, and an in-memory store
//! for tests and offline runs.

pub mod config;
pub mod credentials;
pub mod document;
pub mod error;
pub mod firestore;
pub mod functions;
pub mod memory;
pub mod query;
pub mod store;
pub mod subscribe;

pub use document::Document;
pub use error::StoreError;
pub use query::{Direction, Query};
pub use store::{DocumentStore, JobProcedures};
pub use subscribe::{subscribe, Snapshot, SnapshotEvent};
