//! V3 gallery server library.
//!
//! Exposes the building blocks (config, state, error handling, gallery
//! rendering, routes, WebSocket infrastructure) so integration tests and
//! the binary entrypoint can both access them.

pub mod backend;
pub mod config;
pub mod error;
pub mod gallery;
pub mod response;
pub mod router;
pub mod routes;
pub mod state;
pub mod ws;
