//! The live job gallery.
//!
//! [`state`], [`view`] and [`render`] are pure: state in, markup out.
//! [`Gallery`] owns the current state and pushes every re-render to
//! connected browsers; [`run_listener`] feeds it from a live query.

pub mod actions;
mod controller;
mod listener;
pub mod render;
pub mod state;
pub mod view;

pub use actions::create_test_job;
pub use controller::{render_message, Gallery};
pub use listener::run_listener;
pub use state::{GalleryState, StatusFilter};
