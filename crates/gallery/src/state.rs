use std::sync::Arc;

use v3_store::JobProcedures;

use crate::gallery::Gallery;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc`).
#[derive(Clone)]
pub struct AppState {
    /// Live gallery state and its rendered markup.
    pub gallery: Arc<Gallery>,
    /// Remote procedures used to create jobs.
    pub procedures: Arc<dyn JobProcedures>,
}
