//! Server application state shared across handlers

use crate::pipeline::LensSelector;
use crate::shutdown::ShutdownState;
use std::sync::Arc;

/// Shared state for the server. Cheap to clone; the selector is read-only.
#[derive(Clone)]
pub struct ServerAppState {
    /// The lens selector pipeline, built once at startup
    pub selector: Arc<LensSelector>,

    /// Shutdown state
    pub shutdown_state: ShutdownState,
}

impl ServerAppState {
    pub fn new(selector: LensSelector, shutdown_state: ShutdownState) -> Self {
        Self {
            selector: Arc::new(selector),
            shutdown_state,
        }
    }
}
