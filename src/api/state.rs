//! Application state for the HR balance engine API.
//!
//! This module defines the shared application state that is available
//! to all request handlers.

use std::sync::Arc;

use crate::ledger::HrEngine;

/// Shared application state.
///
/// Contains the engine, which owns the ledger and the loaded
/// configuration, shared across all request handlers.
#[derive(Clone)]
pub struct AppState {
    /// The engine behind every handler.
    engine: Arc<HrEngine>,
}

impl AppState {
    /// Creates a new application state around an engine.
    pub fn new(engine: HrEngine) -> Self {
        Self {
            engine: Arc::new(engine),
        }
    }

    /// Returns a reference to the engine.
    pub fn engine(&self) -> &HrEngine {
        &self.engine
    }
}
