//! Application state for the Fortnightly Payroll Engine API.
//!
//! This module defines the shared application state that is available
//! to all request handlers.

use std::sync::Arc;

use crate::config::PayrollConfig;
use crate::engine::{InMemoryStore, PayrollEngine};

/// Shared application state.
///
/// Contains the payroll engine shared across all request handlers.
#[derive(Clone)]
pub struct AppState {
    engine: Arc<PayrollEngine<InMemoryStore>>,
}

impl AppState {
    /// Creates application state over a fresh in-memory store.
    pub fn new(config: PayrollConfig) -> Self {
        Self::with_store(InMemoryStore::new(), config)
    }

    /// Creates application state over an existing store.
    ///
    /// Useful when the store is pre-seeded with income records or shared
    /// with another component.
    pub fn with_store(store: InMemoryStore, config: PayrollConfig) -> Self {
        Self {
            engine: Arc::new(PayrollEngine::new(store, config)),
        }
    }

    /// Returns the payroll engine.
    pub fn engine(&self) -> &PayrollEngine<InMemoryStore> {
        &self.engine
    }
}
