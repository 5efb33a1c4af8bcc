//! Orchestration layer of the Fortnightly Payroll Engine.
//!
//! This module contains the [`PayrollEngine`] service, the edit sessions
//! for the stimulus and salary phases, and the [`PayrollStore`] persistence
//! boundary the REST backend sits behind. All computation runs
//! synchronously over in-memory state; only store calls are awaited.

mod salary_session;
mod service;
mod stimulus_session;
mod store;

pub use salary_session::SalarySession;
pub use service::PayrollEngine;
pub use stimulus_session::StimulusSession;
pub use store::{InMemoryStore, PayrollStore};
