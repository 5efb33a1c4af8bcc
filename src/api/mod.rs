//! HTTP API module for the Fortnightly Payroll Engine.
//!
//! This module provides the REST endpoints for loading a fortnight's
//! payroll, editing stimulus percentages and non-worked days, advancing the
//! lifecycle and reading the archive.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::{SaveSalariesRequest, SaveStimuliRequest};
pub use response::{ApiError, SaveSalariesResponse, SaveStimuliResponse};
pub use state::AppState;
