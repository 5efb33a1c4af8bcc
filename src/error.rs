//! Error types for the Fortnightly Payroll Engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for all error conditions that can occur while editing and finalizing a
//! fortnight's payroll.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use thiserror::Error;

use crate::models::PayrollState;

/// The main error type for the Fortnightly Payroll Engine.
///
/// All operations in the engine return this error type, making it easy
/// to handle errors consistently throughout the application. Allocation
/// warnings (over/under-assigned percentage pools) are deliberately NOT
/// errors; they are reported as data alongside successful results.
///
/// # Example
///
/// ```
/// use nomina_engine::error::PayrollError;
///
/// let error = PayrollError::ConfigNotFound {
///     path: "/missing/engine.yaml".to_string(),
/// };
/// assert_eq!(error.to_string(), "Configuration file not found: /missing/engine.yaml");
/// ```
#[derive(Debug, Error)]
pub enum PayrollError {
    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// A payroll period was built from out-of-range components.
    #[error("Invalid period: {message}")]
    InvalidPeriod {
        /// A description of what made the period invalid.
        message: String,
    },

    /// A worker CI was not found in the roster or line set.
    #[error("Worker not found: {ci}")]
    WorkerNotFound {
        /// The CI (natural key) that was not found.
        ci: String,
    },

    /// A variable stimulus percentage fell outside the allowed range.
    #[error("Variable percentage {value}% for worker {ci} is outside [0, {max}]")]
    PercentageOutOfRange {
        /// The CI of the worker the percentage was assigned to.
        ci: String,
        /// The rejected value.
        value: Decimal,
        /// The per-worker cap.
        max: Decimal,
    },

    /// A non-worked day number fell outside the fortnight's day range.
    #[error("Day {day} is outside the period range {first}-{last}")]
    DayOutOfRange {
        /// The rejected day number.
        day: u32,
        /// First day of the fortnight.
        first: u32,
        /// Last day of the fortnight.
        last: u32,
    },

    /// A non-worked day fell on a weekend, which is never selectable.
    #[error("Day {day} ({date}) falls on a weekend and cannot be marked as non-worked")]
    WeekendDay {
        /// The rejected day number.
        day: u32,
        /// The calendar date the day number resolves to.
        date: NaiveDate,
    },

    /// A mutation was attempted on a finalized or archived payroll.
    #[error("Payroll is {state} and can no longer be modified")]
    StateViolation {
        /// The lifecycle state that refused the mutation.
        state: PayrollState,
    },

    /// A lifecycle transition skipped a state or moved backwards.
    #[error("Cannot transition payroll from {from} to {to}")]
    InvalidTransition {
        /// The current state.
        from: PayrollState,
        /// The requested state.
        to: PayrollState,
    },

    /// An operation strictly required a reference income that does not exist.
    #[error("No monthly income posted for {month}/{year}")]
    MissingReferenceIncome {
        /// The month the income was looked up for.
        month: u32,
        /// The year the income was looked up for.
        year: i32,
    },

    /// A persistence call (save or finalize) failed.
    ///
    /// Always recoverable by retry; the in-memory edits that produced the
    /// call are preserved by the caller.
    #[error("Persistence failure during {operation}: {message}")]
    Persistence {
        /// The operation that was being persisted.
        operation: String,
        /// A description of the failure.
        message: String,
    },
}

/// A type alias for Results that return PayrollError.
pub type PayrollResult<T> = Result<T, PayrollError>;
