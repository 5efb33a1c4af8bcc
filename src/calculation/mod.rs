//! Calculation logic for the Fortnightly Payroll Engine.
//!
//! This module contains the pure calculation functions: reference-income
//! resolution and pool splitting, stimulus allocation with its validation
//! report, day-based salary proration, the food-allowance adjustment, and
//! period-wide aggregation. Everything here operates on the data model and
//! is invoked from an explicit recompute step after every mutation.

mod aggregate;
mod allowance;
mod reference_income;
mod salary;
mod stimulus;

pub use aggregate::{summarize, summarize_by_role};
pub use allowance::adjust_for_non_worked_days;
pub use reference_income::{StimulusPools, resolve_reference_income};
pub use salary::set_non_worked_days;
pub use stimulus::{
    AllocationReport, AllocationWarning, WARN_FIXED_OVER_ALLOCATED, WARN_NO_REFERENCE_INCOME,
    WARN_VARIABLE_OVER_ALLOCATED, WARN_VARIABLE_UNASSIGNED, apply_stimulus, assign_variable,
    check_allocation, reset_variables,
};
