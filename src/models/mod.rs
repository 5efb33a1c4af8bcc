//! Core data models for the Fortnightly Payroll Engine.
//!
//! This module contains all the domain models used throughout the engine.

mod archive;
mod income;
mod line;
mod payroll;
mod period;
mod totals;
mod worker;

pub use archive::ArchivedPayroll;
pub use income::{Currency, MonthlyIncome};
pub use line::{
    AllowanceAdjustment, AllowanceBreakdown, PayrollLine, SalaryBreakdown, StimulusBreakdown,
    StimulusShare,
};
pub use payroll::{FortnightPayroll, PayrollState};
pub use period::{Fortnight, PayrollPeriod};
pub use totals::{PayrollTotals, RoleSummary};
pub use worker::Worker;
