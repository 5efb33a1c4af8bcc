//! Period-wide totals models.
//!
//! This module contains the [`PayrollTotals`] and [`RoleSummary`] types
//! produced by the aggregator. They are pure read-side values, recomputed
//! from the line set on every mutation and never persisted as a source of
//! truth (the archive stores a denormalized copy).

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Aggregated totals across every line of a fortnight.
///
/// An empty line set yields all-zero totals.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PayrollTotals {
    /// Total days worked across all workers.
    #[serde(rename = "diasTrabajados")]
    pub days_worked: u32,
    /// Total days marked as non-worked across all workers.
    #[serde(rename = "diasNoTrabajados")]
    pub days_not_worked: u32,
    /// Sum of the salary totals.
    #[serde(rename = "totalSalarios")]
    pub salaries: Decimal,
    /// Sum of the fixed stimulus amounts.
    #[serde(rename = "totalEstimulosFijos")]
    pub fixed_stimuli: Decimal,
    /// Sum of the variable stimulus amounts.
    #[serde(rename = "totalEstimulosVariables")]
    pub variable_stimuli: Decimal,
    /// Sum of the net food allowances.
    #[serde(rename = "totalAlimentacion")]
    pub allowances: Decimal,
    /// Sum of the salary deductions for non-worked days.
    #[serde(rename = "totalDescuentosSalario")]
    pub salary_deductions: Decimal,
    /// Sum of the food-allowance adjustments.
    #[serde(rename = "totalAjustesAlimentacion")]
    pub allowance_adjustments: Decimal,
    /// Sum of the per-line net totals.
    #[serde(rename = "totalNeto")]
    pub net: Decimal,
}

/// Net payroll grouped by worker role (cargo).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoleSummary {
    /// The role the group covers.
    #[serde(rename = "cargo")]
    pub role: String,
    /// The number of workers with a line in the fortnight.
    #[serde(rename = "trabajadores")]
    pub workers: usize,
    /// The summed net total for the group.
    #[serde(rename = "totalNeto")]
    pub net: Decimal,
}
