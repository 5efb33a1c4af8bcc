//! Payroll line model.
//!
//! This module contains the [`PayrollLine`] type, the unit of computation:
//! one line per (payroll, worker) pair, holding the salary, stimulus and
//! food-allowance sections plus the derived per-worker totals. Wire field
//! names preserve the backend's JSON contract.

use std::collections::BTreeSet;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{PayrollPeriod, Worker};

/// The salary section of a payroll line.
///
/// The deduction for non-worked days is informative: `totalSalario` equals
/// `montoPorDiasTrabajados` because the discount is already reflected by
/// excluding those days from the worked count.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SalaryBreakdown {
    /// The number of calendar days in the fortnight.
    #[serde(rename = "diasDelPeriodo")]
    pub period_days: u32,
    /// The number of days counted as worked.
    #[serde(rename = "diasTrabajados")]
    pub days_worked: u32,
    /// The day numbers explicitly marked as not worked.
    #[serde(rename = "diasNoTrabajados")]
    pub non_worked_days: BTreeSet<u32>,
    /// The daily salary rate (`salarioFijo / diasTrabajables`).
    #[serde(rename = "salarioDiario")]
    pub daily_rate: Decimal,
    /// `salarioDiario * diasTrabajados`.
    #[serde(rename = "montoPorDiasTrabajados")]
    pub amount_for_days_worked: Decimal,
    /// `salarioDiario * |diasNoTrabajados|`.
    #[serde(rename = "descuentoDiasNoTrabajados")]
    pub non_worked_deduction: Decimal,
    /// The salary total for the fortnight.
    #[serde(rename = "totalSalario")]
    pub total: Decimal,
}

/// One share (fixed or variable) of a worker's stimulus.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StimulusShare {
    /// The percentage of the pool assigned to the worker.
    #[serde(rename = "porcentajeAsignado")]
    pub percentage: Decimal,
    /// The resulting amount (`pool * percentage / 100`).
    #[serde(rename = "monto")]
    pub amount: Decimal,
}

impl StimulusShare {
    /// A share with the given percentage and no computed amount yet.
    pub fn unassigned(percentage: Decimal) -> Self {
        Self {
            percentage,
            amount: Decimal::ZERO,
        }
    }
}

/// The stimulus section of a payroll line.
///
/// When no reference income exists for the funding month, both shares carry
/// zero amounts; percentages are kept so the allocation survives a late
/// income posting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StimulusBreakdown {
    /// The fixed share, funded from 75% of the monthly pool.
    #[serde(rename = "fijo")]
    pub fixed: StimulusShare,
    /// The variable share, funded from 25% of the monthly pool.
    #[serde(rename = "variable")]
    pub variable: StimulusShare,
    /// Sum of the fixed and variable amounts.
    #[serde(rename = "totalEstimulos")]
    pub total: Decimal,
}

/// The food-allowance discount tied to non-worked days.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AllowanceAdjustment {
    /// The non-worked-day count the discount was computed from.
    #[serde(rename = "diasNoTrabajados")]
    pub non_worked_count: u32,
    /// The discount amount (`count * montoDiario`).
    #[serde(rename = "montoDescuento")]
    pub amount: Decimal,
}

/// The food-allowance section of a payroll line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AllowanceBreakdown {
    /// The number of days the allowance covers.
    #[serde(rename = "diasCubiertos")]
    pub covered_days: u32,
    /// The daily allowance amount.
    #[serde(rename = "montoDiario")]
    pub daily_amount: Decimal,
    /// `diasCubiertos * montoDiario`, before any discount.
    #[serde(rename = "montoBase")]
    pub base_amount: Decimal,
    /// The discount implied by this fortnight's non-worked days, if any.
    #[serde(rename = "ajuste")]
    pub adjustment: Option<AllowanceAdjustment>,
    /// `montoBase` minus the adjustment.
    #[serde(rename = "montoNeto")]
    pub net_amount: Decimal,
}

/// One worker's payroll line for one fortnight.
///
/// Created in bulk when a period is opened, mutated by the stimulus and
/// salary phases while the payroll is editable, and frozen at finalization.
/// The derived totals obey `totalNeto == totalDevengado - totalDescuentos`
/// at all times; call [`PayrollLine::recompute_totals`] after mutating any
/// section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PayrollLine {
    /// Unique identifier of the line.
    pub id: Uuid,
    /// The CI of the worker this line belongs to.
    #[serde(rename = "trabajadorCI")]
    pub worker_ci: String,
    /// The salary section.
    #[serde(rename = "salario")]
    pub salary: SalaryBreakdown,
    /// The stimulus section.
    #[serde(rename = "estimulos")]
    pub stimulus: StimulusBreakdown,
    /// The food-allowance section.
    #[serde(rename = "alimentacion")]
    pub allowance: AllowanceBreakdown,
    /// Gross earnings: salary total + stimulus total + allowance base.
    #[serde(rename = "totalDevengado")]
    pub total_earned: Decimal,
    /// Total discounts: salary deduction + allowance adjustment.
    #[serde(rename = "totalDescuentos")]
    pub total_deductions: Decimal,
    /// `totalDevengado - totalDescuentos`.
    #[serde(rename = "totalNeto")]
    pub net_total: Decimal,
}

impl PayrollLine {
    /// Opens a fresh line for a worker in a period.
    ///
    /// The salary section is primed for a full fortnight (no non-worked
    /// days, no discounts), the stimulus section carries the worker's
    /// configured fixed percentage with no amounts computed yet, and the
    /// allowance covers `covered_days` at the worker's daily amount.
    pub fn open_for(worker: &Worker, period: &PayrollPeriod, covered_days: u32) -> Self {
        let period_days = period.day_count();
        let daily_rate = worker.daily_rate();
        let amount_for_days_worked = daily_rate * Decimal::from(period_days);
        let allowance_base = worker.daily_allowance * Decimal::from(covered_days);

        let mut line = Self {
            id: Uuid::new_v4(),
            worker_ci: worker.ci.clone(),
            salary: SalaryBreakdown {
                period_days,
                days_worked: period_days,
                non_worked_days: BTreeSet::new(),
                daily_rate,
                amount_for_days_worked,
                non_worked_deduction: Decimal::ZERO,
                total: amount_for_days_worked,
            },
            stimulus: StimulusBreakdown {
                fixed: StimulusShare::unassigned(worker.fixed_stimulus_pct),
                variable: StimulusShare::unassigned(Decimal::ZERO),
                total: Decimal::ZERO,
            },
            allowance: AllowanceBreakdown {
                covered_days,
                daily_amount: worker.daily_allowance,
                base_amount: allowance_base,
                adjustment: None,
                net_amount: allowance_base,
            },
            total_earned: Decimal::ZERO,
            total_deductions: Decimal::ZERO,
            net_total: Decimal::ZERO,
        };
        line.recompute_totals();
        line
    }

    /// Recomputes the derived per-worker totals from the three sections.
    ///
    /// `totalDevengado` sums the prorated salary, the stimuli and the
    /// allowance *base*; both discounts live in `totalDescuentos`, keeping
    /// the `totalNeto == totalDevengado - totalDescuentos` identity exact.
    pub fn recompute_totals(&mut self) {
        let adjustment = self
            .allowance
            .adjustment
            .as_ref()
            .map(|a| a.amount)
            .unwrap_or(Decimal::ZERO);

        self.total_earned = self.salary.total + self.stimulus.total + self.allowance.base_amount;
        self.total_deductions = self.salary.non_worked_deduction + adjustment;
        self.net_total = self.total_earned - self.total_deductions;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Fortnight;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn create_test_worker() -> Worker {
        Worker {
            ci: "89012345678".to_string(),
            name: "Juan Pérez García".to_string(),
            role: "Vendedor".to_string(),
            base_salary: dec("1500"),
            workable_days: 30,
            fixed_stimulus_pct: dec("20"),
            daily_allowance: dec("100"),
            active: true,
        }
    }

    fn q1_2025() -> PayrollPeriod {
        PayrollPeriod::new(2025, 1, Fortnight::First).unwrap()
    }

    #[test]
    fn test_open_line_primes_full_fortnight() {
        let line = PayrollLine::open_for(&create_test_worker(), &q1_2025(), 15);

        assert_eq!(line.salary.period_days, 15);
        assert_eq!(line.salary.days_worked, 15);
        assert!(line.salary.non_worked_days.is_empty());
        assert_eq!(line.salary.daily_rate, dec("50"));
        assert_eq!(line.salary.amount_for_days_worked, dec("750"));
        assert_eq!(line.salary.total, dec("750"));
        assert_eq!(line.salary.non_worked_deduction, Decimal::ZERO);
    }

    #[test]
    fn test_open_line_primes_allowance() {
        let line = PayrollLine::open_for(&create_test_worker(), &q1_2025(), 15);

        assert_eq!(line.allowance.covered_days, 15);
        assert_eq!(line.allowance.base_amount, dec("1500"));
        assert_eq!(line.allowance.net_amount, dec("1500"));
        assert!(line.allowance.adjustment.is_none());
    }

    #[test]
    fn test_open_line_carries_fixed_percentage_without_amount() {
        let line = PayrollLine::open_for(&create_test_worker(), &q1_2025(), 15);

        assert_eq!(line.stimulus.fixed.percentage, dec("20"));
        assert_eq!(line.stimulus.fixed.amount, Decimal::ZERO);
        assert_eq!(line.stimulus.variable.percentage, Decimal::ZERO);
        assert_eq!(line.stimulus.total, Decimal::ZERO);
    }

    #[test]
    fn test_totals_identity_holds_on_fresh_line() {
        let line = PayrollLine::open_for(&create_test_worker(), &q1_2025(), 15);

        assert_eq!(line.total_earned, dec("2250")); // 750 salary + 1500 allowance
        assert_eq!(line.total_deductions, Decimal::ZERO);
        assert_eq!(line.net_total, line.total_earned - line.total_deductions);
    }

    #[test]
    fn test_recompute_totals_includes_both_discounts() {
        let mut line = PayrollLine::open_for(&create_test_worker(), &q1_2025(), 15);
        line.salary.non_worked_deduction = dec("100");
        line.salary.total = dec("650");
        line.allowance.adjustment = Some(AllowanceAdjustment {
            non_worked_count: 2,
            amount: dec("200"),
        });
        line.allowance.net_amount = dec("1300");
        line.stimulus.total = dec("875");

        line.recompute_totals();

        assert_eq!(line.total_earned, dec("3025")); // 650 + 875 + 1500
        assert_eq!(line.total_deductions, dec("300"));
        assert_eq!(line.net_total, dec("2725"));
        assert_eq!(line.net_total, line.total_earned - line.total_deductions);
    }

    #[test]
    fn test_serialize_line_uses_wire_names() {
        let line = PayrollLine::open_for(&create_test_worker(), &q1_2025(), 15);
        let json = serde_json::to_string(&line).unwrap();

        assert!(json.contains("\"trabajadorCI\":\"89012345678\""));
        assert!(json.contains("\"diasDelPeriodo\":15"));
        assert!(json.contains("\"montoPorDiasTrabajados\":\"750\""));
        assert!(json.contains("\"totalEstimulos\":\"0\""));
        assert!(json.contains("\"montoNeto\":\"1500\""));
        assert!(json.contains("\"totalDevengado\":\"2250\""));
    }

    #[test]
    fn test_line_round_trips_through_json() {
        let line = PayrollLine::open_for(&create_test_worker(), &q1_2025(), 15);
        let json = serde_json::to_string(&line).unwrap();
        let deserialized: PayrollLine = serde_json::from_str(&json).unwrap();
        assert_eq!(line, deserialized);
    }
}
