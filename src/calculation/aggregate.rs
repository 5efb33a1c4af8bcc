//! Period-wide aggregation.
//!
//! Pure read-side computation over the current line set. Nothing here is
//! cached: callers re-run the aggregation after every line mutation so the
//! totals always observe the latest state within the edit session.

use std::collections::BTreeMap;

use rust_decimal::Decimal;

use crate::models::{PayrollLine, PayrollTotals, RoleSummary, Worker};

/// Aggregates the line set into period-wide totals.
///
/// An empty line set yields all-zero totals, not an error.
pub fn summarize(lines: &[PayrollLine]) -> PayrollTotals {
    let mut totals = PayrollTotals::default();

    for line in lines {
        totals.days_worked += line.salary.days_worked;
        totals.days_not_worked += line.salary.non_worked_days.len() as u32;
        totals.salaries += line.salary.total;
        totals.fixed_stimuli += line.stimulus.fixed.amount;
        totals.variable_stimuli += line.stimulus.variable.amount;
        totals.allowances += line.allowance.net_amount;
        totals.salary_deductions += line.salary.non_worked_deduction;
        if let Some(adjustment) = &line.allowance.adjustment {
            totals.allowance_adjustments += adjustment.amount;
        }
        totals.net += line.net_total;
    }

    totals
}

/// Groups net payroll by worker role (cargo), sorted by role name.
///
/// Lines whose CI is missing from the roster are grouped under the literal
/// role "desconocido" so the report still accounts for every line.
pub fn summarize_by_role(lines: &[PayrollLine], workers: &[Worker]) -> Vec<RoleSummary> {
    let mut groups: BTreeMap<String, (usize, Decimal)> = BTreeMap::new();

    for line in lines {
        let role = workers
            .iter()
            .find(|w| w.ci == line.worker_ci)
            .map(|w| w.role.clone())
            .unwrap_or_else(|| "desconocido".to_string());

        let entry = groups.entry(role).or_insert((0, Decimal::ZERO));
        entry.0 += 1;
        entry.1 += line.net_total;
    }

    groups
        .into_iter()
        .map(|(role, (workers, net))| RoleSummary { role, workers, net })
        .collect()
}
