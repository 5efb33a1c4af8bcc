//! Stimulus allocation logic.
//!
//! Splits the fortnight's bonus pools into per-worker amounts: the fixed
//! share uses each worker's pre-configured percentage, the variable share
//! uses percentages assigned fortnight by fortnight. Percentage sums are
//! validated into non-blocking allocation warnings; partial allocation is a
//! valid intermediate state and never prevents saving.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{PayrollError, PayrollResult};
use crate::models::PayrollLine;

use super::reference_income::StimulusPools;

/// Warning code: no reference income exists for the funding month.
pub const WARN_NO_REFERENCE_INCOME: &str = "NO_REFERENCE_INCOME";
/// Warning code: configured fixed percentages sum past 100%.
pub const WARN_FIXED_OVER_ALLOCATED: &str = "FIXED_OVER_ALLOCATED";
/// Warning code: assigned variable percentages sum past 100%.
pub const WARN_VARIABLE_OVER_ALLOCATED: &str = "VARIABLE_OVER_ALLOCATED";
/// Warning code: part of the variable pool remains unassigned.
pub const WARN_VARIABLE_UNASSIGNED: &str = "VARIABLE_UNASSIGNED";

/// A non-blocking allocation warning.
///
/// Warnings are data, not errors: they are computed on every change and
/// surfaced to the operator, but saving over- or under-allocated
/// percentages is always permitted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AllocationWarning {
    /// A code identifying the type of warning.
    pub code: String,
    /// A human-readable description of the warning.
    pub message: String,
    /// The severity level ("low", "medium", "high").
    pub severity: String,
}

/// The allocation state of a fortnight's stimulus percentages.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AllocationReport {
    /// Sum of the configured fixed percentages across all lines.
    #[serde(rename = "sumaPorcentajesFijos")]
    pub fixed_pct_total: Decimal,
    /// Sum of the assigned variable percentages across all lines.
    #[serde(rename = "sumaPorcentajesVariables")]
    pub variable_pct_total: Decimal,
    /// The warnings raised by the current allocation.
    #[serde(rename = "advertencias")]
    pub warnings: Vec<AllocationWarning>,
}

/// Recomputes a line's stimulus amounts from the fortnight pools.
///
/// `fijo.monto = baseFijoQuincena * porcentajeEstimuloFijo / 100`;
/// `variable.monto = baseVariableQuincena * porcentajeAsignado / 100`.
/// The line's derived totals are refreshed as part of the call.
pub fn apply_stimulus(line: &mut PayrollLine, pools: &StimulusPools) {
    let hundred = Decimal::from(100);
    line.stimulus.fixed.amount = pools.fixed_base * line.stimulus.fixed.percentage / hundred;
    line.stimulus.variable.amount =
        pools.variable_base * line.stimulus.variable.percentage / hundred;
    line.stimulus.total = line.stimulus.fixed.amount + line.stimulus.variable.amount;
    line.recompute_totals();
}

/// Assigns a variable stimulus percentage to one worker's line.
///
/// The percentage is validated against the per-worker cap explicitly; no
/// silent clamping happens here even though UI inputs clamp on their own.
///
/// # Errors
///
/// Returns [`PayrollError::PercentageOutOfRange`] when the value is
/// negative or exceeds `max_pct`.
pub fn assign_variable(
    line: &mut PayrollLine,
    percentage: Decimal,
    max_pct: Decimal,
    pools: &StimulusPools,
) -> PayrollResult<()> {
    if percentage < Decimal::ZERO || percentage > max_pct {
        return Err(PayrollError::PercentageOutOfRange {
            ci: line.worker_ci.clone(),
            value: percentage,
            max: max_pct,
        });
    }
    line.stimulus.variable.percentage = percentage;
    apply_stimulus(line, pools);
    Ok(())
}

/// Resets every line's variable percentage to zero.
///
/// Fixed percentages are configuration owned elsewhere and are not touched.
pub fn reset_variables(lines: &mut [PayrollLine], pools: &StimulusPools) {
    for line in lines.iter_mut() {
        line.stimulus.variable.percentage = Decimal::ZERO;
        apply_stimulus(line, pools);
    }
}

/// Computes the allocation report for the current line set.
///
/// Sums are taken over the lines' stored percentages; `has_reference_income`
/// distinguishes a genuinely empty allocation from one that merely cannot be
/// funded yet.
pub fn check_allocation(lines: &[PayrollLine], has_reference_income: bool) -> AllocationReport {
    let hundred = Decimal::from(100);
    let fixed_pct_total: Decimal = lines.iter().map(|l| l.stimulus.fixed.percentage).sum();
    let variable_pct_total: Decimal = lines.iter().map(|l| l.stimulus.variable.percentage).sum();

    let mut warnings = Vec::new();

    if !has_reference_income {
        warnings.push(AllocationWarning {
            code: WARN_NO_REFERENCE_INCOME.to_string(),
            message: "No monthly income posted for the preceding month; stimuli allocate to zero"
                .to_string(),
            severity: "medium".to_string(),
        });
    }

    if fixed_pct_total > hundred {
        warnings.push(AllocationWarning {
            code: WARN_FIXED_OVER_ALLOCATED.to_string(),
            message: format!(
                "Configured fixed percentages sum to {}%, exceeding 100%",
                fixed_pct_total
            ),
            severity: "high".to_string(),
        });
    }

    if variable_pct_total > hundred {
        warnings.push(AllocationWarning {
            code: WARN_VARIABLE_OVER_ALLOCATED.to_string(),
            message: format!(
                "Assigned variable percentages sum to {}%, exceeding 100%; raw values are kept",
                variable_pct_total
            ),
            severity: "medium".to_string(),
        });
    } else if variable_pct_total > Decimal::ZERO && variable_pct_total < hundred {
        warnings.push(AllocationWarning {
            code: WARN_VARIABLE_UNASSIGNED.to_string(),
            message: format!(
                "{}% of the variable pool remains unassigned",
                hundred - variable_pct_total
            ),
            severity: "low".to_string(),
        });
    }

    AllocationReport {
        fixed_pct_total,
        variable_pct_total,
        warnings,
    }
}
