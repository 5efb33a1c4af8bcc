//! Food-allowance computation.
//!
//! The allowance covers a fixed number of days at the worker's daily
//! amount. Non-worked days drive a discount against it using the same day
//! count as the salary deduction; both are recomputed together whenever the
//! day set changes.

use rust_decimal::Decimal;

use crate::models::{AllowanceAdjustment, AllowanceBreakdown};

/// Recomputes an allowance section for a non-worked-day count.
///
/// A zero count clears the adjustment; otherwise the discount is
/// `count * montoDiario` and `montoNeto = montoBase - montoDescuento`.
pub fn adjust_for_non_worked_days(allowance: &mut AllowanceBreakdown, non_worked_count: u32) {
    if non_worked_count == 0 {
        allowance.adjustment = None;
        allowance.net_amount = allowance.base_amount;
        return;
    }

    let amount = allowance.daily_amount * Decimal::from(non_worked_count);
    allowance.adjustment = Some(AllowanceAdjustment {
        non_worked_count,
        amount,
    });
    allowance.net_amount = allowance.base_amount - amount;
}
