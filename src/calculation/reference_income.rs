//! Reference income resolution and stimulus pool derivation.
//!
//! Stimuli for work performed in month M are funded from month M-1's posted
//! income, because income for the current month is not yet finalized when
//! payroll runs. A missing income record is not an error: the pools degrade
//! to zero and downstream allocation reports a non-blocking warning.

use rust_decimal::Decimal;

use crate::config::StimulusSplit;
use crate::models::{MonthlyIncome, PayrollPeriod};

/// The two pool sizes one fortnight's stimuli are paid from.
///
/// Derived, never stored: one monthly income funds two fortnights, so each
/// pool is the income's share divided by 2.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StimulusPools {
    /// The fortnight's fixed pool (`monto * fixed_share / 2`).
    pub fixed_base: Decimal,
    /// The fortnight's variable pool (`monto * variable_share / 2`).
    pub variable_base: Decimal,
}

impl StimulusPools {
    /// Pools of size zero, used when no reference income exists.
    pub fn zero() -> Self {
        Self {
            fixed_base: Decimal::ZERO,
            variable_base: Decimal::ZERO,
        }
    }

    /// Derives the fortnight pools from an optional reference income.
    ///
    /// `None` degrades gracefully to zero pools rather than failing the
    /// whole period.
    pub fn from_income(income: Option<&MonthlyIncome>, split: &StimulusSplit) -> Self {
        match income {
            Some(income) => {
                let two = Decimal::from(2);
                Self {
                    fixed_base: income.amount * split.fixed_share / two,
                    variable_base: income.amount * split.variable_share / two,
                }
            }
            None => Self::zero(),
        }
    }
}

/// Resolves the income record funding a fortnight's stimuli.
///
/// Selects the record whose (year, month) is the calendar month preceding
/// the period's own; returns `None` when no such record has been posted.
pub fn resolve_reference_income<'a>(
    period: &PayrollPeriod,
    incomes: &'a [MonthlyIncome],
) -> Option<&'a MonthlyIncome> {
    let (year, month) = period.preceding_month();
    incomes.iter().find(|i| i.year == year && i.month == month)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Currency, Fortnight};
    use std::str::FromStr;
    use uuid::Uuid;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn income(year: i32, month: u32, amount: &str) -> MonthlyIncome {
        MonthlyIncome {
            id: Uuid::new_v4(),
            year,
            month,
            amount: dec(amount),
            currency: Currency::USD,
        }
    }

    fn split() -> StimulusSplit {
        StimulusSplit::default()
    }

    /// A monthly income of $10,000 yields fortnight pools of
    /// $3,750 fixed and $1,250 variable.
    #[test]
    fn test_pools_from_income() {
        let income = income(2025, 1, "10000");
        let pools = StimulusPools::from_income(Some(&income), &split());

        assert_eq!(pools.fixed_base, dec("3750"));
        assert_eq!(pools.variable_base, dec("1250"));
    }

    /// No income record means both pools resolve to zero.
    #[test]
    fn test_pools_without_income_are_zero() {
        let pools = StimulusPools::from_income(None, &split());
        assert_eq!(pools.fixed_base, Decimal::ZERO);
        assert_eq!(pools.variable_base, Decimal::ZERO);
    }

    #[test]
    fn test_resolves_preceding_month() {
        let period = PayrollPeriod::new(2025, 2, Fortnight::First).unwrap();
        let incomes = vec![
            income(2025, 2, "999"),
            income(2025, 1, "10000"),
            income(2024, 12, "888"),
        ];

        let resolved = resolve_reference_income(&period, &incomes).unwrap();
        assert_eq!(resolved.month, 1);
        assert_eq!(resolved.amount, dec("10000"));
    }

    #[test]
    fn test_resolves_across_year_boundary() {
        let period = PayrollPeriod::new(2025, 1, Fortnight::Second).unwrap();
        let incomes = vec![income(2024, 12, "5000")];

        let resolved = resolve_reference_income(&period, &incomes).unwrap();
        assert_eq!(resolved.year, 2024);
        assert_eq!(resolved.month, 12);
    }

    #[test]
    fn test_missing_income_is_none_not_error() {
        let period = PayrollPeriod::new(2025, 3, Fortnight::First).unwrap();
        let incomes = vec![income(2025, 3, "7500")]; // current month only
        assert!(resolve_reference_income(&period, &incomes).is_none());
    }

    #[test]
    fn test_both_fortnights_share_the_same_pools() {
        let income = income(2025, 1, "2500000");
        let pools = StimulusPools::from_income(Some(&income), &split());

        assert_eq!(pools.fixed_base, dec("937500"));
        assert_eq!(pools.variable_base, dec("312500"));
        assert_eq!(
            pools.fixed_base + pools.variable_base,
            dec("1250000") // half of the month's income per fortnight
        );
    }
}
