//! Salary proration logic.
//!
//! Computes a worker's fortnight pay from the daily rate and the set of
//! non-worked days. Validation is all-or-nothing: a rejected day set leaves
//! the line untouched, so no partial state ever reaches persistence.

use std::collections::BTreeSet;

use rust_decimal::Decimal;

use crate::error::{PayrollError, PayrollResult};
use crate::models::{PayrollLine, PayrollPeriod};

use super::allowance::adjust_for_non_worked_days;

/// Replaces a line's non-worked-day set and recomputes everything that
/// depends on it.
///
/// Every day must be a weekday within the fortnight's range; weekend days
/// are not selectable and externally supplied weekend numbers are rejected
/// rather than silently accepted. On success the salary section, the
/// allowance adjustment (same day count) and the line totals are all
/// recomputed synchronously, before any persistence call can observe them.
///
/// `totalSalario` stays equal to `montoPorDiasTrabajados`: the discount is
/// already reflected by excluding those days from the worked count.
///
/// # Errors
///
/// Returns [`PayrollError::DayOutOfRange`] or [`PayrollError::WeekendDay`]
/// without mutating the line.
pub fn set_non_worked_days(
    line: &mut PayrollLine,
    period: &PayrollPeriod,
    days: &BTreeSet<u32>,
) -> PayrollResult<()> {
    for &day in days {
        if !period.contains_day(day) {
            return Err(PayrollError::DayOutOfRange {
                day,
                first: period.first_day(),
                last: period.last_day(),
            });
        }
        if period.is_weekend_day(day) {
            // date_of is Some here: the day passed the range check above.
            let date = period.date_of(day).ok_or(PayrollError::DayOutOfRange {
                day,
                first: period.first_day(),
                last: period.last_day(),
            })?;
            return Err(PayrollError::WeekendDay { day, date });
        }
    }

    let non_worked = days.len() as u32;
    line.salary.non_worked_days = days.clone();
    line.salary.days_worked = line.salary.period_days - non_worked;
    line.salary.amount_for_days_worked =
        line.salary.daily_rate * Decimal::from(line.salary.days_worked);
    line.salary.non_worked_deduction = line.salary.daily_rate * Decimal::from(non_worked);
    line.salary.total = line.salary.amount_for_days_worked;

    adjust_for_non_worked_days(&mut line.allowance, non_worked);
    line.recompute_totals();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Fortnight, Worker};
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

    fn create_test_line(period: &PayrollPeriod) -> PayrollLine {
        PayrollLine::open_for(&create_test_worker(), period, 15)
    }

    fn days(values: &[u32]) -> BTreeSet<u32> {
        values.iter().copied().collect()
    }

    /// Daily rate 50 with 2 non-worked days in a 15-day fortnight.
    #[test]
    fn test_scenario_c_proration() {
        let period = q1_2025();
        let mut line = create_test_line(&period);

        // January 6 and 13 of 2025 are Mondays.
        set_non_worked_days(&mut line, &period, &days(&[6, 13])).unwrap();

        assert_eq!(line.salary.days_worked, 13);
        assert_eq!(line.salary.amount_for_days_worked, dec("650"));
        assert_eq!(line.salary.non_worked_deduction, dec("100"));
        assert_eq!(line.salary.total, dec("650"));
    }

    #[test]
    fn test_days_worked_plus_non_worked_equals_period_days() {
        let period = q1_2025();
        let mut line = create_test_line(&period);
        set_non_worked_days(&mut line, &period, &days(&[2, 3, 6])).unwrap();

        assert_eq!(
            line.salary.days_worked + line.salary.non_worked_days.len() as u32,
            line.salary.period_days
        );
    }

    #[test]
    fn test_allowance_adjustment_tracks_same_day_count() {
        let period = q1_2025();
        let mut line = create_test_line(&period);
        set_non_worked_days(&mut line, &period, &days(&[6, 13])).unwrap();

        let adjustment = line.allowance.adjustment.as_ref().unwrap();
        assert_eq!(adjustment.non_worked_count, 2);
        assert_eq!(adjustment.amount, dec("200"));
        assert_eq!(line.allowance.net_amount, dec("1300"));
    }

    #[test]
    fn test_totals_identity_after_day_change() {
        let period = q1_2025();
        let mut line = create_test_line(&period);
        set_non_worked_days(&mut line, &period, &days(&[6, 13])).unwrap();

        assert_eq!(line.net_total, line.total_earned - line.total_deductions);
        // 650 salary + 1500 allowance base, minus 100 salary + 200 allowance discounts.
        assert_eq!(line.total_earned, dec("2150"));
        assert_eq!(line.total_deductions, dec("300"));
        assert_eq!(line.net_total, dec("1850"));
    }

    #[test]
    fn test_clearing_days_restores_full_fortnight() {
        let period = q1_2025();
        let mut line = create_test_line(&period);
        set_non_worked_days(&mut line, &period, &days(&[6, 13])).unwrap();
        set_non_worked_days(&mut line, &period, &days(&[])).unwrap();

        assert_eq!(line.salary.days_worked, 15);
        assert_eq!(line.salary.non_worked_deduction, Decimal::ZERO);
        assert!(line.allowance.adjustment.is_none());
        assert_eq!(line.allowance.net_amount, line.allowance.base_amount);
    }

    #[test]
    fn test_day_below_range_rejected() {
        let period = PayrollPeriod::new(2025, 1, Fortnight::Second).unwrap();
        let mut line = create_test_line(&period);
        let result = set_non_worked_days(&mut line, &period, &days(&[15]));

        assert!(matches!(
            result,
            Err(PayrollError::DayOutOfRange {
                day: 15,
                first: 16,
                last: 31,
            })
        ));
    }

    #[test]
    fn test_day_above_range_rejected() {
        let period = q1_2025();
        let mut line = create_test_line(&period);
        let result = set_non_worked_days(&mut line, &period, &days(&[16]));
        assert!(matches!(result, Err(PayrollError::DayOutOfRange { .. })));
    }

    #[test]
    fn test_weekend_day_rejected() {
        let period = q1_2025();
        let mut line = create_test_line(&period);

        // January 4 of 2025 is a Saturday, the 5th a Sunday.
        for weekend_day in [4, 5] {
            let result = set_non_worked_days(&mut line, &period, &days(&[weekend_day]));
            assert!(
                matches!(result, Err(PayrollError::WeekendDay { day, .. }) if day == weekend_day)
            );
        }
    }

    #[test]
    fn test_rejected_set_leaves_line_untouched() {
        let period = q1_2025();
        let mut line = create_test_line(&period);
        set_non_worked_days(&mut line, &period, &days(&[6])).unwrap();
        let snapshot = line.clone();

        // One valid day plus one weekend day: the whole set must be refused.
        let result = set_non_worked_days(&mut line, &period, &days(&[7, 4]));
        assert!(result.is_err());
        assert_eq!(line, snapshot);
    }

    #[cfg(test)]
    mod properties {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            /// After any accepted day set, the worked/non-worked split
            /// always accounts for every calendar day of the fortnight.
            #[test]
            fn prop_day_partition_is_exact(selection in proptest::collection::btree_set(0usize..11, 0..11)) {
                let period = q1_2025();
                let selectable = period.selectable_days();
                let chosen: BTreeSet<u32> =
                    selection.into_iter().map(|i| selectable[i]).collect();

                let mut line = create_test_line(&period);
                set_non_worked_days(&mut line, &period, &chosen).unwrap();

                prop_assert_eq!(
                    line.salary.days_worked + line.salary.non_worked_days.len() as u32,
                    line.salary.period_days
                );
                prop_assert_eq!(line.net_total, line.total_earned - line.total_deductions);
            }
        }
    }
}
