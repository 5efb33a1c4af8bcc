//! Stimulus edit session.
//!
//! Holds the uncommitted percentage edits for one fortnight. Nothing
//! reaches the store until `save` or `finalize` is called; dropping the
//! session discards the edits, which is the cancellation contract for
//! closing the assignment dialog mid-edit.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use tracing::{info, warn};

use crate::calculation::{
    AllocationReport, StimulusPools, apply_stimulus, assign_variable, check_allocation,
    reset_variables,
};
use crate::config::StimulusSplit;
use crate::error::{PayrollError, PayrollResult};
use crate::models::{FortnightPayroll, MonthlyIncome, PayrollState};

use super::store::PayrollStore;

/// An in-memory editing session over a fortnight's stimulus percentages.
pub struct StimulusSession<'a, S> {
    store: &'a S,
    payroll: FortnightPayroll,
    pools: StimulusPools,
    has_reference_income: bool,
    max_variable_pct: Decimal,
}

impl<'a, S: PayrollStore> StimulusSession<'a, S> {
    /// Opens a session over an editable payroll.
    ///
    /// The reference income is re-resolved at open time: a late income
    /// posting picks up here, refreshing every line's amounts against the
    /// current pools.
    ///
    /// # Errors
    ///
    /// Returns [`PayrollError::StateViolation`] when the payroll is already
    /// `finalizada` or `archivada`.
    pub(crate) fn new(
        store: &'a S,
        mut payroll: FortnightPayroll,
        income: Option<&MonthlyIncome>,
        split: &StimulusSplit,
    ) -> PayrollResult<Self> {
        payroll.ensure_editable()?;

        let pools = StimulusPools::from_income(income, split);
        payroll.reference_income_id = income.map(|i| i.id);
        for line in payroll.lines.iter_mut() {
            apply_stimulus(line, &pools);
        }

        Ok(Self {
            store,
            payroll,
            pools,
            has_reference_income: income.is_some(),
            max_variable_pct: split.max_variable_pct,
        })
    }

    /// Returns the working copy of the payroll.
    pub fn payroll(&self) -> &FortnightPayroll {
        &self.payroll
    }

    /// Returns the fortnight pools the session allocates from.
    pub fn pools(&self) -> &StimulusPools {
        &self.pools
    }

    /// Assigns a variable percentage to one worker.
    ///
    /// # Errors
    ///
    /// Returns [`PayrollError::WorkerNotFound`] for an unknown CI and
    /// [`PayrollError::PercentageOutOfRange`] for a value outside the
    /// per-worker cap; the session is unchanged on error.
    pub fn assign_variable(&mut self, ci: &str, percentage: Decimal) -> PayrollResult<()> {
        let max = self.max_variable_pct;
        let pools = self.pools;
        let line = self.payroll.line_mut(ci)?;
        assign_variable(line, percentage, max, &pools)
    }

    /// Applies a whole CI-to-percentage map, the shape `save` persists.
    ///
    /// Validation is all-or-nothing: the first rejected entry aborts the
    /// call and the session keeps its previous percentages.
    pub fn set_percentages(&mut self, percentages: &BTreeMap<String, Decimal>) -> PayrollResult<()> {
        for (ci, percentage) in percentages {
            if self.payroll.line(ci).is_none() {
                return Err(PayrollError::WorkerNotFound { ci: ci.clone() });
            }
            if *percentage < Decimal::ZERO || *percentage > self.max_variable_pct {
                return Err(PayrollError::PercentageOutOfRange {
                    ci: ci.clone(),
                    value: *percentage,
                    max: self.max_variable_pct,
                });
            }
        }
        for (ci, percentage) in percentages {
            self.assign_variable(ci, *percentage)?;
        }
        Ok(())
    }

    /// Resets every worker's variable percentage to zero for this session.
    ///
    /// Persisted fixed percentages are configuration and are not touched.
    pub fn reset_variables(&mut self) {
        reset_variables(&mut self.payroll.lines, &self.pools);
    }

    /// Recomputes the allocation report for the current edits.
    pub fn allocation(&self) -> AllocationReport {
        check_allocation(&self.payroll.lines, self.has_reference_income)
    }

    /// Persists the current percentages without advancing the lifecycle.
    ///
    /// Repeatable and idempotent: the store receives the full line set as a
    /// replacement. On failure the session keeps the unsaved edits so the
    /// caller can retry without re-entering data.
    pub async fn save(&mut self) -> PayrollResult<AllocationReport> {
        self.payroll.ensure_editable()?;
        self.store
            .save_payroll(&self.payroll)
            .await
            .map_err(|e| persistence("save stimuli", e))?;

        let report = self.allocation();
        info!(
            period = %self.payroll.period,
            variable_total = %report.variable_pct_total,
            warnings = report.warnings.len(),
            "Stimulus percentages saved"
        );
        Ok(report)
    }

    /// Persists and advances the payroll to `estimulos_asignados`.
    ///
    /// Calling this when the payroll is already at or past that state is a
    /// no-op. On persistence failure the in-memory transition is rolled
    /// back so a retry can re-run it.
    pub async fn finalize(&mut self) -> PayrollResult<FortnightPayroll> {
        if self.payroll.state >= PayrollState::StimuliAssigned {
            info!(period = %self.payroll.period, state = %self.payroll.state,
                "Stimuli already finalized; nothing to do");
            return Ok(self.payroll.clone());
        }

        let previous = self.payroll.state;
        self.payroll.advance_to(PayrollState::StimuliAssigned)?;

        if let Err(e) = self.store.save_payroll(&self.payroll).await {
            self.payroll.state = previous;
            warn!(period = %self.payroll.period, error = %e, "Finalizing stimuli failed");
            return Err(persistence("finalize stimuli", e));
        }

        info!(period = %self.payroll.period, "Stimuli finalized");
        Ok(self.payroll.clone())
    }
}

fn persistence(operation: &str, source: PayrollError) -> PayrollError {
    match source {
        e @ PayrollError::Persistence { .. } => e,
        other => PayrollError::Persistence {
            operation: operation.to_string(),
            message: other.to_string(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::InMemoryStore;
    use crate::models::{Currency, Fortnight, PayrollPeriod, Worker};
    use std::str::FromStr;
    use uuid::Uuid;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn create_test_worker(ci: &str, fixed_pct: &str) -> Worker {
        Worker {
            ci: ci.to_string(),
            name: "Trabajador de Prueba".to_string(),
            role: "Vendedor".to_string(),
            base_salary: dec("25000"),
            workable_days: 24,
            fixed_stimulus_pct: dec(fixed_pct),
            daily_allowance: dec("1000"),
            active: true,
        }
    }

    fn create_test_payroll() -> FortnightPayroll {
        let period = PayrollPeriod::new(2025, 2, Fortnight::First).unwrap();
        FortnightPayroll::open(
            period,
            &[
                create_test_worker("89012345678", "20"),
                create_test_worker("90023456789", "15"),
            ],
            15,
        )
    }

    fn scenario_a_income() -> MonthlyIncome {
        MonthlyIncome {
            id: Uuid::new_v4(),
            year: 2025,
            month: 1,
            amount: dec("10000"),
            currency: Currency::USD,
        }
    }

    #[tokio::test]
    async fn test_session_refuses_finalized_payroll() {
        let store = InMemoryStore::new();
        let mut payroll = create_test_payroll();
        payroll.state = PayrollState::Finalized;

        let result = StimulusSession::new(&store, payroll, None, &StimulusSplit::default());
        assert!(matches!(
            result.err(),
            Some(PayrollError::StateViolation { .. })
        ));
    }

    #[tokio::test]
    async fn test_assign_and_save_persists_percentages() {
        let store = InMemoryStore::new();
        let income = scenario_a_income();
        let mut session = StimulusSession::new(
            &store,
            create_test_payroll(),
            Some(&income),
            &StimulusSplit::default(),
        )
        .unwrap();

        session.assign_variable("89012345678", dec("10")).unwrap();
        session.save().await.unwrap();

        let saved = store
            .load_payroll(session.payroll().period)
            .await
            .unwrap()
            .unwrap();
        let line = saved.line("89012345678").unwrap();
        assert_eq!(line.stimulus.variable.percentage, dec("10"));
        assert_eq!(line.stimulus.fixed.amount, dec("750"));
        assert_eq!(line.stimulus.variable.amount, dec("125"));
        assert_eq!(saved.state, PayrollState::Draft, "save does not advance state");
    }

    #[tokio::test]
    async fn test_set_percentages_is_all_or_nothing() {
        let store = InMemoryStore::new();
        let income = scenario_a_income();
        let mut session = StimulusSession::new(
            &store,
            create_test_payroll(),
            Some(&income),
            &StimulusSplit::default(),
        )
        .unwrap();
        session.assign_variable("89012345678", dec("5")).unwrap();

        let mut map = BTreeMap::new();
        map.insert("89012345678".to_string(), dec("20"));
        map.insert("90023456789".to_string(), dec("80")); // above cap

        let result = session.set_percentages(&map);
        assert!(matches!(
            result,
            Err(PayrollError::PercentageOutOfRange { .. })
        ));
        // Previous edit survives untouched.
        let line = session.payroll().line("89012345678").unwrap();
        assert_eq!(line.stimulus.variable.percentage, dec("5"));
    }

    #[tokio::test]
    async fn test_reset_variables_only_clears_variable() {
        let store = InMemoryStore::new();
        let income = scenario_a_income();
        let mut session = StimulusSession::new(
            &store,
            create_test_payroll(),
            Some(&income),
            &StimulusSplit::default(),
        )
        .unwrap();
        session.assign_variable("89012345678", dec("30")).unwrap();

        session.reset_variables();

        let line = session.payroll().line("89012345678").unwrap();
        assert_eq!(line.stimulus.variable.percentage, Decimal::ZERO);
        assert_eq!(line.stimulus.fixed.percentage, dec("20"));
        assert_eq!(line.stimulus.fixed.amount, dec("750"));
    }

    #[tokio::test]
    async fn test_finalize_advances_once_and_is_idempotent() {
        let store = InMemoryStore::new();
        let income = scenario_a_income();
        let mut session = StimulusSession::new(
            &store,
            create_test_payroll(),
            Some(&income),
            &StimulusSplit::default(),
        )
        .unwrap();

        let first = session.finalize().await.unwrap();
        assert_eq!(first.state, PayrollState::StimuliAssigned);

        let second = session.finalize().await.unwrap();
        assert_eq!(second, first, "second finalize is a no-op");
    }

    #[tokio::test]
    async fn test_save_reports_allocation_and_persists_raw() {
        let store = InMemoryStore::new();
        let income = scenario_a_income();
        let mut session = StimulusSession::new(
            &store,
            create_test_payroll(),
            Some(&income),
            &StimulusSplit::default(),
        )
        .unwrap();
        session.assign_variable("89012345678", dec("50")).unwrap();
        session.assign_variable("90023456789", dec("50")).unwrap();

        let report = session.save().await.unwrap();
        assert_eq!(report.variable_pct_total, dec("100"));

        let saved = store
            .load_payroll(session.payroll().period)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(
            saved.line("90023456789").unwrap().stimulus.variable.percentage,
            dec("50")
        );
    }

    /// No reference income still allows the session; amounts
    /// are zero and the report carries the warning.
    #[tokio::test]
    async fn test_missing_income_degrades_to_zero_pools() {
        let store = InMemoryStore::new();
        let mut session = StimulusSession::new(
            &store,
            create_test_payroll(),
            None,
            &StimulusSplit::default(),
        )
        .unwrap();

        session.assign_variable("89012345678", dec("10")).unwrap();
        let report = session.save().await.unwrap();

        assert!(
            report
                .warnings
                .iter()
                .any(|w| w.code == crate::calculation::WARN_NO_REFERENCE_INCOME)
        );
        let line = session.payroll().line("89012345678").unwrap();
        assert_eq!(line.stimulus.total, Decimal::ZERO);
        assert_eq!(line.stimulus.variable.percentage, dec("10"));
    }
}
