//! The payroll engine service.
//!
//! [`PayrollEngine`] ties the pieces together: it loads or synthesizes a
//! fortnight's payroll, resolves the reference income, opens the edit
//! sessions, drives the final lifecycle transitions and freezes finalized
//! fortnights into the archive.

use tracing::info;

use crate::calculation::{StimulusPools, apply_stimulus, summarize, summarize_by_role};
use crate::config::PayrollConfig;
use crate::error::{PayrollError, PayrollResult};
use crate::models::{
    ArchivedPayroll, FortnightPayroll, MonthlyIncome, PayrollPeriod, PayrollState, PayrollTotals,
    RoleSummary,
};

use super::salary_session::SalarySession;
use super::stimulus_session::StimulusSession;
use super::store::PayrollStore;

/// The orchestrating service over a [`PayrollStore`].
pub struct PayrollEngine<S> {
    store: S,
    config: PayrollConfig,
}

impl<S: PayrollStore> PayrollEngine<S> {
    /// Creates an engine over a store and configuration.
    pub fn new(store: S, config: PayrollConfig) -> Self {
        Self { store, config }
    }

    /// Returns the configuration the engine was built with.
    pub fn config(&self) -> &PayrollConfig {
        &self.config
    }

    /// Returns the underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Loads the payroll for a period, synthesizing a fresh draft on first
    /// access.
    ///
    /// A missing record is not an error: a `borrador` payroll is created
    /// with one line per active worker, zero variable percentages and no
    /// discounts, its stimulus amounts primed from the reference income
    /// when one exists.
    pub async fn load_or_create(&self, period: PayrollPeriod) -> PayrollResult<FortnightPayroll> {
        if let Some(payroll) = self.store.load_payroll(period).await? {
            return Ok(payroll);
        }

        let income = self.reference_income(&period).await?;
        let pools = StimulusPools::from_income(income.as_ref(), &self.config.settings().stimulus);

        let mut payroll = FortnightPayroll::open(
            period,
            self.config.workers(),
            self.config.settings().allowance.covered_days,
        );
        payroll.reference_income_id = income.as_ref().map(|i| i.id);
        for line in payroll.lines.iter_mut() {
            apply_stimulus(line, &pools);
        }

        self.store.save_payroll(&payroll).await?;
        info!(
            %period,
            lines = payroll.lines.len(),
            has_income = income.is_some(),
            "Synthesized fresh payroll"
        );
        Ok(payroll)
    }

    /// Resolves the income record funding a period's stimuli.
    ///
    /// Selects the record posted for the calendar month preceding the
    /// period's own; `None` when nothing has been posted yet.
    pub async fn reference_income(
        &self,
        period: &PayrollPeriod,
    ) -> PayrollResult<Option<MonthlyIncome>> {
        let (year, month) = period.preceding_month();
        self.store.load_income(year, month).await
    }

    /// Opens a stimulus edit session for a period.
    pub async fn stimulus_session(
        &self,
        period: PayrollPeriod,
    ) -> PayrollResult<StimulusSession<'_, S>> {
        let payroll = self.load_or_create(period).await?;
        let income = self.reference_income(&period).await?;
        StimulusSession::new(
            &self.store,
            payroll,
            income.as_ref(),
            &self.config.settings().stimulus,
        )
    }

    /// Opens a salary edit session for a period.
    pub async fn salary_session(&self, period: PayrollPeriod) -> PayrollResult<SalarySession<'_, S>> {
        let payroll = self.load_or_create(period).await?;
        SalarySession::new(&self.store, payroll)
    }

    /// Closes a fully calculated fortnight (`salarios_calculados →
    /// finalizada`).
    ///
    /// Idempotent: a payroll already at or past `finalizada` is returned
    /// unchanged.
    pub async fn finalize(&self, period: PayrollPeriod) -> PayrollResult<FortnightPayroll> {
        let mut payroll = self.load_or_create(period).await?;
        if payroll.state >= PayrollState::Finalized {
            return Ok(payroll);
        }

        payroll.advance_to(PayrollState::Finalized)?;
        self.store.save_payroll(&payroll).await?;
        info!(%period, "Payroll finalized");
        Ok(payroll)
    }

    /// Freezes a finalized fortnight into the immutable archive
    /// (`finalizada → archivada`).
    ///
    /// Idempotent: when an archive record already exists it is returned
    /// as-is; nothing is recreated or copied back.
    pub async fn archive(&self, period: PayrollPeriod) -> PayrollResult<ArchivedPayroll> {
        if let Some(existing) = self.store.load_archive(period).await? {
            return Ok(existing);
        }

        let mut payroll = self
            .store
            .load_payroll(period)
            .await?
            .ok_or(PayrollError::InvalidPeriod {
                message: format!("no payroll exists for {}", period),
            })?;

        let totals = summarize(&payroll.lines);
        let archive = ArchivedPayroll::freeze(&payroll, totals)?;
        self.store.save_archive(&archive).await?;

        payroll.advance_to(PayrollState::Archived)?;
        self.store.save_payroll(&payroll).await?;
        info!(%period, archive_id = %archive.id, "Payroll archived");
        Ok(archive)
    }

    /// Reads an archived fortnight.
    ///
    /// A pure read-mode switch: viewing history never touches the live
    /// period.
    pub async fn archived(&self, period: PayrollPeriod) -> PayrollResult<Option<ArchivedPayroll>> {
        self.store.load_archive(period).await
    }

    /// Recomputes the period-wide totals for the stored line set.
    pub async fn summary(&self, period: PayrollPeriod) -> PayrollResult<PayrollTotals> {
        let payroll = self.load_or_create(period).await?;
        Ok(summarize(&payroll.lines))
    }

    /// Recomputes the by-role net summary for the stored line set.
    pub async fn role_summary(&self, period: PayrollPeriod) -> PayrollResult<Vec<RoleSummary>> {
        let payroll = self.load_or_create(period).await?;
        Ok(summarize_by_role(&payroll.lines, self.config.workers()))
    }
}
