//! Persistence boundary of the payroll engine.
//!
//! The [`PayrollStore`] trait abstracts the remote backend: every save is a
//! full-replace of the record (never a partial patch) so concurrent editors
//! degrade to last-write-wins, and every call is an awaitable, fallible
//! unit of work the engine treats as opaque. [`InMemoryStore`] backs tests
//! and the bundled HTTP surface.

use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;

use tokio::sync::RwLock;

use crate::error::PayrollResult;
use crate::models::{ArchivedPayroll, FortnightPayroll, MonthlyIncome, PayrollPeriod};

/// Storage contract for payrolls, monthly incomes and archives.
///
/// Implementations must treat `save_payroll` as a full replacement of the
/// period's record; the engine relies on that to keep last-write-wins
/// safe. A failed call must leave previously stored data unchanged.
pub trait PayrollStore: Send + Sync {
    /// Loads the payroll for a period, if one has been saved.
    ///
    /// Absence is not an error; the engine synthesizes a fresh draft.
    fn load_payroll(
        &self,
        period: PayrollPeriod,
    ) -> impl Future<Output = PayrollResult<Option<FortnightPayroll>>> + Send;

    /// Persists a payroll, replacing any previous record for its period.
    fn save_payroll(
        &self,
        payroll: &FortnightPayroll,
    ) -> impl Future<Output = PayrollResult<()>> + Send;

    /// Loads the monthly income posted for (year, month), if any.
    fn load_income(
        &self,
        year: i32,
        month: u32,
    ) -> impl Future<Output = PayrollResult<Option<MonthlyIncome>>> + Send;

    /// Loads the archived record for a period, if one exists.
    fn load_archive(
        &self,
        period: PayrollPeriod,
    ) -> impl Future<Output = PayrollResult<Option<ArchivedPayroll>>> + Send;

    /// Persists an archived record.
    fn save_archive(
        &self,
        archive: &ArchivedPayroll,
    ) -> impl Future<Output = PayrollResult<()>> + Send;
}

/// An in-memory [`PayrollStore`].
///
/// Cloning is cheap: clones share the same underlying maps, mirroring how
/// handlers share application state.
#[derive(Debug, Clone, Default)]
pub struct InMemoryStore {
    payrolls: Arc<RwLock<HashMap<PayrollPeriod, FortnightPayroll>>>,
    incomes: Arc<RwLock<HashMap<(i32, u32), MonthlyIncome>>>,
    archives: Arc<RwLock<HashMap<PayrollPeriod, ArchivedPayroll>>>,
}

impl InMemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Posts a monthly income record.
    ///
    /// Income is owned by the monthly-income module and read-only to the
    /// engine; this entry point exists so tests and deployments can seed
    /// the store.
    pub async fn post_income(&self, income: MonthlyIncome) {
        self.incomes
            .write()
            .await
            .insert((income.year, income.month), income);
    }
}

impl PayrollStore for InMemoryStore {
    async fn load_payroll(&self, period: PayrollPeriod) -> PayrollResult<Option<FortnightPayroll>> {
        Ok(self.payrolls.read().await.get(&period).cloned())
    }

    async fn save_payroll(&self, payroll: &FortnightPayroll) -> PayrollResult<()> {
        self.payrolls
            .write()
            .await
            .insert(payroll.period, payroll.clone());
        Ok(())
    }

    async fn load_income(&self, year: i32, month: u32) -> PayrollResult<Option<MonthlyIncome>> {
        Ok(self.incomes.read().await.get(&(year, month)).cloned())
    }

    async fn load_archive(&self, period: PayrollPeriod) -> PayrollResult<Option<ArchivedPayroll>> {
        Ok(self.archives.read().await.get(&period).cloned())
    }

    async fn save_archive(&self, archive: &ArchivedPayroll) -> PayrollResult<()> {
        self.archives
            .write()
            .await
            .insert(archive.period, archive.clone());
        Ok(())
    }
}
