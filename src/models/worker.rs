//! Worker model.
//!
//! This module defines the [`Worker`] struct describing one roster entry
//! as the payroll engine sees it. Workforce management (hiring, removal,
//! changing the fixed stimulus percentage) happens elsewhere; this type is
//! read-only input here.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A worker on the payroll roster.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Worker {
    /// The CI (identity card number), the natural key for payroll lines.
    #[serde(rename = "CI")]
    pub ci: String,
    /// The worker's full name.
    #[serde(rename = "nombre")]
    pub name: String,
    /// The worker's role (cargo), used for by-role reporting.
    #[serde(rename = "cargo")]
    pub role: String,
    /// The fixed monthly salary the daily rate is derived from.
    #[serde(rename = "salarioFijo")]
    pub base_salary: Decimal,
    /// The number of workable days per month the salary is spread over.
    #[serde(rename = "diasTrabajables")]
    pub workable_days: u32,
    /// The pre-configured share of the fixed stimulus pool, in percent.
    #[serde(rename = "porcentajeEstimuloFijo")]
    pub fixed_stimulus_pct: Decimal,
    /// The daily food-allowance amount.
    #[serde(rename = "montoAlimentacionDiaria")]
    pub daily_allowance: Decimal,
    /// Whether the worker is active. Lines are only opened for active
    /// workers.
    #[serde(rename = "activo", default = "default_active")]
    pub active: bool,
}

fn default_active() -> bool {
    true
}

impl Worker {
    /// Returns the worker's daily salary rate.
    ///
    /// Computed once per worker and period-independent:
    /// `salarioFijo / diasTrabajables`. A roster entry with zero workable
    /// days yields a zero rate rather than a division error.
    ///
    /// # Example
    ///
    /// ```
    /// use nomina_engine::models::Worker;
    /// use rust_decimal::Decimal;
    ///
    /// let worker = Worker {
    ///     ci: "89012345678".to_string(),
    ///     name: "Juan Pérez García".to_string(),
    ///     role: "Vendedor".to_string(),
    ///     base_salary: Decimal::from(1500),
    ///     workable_days: 30,
    ///     fixed_stimulus_pct: Decimal::from(5),
    ///     daily_allowance: Decimal::from(100),
    ///     active: true,
    /// };
    /// assert_eq!(worker.daily_rate(), Decimal::from(50));
    /// ```
    pub fn daily_rate(&self) -> Decimal {
        if self.workable_days == 0 {
            return Decimal::ZERO;
        }
        self.base_salary / Decimal::from(self.workable_days)
    }
}
