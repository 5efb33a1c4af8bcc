//! Configuration types for the Fortnightly Payroll Engine.
//!
//! These structs mirror the YAML files in the configuration directory:
//! `engine.yaml` holds the engine settings (pool split, caps, allowance
//! coverage, currency) and `workers.yaml` holds the active worker roster.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{PayrollError, PayrollResult};
use crate::models::{Currency, Worker};

/// Descriptive metadata for a configuration set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PayrollMetadata {
    /// The display name of the payroll configuration.
    pub name: String,
    /// The configuration version (typically a date).
    pub version: String,
}

/// How the monthly stimulus pool is split and capped.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StimulusSplit {
    /// The share of the monthly income funding the fixed pool (0-1).
    pub fixed_share: Decimal,
    /// The share of the monthly income funding the variable pool (0-1).
    pub variable_share: Decimal,
    /// The per-worker cap on the variable percentage, in percent.
    pub max_variable_pct: Decimal,
}

impl Default for StimulusSplit {
    fn default() -> Self {
        Self {
            fixed_share: Decimal::new(75, 2),
            variable_share: Decimal::new(25, 2),
            max_variable_pct: Decimal::from(50),
        }
    }
}

/// Food-allowance settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AllowanceSettings {
    /// The number of days one fortnight's allowance covers.
    pub covered_days: u32,
}

impl Default for AllowanceSettings {
    fn default() -> Self {
        Self { covered_days: 15 }
    }
}

/// The contents of `engine.yaml`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineSettings {
    /// Descriptive metadata.
    pub metadata: PayrollMetadata,
    /// The currency payroll amounts are denominated in.
    pub currency: Currency,
    /// Pool split and caps.
    #[serde(default)]
    pub stimulus: StimulusSplit,
    /// Allowance coverage.
    #[serde(default)]
    pub allowance: AllowanceSettings,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            metadata: PayrollMetadata {
                name: "Nómina Quincenal".to_string(),
                version: "default".to_string(),
            },
            currency: Currency::CUP,
            stimulus: StimulusSplit::default(),
            allowance: AllowanceSettings::default(),
        }
    }
}

/// The contents of `workers.yaml`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RosterConfig {
    /// The worker roster.
    pub workers: Vec<Worker>,
}

/// The assembled payroll configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct PayrollConfig {
    settings: EngineSettings,
    workers: Vec<Worker>,
}

impl PayrollConfig {
    /// Assembles a configuration, validating the pool split.
    ///
    /// # Errors
    ///
    /// Returns [`PayrollError::ConfigParseError`] when the fixed and
    /// variable shares do not sum to exactly 1.
    pub fn new(settings: EngineSettings, workers: Vec<Worker>) -> PayrollResult<Self> {
        let share_sum = settings.stimulus.fixed_share + settings.stimulus.variable_share;
        if share_sum != Decimal::ONE {
            return Err(PayrollError::ConfigParseError {
                path: "engine.yaml".to_string(),
                message: format!(
                    "stimulus shares must sum to 1, got {} + {} = {}",
                    settings.stimulus.fixed_share, settings.stimulus.variable_share, share_sum
                ),
            });
        }
        Ok(Self { settings, workers })
    }

    /// Returns the engine settings.
    pub fn settings(&self) -> &EngineSettings {
        &self.settings
    }

    /// Returns the full worker roster.
    pub fn workers(&self) -> &[Worker] {
        &self.workers
    }

    /// Returns the active workers, the set lines are opened for.
    pub fn active_workers(&self) -> Vec<&Worker> {
        self.workers.iter().filter(|w| w.active).collect()
    }

    /// Looks up a worker by CI.
    ///
    /// # Errors
    ///
    /// Returns [`PayrollError::WorkerNotFound`] when the CI is not on the
    /// roster.
    pub fn worker(&self, ci: &str) -> PayrollResult<&Worker> {
        self.workers
            .iter()
            .find(|w| w.ci == ci)
            .ok_or_else(|| PayrollError::WorkerNotFound { ci: ci.to_string() })
    }
}
