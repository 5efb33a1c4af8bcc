//! Archived payroll model.
//!
//! This module contains the [`ArchivedPayroll`] record: the immutable
//! historical copy of a finalized fortnight. Freezing is the only path that
//! produces one; nothing in this crate mutates an archive after creation,
//! and viewing an archive never copies data back into the live period.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{PayrollError, PayrollResult};

use super::{FortnightPayroll, PayrollLine, PayrollPeriod, PayrollState, PayrollTotals};

/// A finalized fortnight frozen into the historical record.
///
/// Totals are denormalized at freeze time so the archive can be listed
/// without re-aggregating lines.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArchivedPayroll {
    /// Unique identifier of the archive record.
    pub id: Uuid,
    /// The id of the payroll this record was frozen from.
    #[serde(rename = "nomina_id")]
    pub payroll_id: Uuid,
    /// The fortnight the record covers.
    #[serde(rename = "periodo")]
    pub period: PayrollPeriod,
    /// The income record that funded the fortnight's stimuli, if any.
    #[serde(rename = "ingreso_mensual_id")]
    pub reference_income_id: Option<Uuid>,
    /// Denormalized period-wide totals.
    #[serde(rename = "totales")]
    pub totals: PayrollTotals,
    /// The frozen line set.
    #[serde(rename = "lineas")]
    pub lines: Vec<PayrollLine>,
    /// When the record was frozen.
    #[serde(rename = "fecha_creacion")]
    pub archived_at: DateTime<Utc>,
}

impl ArchivedPayroll {
    /// Freezes a finalized payroll into an archive record.
    ///
    /// # Errors
    ///
    /// Returns [`PayrollError::InvalidTransition`] when the payroll has not
    /// reached `finalizada` yet; draft data never enters the archive.
    pub fn freeze(payroll: &FortnightPayroll, totals: PayrollTotals) -> PayrollResult<Self> {
        if payroll.state != PayrollState::Finalized {
            return Err(PayrollError::InvalidTransition {
                from: payroll.state,
                to: PayrollState::Archived,
            });
        }

        Ok(Self {
            id: Uuid::new_v4(),
            payroll_id: payroll.id,
            period: payroll.period,
            reference_income_id: payroll.reference_income_id,
            totals,
            lines: payroll.lines.clone(),
            archived_at: Utc::now(),
        })
    }
}
