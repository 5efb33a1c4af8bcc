//! Fortnight payroll aggregate and its lifecycle state machine.
//!
//! A [`FortnightPayroll`] is the one record per period that owns the line
//! set. Its [`PayrollState`] advances strictly forward through an explicit
//! transition table; once `finalizada` or `archivada`, no line under it may
//! be mutated by any operation in this crate.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{PayrollError, PayrollResult};

use super::{PayrollLine, PayrollPeriod, Worker};

/// The lifecycle state of a fortnight's payroll.
///
/// Transitions are strictly forward and never skip a state:
/// `borrador → estimulos_asignados → salarios_calculados → finalizada →
/// archivada`. The Spanish names are the wire contract.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum PayrollState {
    /// Freshly opened; nothing persisted beyond the synthesized lines.
    #[serde(rename = "borrador")]
    Draft,
    /// Stimulus percentages have been finalized for the fortnight.
    #[serde(rename = "estimulos_asignados")]
    StimuliAssigned,
    /// Salaries (non-worked days and proration) have been finalized.
    #[serde(rename = "salarios_calculados")]
    SalariesCalculated,
    /// The fortnight is closed; lines are read-only.
    #[serde(rename = "finalizada")]
    Finalized,
    /// Terminal: the fortnight has been frozen into the historical archive.
    #[serde(rename = "archivada")]
    Archived,
}

impl PayrollState {
    /// Returns the only state this one may advance to, if any.
    pub fn next(self) -> Option<PayrollState> {
        match self {
            PayrollState::Draft => Some(PayrollState::StimuliAssigned),
            PayrollState::StimuliAssigned => Some(PayrollState::SalariesCalculated),
            PayrollState::SalariesCalculated => Some(PayrollState::Finalized),
            PayrollState::Finalized => Some(PayrollState::Archived),
            PayrollState::Archived => None,
        }
    }

    /// Checks whether the single-step transition to `to` is legal.
    pub fn can_transition_to(self, to: PayrollState) -> bool {
        self.next() == Some(to)
    }

    /// Returns true once the payroll is read-only (`finalizada` or
    /// `archivada`).
    pub fn is_locked(self) -> bool {
        matches!(self, PayrollState::Finalized | PayrollState::Archived)
    }
}

impl std::fmt::Display for PayrollState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            PayrollState::Draft => "borrador",
            PayrollState::StimuliAssigned => "estimulos_asignados",
            PayrollState::SalariesCalculated => "salarios_calculados",
            PayrollState::Finalized => "finalizada",
            PayrollState::Archived => "archivada",
        };
        write!(f, "{}", name)
    }
}

/// One fortnight's payroll: the period, its lifecycle state, the optional
/// reference to the funding income and the per-worker line set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FortnightPayroll {
    /// Unique identifier of the payroll record.
    pub id: Uuid,
    /// The fortnight this payroll covers.
    #[serde(rename = "periodo")]
    pub period: PayrollPeriod,
    /// The lifecycle state.
    #[serde(rename = "estado")]
    pub state: PayrollState,
    /// The income record funding this fortnight's stimuli, when one exists.
    #[serde(rename = "ingreso_mensual_id")]
    pub reference_income_id: Option<Uuid>,
    /// One line per active worker.
    #[serde(rename = "lineas")]
    pub lines: Vec<PayrollLine>,
}

impl FortnightPayroll {
    /// Opens a fresh `borrador` payroll for a period, synthesizing one line
    /// per active worker with zero variable percentages and no discounts.
    pub fn open(period: PayrollPeriod, workers: &[Worker], allowance_covered_days: u32) -> Self {
        let lines = workers
            .iter()
            .filter(|w| w.active)
            .map(|w| PayrollLine::open_for(w, &period, allowance_covered_days))
            .collect();

        Self {
            id: Uuid::new_v4(),
            period,
            state: PayrollState::Draft,
            reference_income_id: None,
            lines,
        }
    }

    /// Looks up the line for a worker by CI.
    pub fn line(&self, ci: &str) -> Option<&PayrollLine> {
        self.lines.iter().find(|l| l.worker_ci == ci)
    }

    /// Looks up the line for a worker mutably, refusing when the payroll is
    /// locked.
    pub fn line_mut(&mut self, ci: &str) -> PayrollResult<&mut PayrollLine> {
        self.ensure_editable()?;
        self.lines
            .iter_mut()
            .find(|l| l.worker_ci == ci)
            .ok_or_else(|| PayrollError::WorkerNotFound { ci: ci.to_string() })
    }

    /// Refuses any mutation once the payroll is `finalizada` or
    /// `archivada`.
    ///
    /// This check must run before any store call is issued; UI-side
    /// disabling of edit controls is not the contract.
    pub fn ensure_editable(&self) -> PayrollResult<()> {
        if self.state.is_locked() {
            return Err(PayrollError::StateViolation { state: self.state });
        }
        Ok(())
    }

    /// Advances the lifecycle by exactly one step.
    ///
    /// # Errors
    ///
    /// Returns [`PayrollError::InvalidTransition`] for any edge not in the
    /// transition table (skips, backward moves, or moves out of
    /// `archivada`).
    pub fn advance_to(&mut self, to: PayrollState) -> PayrollResult<()> {
        if !self.state.can_transition_to(to) {
            return Err(PayrollError::InvalidTransition {
                from: self.state,
                to,
            });
        }
        self.state = to;
        Ok(())
    }
}
