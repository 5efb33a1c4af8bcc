//! Monthly income model.
//!
//! This module defines the [`MonthlyIncome`] record: one month's posted
//! stimulus budget, entered by HR and consumed here as the funding source
//! for the *following* month's two fortnights. Read-only to this engine.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The currency an income amount is denominated in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Currency {
    /// Cuban peso.
    CUP,
    /// US dollar.
    USD,
    /// Euro.
    EUR,
}

impl std::fmt::Display for Currency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Currency::CUP => write!(f, "CUP"),
            Currency::USD => write!(f, "USD"),
            Currency::EUR => write!(f, "EUR"),
        }
    }
}

/// One month's total stimulus budget.
///
/// Stimuli are paid in arrears: the income posted for month M funds the
/// stimulus pools of both fortnights of month M+1.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyIncome {
    /// Unique identifier of the income record.
    pub id: Uuid,
    /// The calendar year the income was posted for.
    #[serde(rename = "anio")]
    pub year: i32,
    /// The calendar month the income was posted for (1-12).
    #[serde(rename = "mes")]
    pub month: u32,
    /// The total amount posted.
    #[serde(rename = "monto")]
    pub amount: Decimal,
    /// The currency the amount is denominated in.
    #[serde(rename = "moneda")]
    pub currency: Currency,
}
