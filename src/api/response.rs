//! Response types for the Fortnightly Payroll Engine API.
//!
//! This module defines the error response structures, the domain-to-HTTP
//! error mapping, and the composite bodies returned by the save endpoints.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};

use crate::calculation::AllocationReport;
use crate::error::PayrollError;
use crate::models::{FortnightPayroll, PayrollTotals};

/// API error response structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    /// Error code for programmatic handling.
    pub code: String,
    /// Human-readable error message.
    pub message: String,
    /// Optional details about the error.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    /// Creates a new API error with details.
    pub fn with_details(
        code: impl Into<String>,
        message: impl Into<String>,
        details: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: Some(details.into()),
        }
    }

    /// Creates a malformed JSON error response.
    pub fn malformed_json(message: impl Into<String>) -> Self {
        Self::new("MALFORMED_JSON", message)
    }

    /// Creates an archive-not-found error response.
    pub fn archive_not_found(period: impl std::fmt::Display) -> Self {
        Self::new(
            "ARCHIVE_NOT_FOUND",
            format!("No archived payroll exists for {}", period),
        )
    }
}

/// API error with HTTP status code.
pub struct ApiErrorResponse {
    /// The HTTP status code.
    pub status: StatusCode,
    /// The error body.
    pub error: ApiError,
}

impl IntoResponse for ApiErrorResponse {
    fn into_response(self) -> Response {
        (self.status, Json(self.error)).into_response()
    }
}

impl From<PayrollError> for ApiErrorResponse {
    fn from(error: PayrollError) -> Self {
        match error {
            PayrollError::ConfigNotFound { path } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details(
                    "CONFIG_ERROR",
                    "Configuration error",
                    format!("Configuration file not found: {}", path),
                ),
            },
            PayrollError::ConfigParseError { path, message } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details(
                    "CONFIG_ERROR",
                    "Configuration parse error",
                    format!("Failed to parse {}: {}", path, message),
                ),
            },
            PayrollError::InvalidPeriod { message } => ApiErrorResponse {
                status: StatusCode::BAD_REQUEST,
                error: ApiError::new("INVALID_PERIOD", format!("Invalid period: {}", message)),
            },
            PayrollError::WorkerNotFound { ci } => ApiErrorResponse {
                status: StatusCode::BAD_REQUEST,
                error: ApiError::with_details(
                    "WORKER_NOT_FOUND",
                    format!("Worker not found: {}", ci),
                    "The CI has no payroll line in this period",
                ),
            },
            PayrollError::PercentageOutOfRange { ci, value, max } => ApiErrorResponse {
                status: StatusCode::BAD_REQUEST,
                error: ApiError::with_details(
                    "PERCENTAGE_OUT_OF_RANGE",
                    format!("Variable percentage {}% for worker {} is invalid", value, ci),
                    format!("Allowed range is 0 to {}", max),
                ),
            },
            PayrollError::DayOutOfRange { day, first, last } => ApiErrorResponse {
                status: StatusCode::BAD_REQUEST,
                error: ApiError::new(
                    "DAY_OUT_OF_RANGE",
                    format!("Day {} is outside the period range {}-{}", day, first, last),
                ),
            },
            PayrollError::WeekendDay { day, date } => ApiErrorResponse {
                status: StatusCode::BAD_REQUEST,
                error: ApiError::with_details(
                    "WEEKEND_DAY",
                    format!("Day {} falls on a weekend", day),
                    format!("{} is not a workable day", date),
                ),
            },
            PayrollError::StateViolation { state } => ApiErrorResponse {
                status: StatusCode::CONFLICT,
                error: ApiError::new(
                    "STATE_VIOLATION",
                    format!("Payroll is {} and can no longer be modified", state),
                ),
            },
            PayrollError::InvalidTransition { from, to } => ApiErrorResponse {
                status: StatusCode::CONFLICT,
                error: ApiError::new(
                    "INVALID_TRANSITION",
                    format!("Cannot transition payroll from {} to {}", from, to),
                ),
            },
            PayrollError::MissingReferenceIncome { month, year } => ApiErrorResponse {
                status: StatusCode::BAD_REQUEST,
                error: ApiError::new(
                    "MISSING_REFERENCE_INCOME",
                    format!("No monthly income posted for {}/{}", month, year),
                ),
            },
            PayrollError::Persistence { operation, message } => ApiErrorResponse {
                status: StatusCode::BAD_GATEWAY,
                error: ApiError::with_details(
                    "PERSISTENCE_FAILURE",
                    format!("Persistence failure during {}", operation),
                    message,
                ),
            },
        }
    }
}

/// Body returned by the stimulus save endpoint: the persisted payroll plus
/// the allocation report recomputed for it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SaveStimuliResponse {
    /// The payroll as persisted.
    #[serde(rename = "nomina")]
    pub payroll: FortnightPayroll,
    /// The allocation report; warnings here never block saving.
    #[serde(rename = "asignacion")]
    pub allocation: AllocationReport,
}

/// Body returned by the salary save endpoint: the persisted payroll plus
/// the recomputed period totals.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SaveSalariesResponse {
    /// The payroll as persisted.
    #[serde(rename = "nomina")]
    pub payroll: FortnightPayroll,
    /// Period-wide totals over the persisted lines.
    #[serde(rename = "totales")]
    pub totals: PayrollTotals,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::PayrollState;

    #[test]
    fn test_api_error_serialization() {
        let error = ApiError::new("TEST_ERROR", "Test message");
        let json = serde_json::to_string(&error).unwrap();
        assert!(json.contains("\"code\":\"TEST_ERROR\""));
        assert!(json.contains("\"message\":\"Test message\""));
        assert!(!json.contains("details")); // Should be skipped when None
    }

    #[test]
    fn test_api_error_with_details_serialization() {
        let error = ApiError::with_details("TEST_ERROR", "Test message", "Some details");
        let json = serde_json::to_string(&error).unwrap();
        assert!(json.contains("\"details\":\"Some details\""));
    }

    #[test]
    fn test_state_violation_maps_to_conflict() {
        let error = PayrollError::StateViolation {
            state: PayrollState::Finalized,
        };
        let response: ApiErrorResponse = error.into();
        assert_eq!(response.status, StatusCode::CONFLICT);
        assert_eq!(response.error.code, "STATE_VIOLATION");
    }

    #[test]
    fn test_weekend_day_maps_to_bad_request() {
        let error = PayrollError::WeekendDay {
            day: 4,
            date: chrono::NaiveDate::from_ymd_opt(2025, 1, 4).unwrap(),
        };
        let response: ApiErrorResponse = error.into();
        assert_eq!(response.status, StatusCode::BAD_REQUEST);
        assert_eq!(response.error.code, "WEEKEND_DAY");
    }

    #[test]
    fn test_persistence_maps_to_bad_gateway() {
        let error = PayrollError::Persistence {
            operation: "save stimuli".to_string(),
            message: "connection reset".to_string(),
        };
        let response: ApiErrorResponse = error.into();
        assert_eq!(response.status, StatusCode::BAD_GATEWAY);
        assert_eq!(response.error.code, "PERSISTENCE_FAILURE");
    }
}
