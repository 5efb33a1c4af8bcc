//! HTTP request handlers for the Fortnightly Payroll Engine API.
//!
//! This module contains the handler functions for all API endpoints. The
//! routes follow the backend contract: a period is addressed as
//! `/periodos/:anio/:mes/:quincena`, saves are full-replace PUTs, and the
//! lifecycle advances through explicit `finalizar`/`archivar` POSTs.

use axum::{
    Json, Router,
    extract::{Path, State, rejection::JsonRejection},
    routing::{get, post, put},
};
use tracing::{info, warn};
use uuid::Uuid;

use crate::error::PayrollError;
use crate::models::{
    ArchivedPayroll, Fortnight, FortnightPayroll, PayrollPeriod, PayrollTotals, RoleSummary,
};

use super::request::{SaveSalariesRequest, SaveStimuliRequest};
use super::response::{ApiError, ApiErrorResponse, SaveSalariesResponse, SaveStimuliResponse};
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/periodos/:anio/:mes/:quincena", get(load_period_handler))
        .route("/periodos/:anio/:mes/:quincena/resumen", get(summary_handler))
        .route("/periodos/:anio/:mes/:quincena/cargos", get(role_summary_handler))
        .route(
            "/periodos/:anio/:mes/:quincena/estimulos",
            put(save_stimuli_handler),
        )
        .route(
            "/periodos/:anio/:mes/:quincena/estimulos/finalizar",
            post(finalize_stimuli_handler),
        )
        .route(
            "/periodos/:anio/:mes/:quincena/salarios",
            put(save_salaries_handler),
        )
        .route(
            "/periodos/:anio/:mes/:quincena/salarios/finalizar",
            post(finalize_salaries_handler),
        )
        .route(
            "/periodos/:anio/:mes/:quincena/finalizar",
            post(finalize_period_handler),
        )
        .route(
            "/periodos/:anio/:mes/:quincena/archivar",
            post(archive_handler),
        )
        .route("/archivo/:anio/:mes/:quincena", get(archived_handler))
        .with_state(state)
}

/// Builds a period from path segments, rejecting bad components early.
fn parse_period(year: i32, month: u32, quincena: u8) -> Result<PayrollPeriod, ApiErrorResponse> {
    let fortnight = Fortnight::try_from(quincena)
        .map_err(|message| PayrollError::InvalidPeriod { message })?;
    Ok(PayrollPeriod::new(year, month, fortnight)?)
}

/// Unwraps a JSON body, mapping axum rejections to API errors.
fn parse_json<T>(
    payload: Result<Json<T>, JsonRejection>,
    correlation_id: Uuid,
) -> Result<T, ApiErrorResponse> {
    match payload {
        Ok(Json(body)) => Ok(body),
        Err(rejection) => {
            let error = match rejection {
                JsonRejection::JsonDataError(err) => {
                    let body_text = err.body_text();
                    warn!(
                        correlation_id = %correlation_id,
                        error = %body_text,
                        "JSON data error"
                    );
                    if body_text.contains("missing field") {
                        ApiError::new("VALIDATION_ERROR", body_text)
                    } else {
                        ApiError::malformed_json(body_text)
                    }
                }
                JsonRejection::JsonSyntaxError(err) => {
                    warn!(
                        correlation_id = %correlation_id,
                        error = %err,
                        "JSON syntax error"
                    );
                    ApiError::malformed_json(format!("Invalid JSON syntax: {}", err))
                }
                JsonRejection::MissingJsonContentType(_) => {
                    ApiError::new("MISSING_CONTENT_TYPE", "Content-Type must be application/json")
                }
                _ => ApiError::malformed_json("Failed to parse request body"),
            };
            Err(ApiErrorResponse {
                status: axum::http::StatusCode::BAD_REQUEST,
                error,
            })
        }
    }
}

/// Handler for GET /periodos/:anio/:mes/:quincena.
///
/// Loads the payroll for a period; absence of a record is not an error, a
/// fresh draft is synthesized with one line per active worker.
async fn load_period_handler(
    State(state): State<AppState>,
    Path((year, month, quincena)): Path<(i32, u32, u8)>,
) -> Result<Json<FortnightPayroll>, ApiErrorResponse> {
    let correlation_id = Uuid::new_v4();
    let period = parse_period(year, month, quincena)?;
    info!(correlation_id = %correlation_id, %period, "Loading payroll");

    let payroll = state.engine().load_or_create(period).await?;
    Ok(Json(payroll))
}

/// Handler for GET /periodos/:anio/:mes/:quincena/resumen.
async fn summary_handler(
    State(state): State<AppState>,
    Path((year, month, quincena)): Path<(i32, u32, u8)>,
) -> Result<Json<PayrollTotals>, ApiErrorResponse> {
    let period = parse_period(year, month, quincena)?;
    let totals = state.engine().summary(period).await?;
    Ok(Json(totals))
}

/// Handler for GET /periodos/:anio/:mes/:quincena/cargos.
async fn role_summary_handler(
    State(state): State<AppState>,
    Path((year, month, quincena)): Path<(i32, u32, u8)>,
) -> Result<Json<Vec<RoleSummary>>, ApiErrorResponse> {
    let period = parse_period(year, month, quincena)?;
    let summary = state.engine().role_summary(period).await?;
    Ok(Json(summary))
}

/// Handler for PUT /periodos/:anio/:mes/:quincena/estimulos.
///
/// Persists the full percentage map without advancing the lifecycle and
/// returns the allocation report alongside the stored payroll.
async fn save_stimuli_handler(
    State(state): State<AppState>,
    Path((year, month, quincena)): Path<(i32, u32, u8)>,
    payload: Result<Json<SaveStimuliRequest>, JsonRejection>,
) -> Result<Json<SaveStimuliResponse>, ApiErrorResponse> {
    let correlation_id = Uuid::new_v4();
    let period = parse_period(year, month, quincena)?;
    let request = parse_json(payload, correlation_id)?;

    let mut session = state.engine().stimulus_session(period).await?;
    session.set_percentages(&request.percentages)?;
    let allocation = session.save().await?;

    info!(
        correlation_id = %correlation_id,
        %period,
        workers = request.percentages.len(),
        warnings = allocation.warnings.len(),
        "Stimulus percentages saved"
    );
    Ok(Json(SaveStimuliResponse {
        payroll: session.payroll().clone(),
        allocation,
    }))
}

/// Handler for POST /periodos/:anio/:mes/:quincena/estimulos/finalizar.
async fn finalize_stimuli_handler(
    State(state): State<AppState>,
    Path((year, month, quincena)): Path<(i32, u32, u8)>,
) -> Result<Json<FortnightPayroll>, ApiErrorResponse> {
    let period = parse_period(year, month, quincena)?;
    let mut session = state.engine().stimulus_session(period).await?;
    let payroll = session.finalize().await?;
    Ok(Json(payroll))
}

/// Handler for PUT /periodos/:anio/:mes/:quincena/salarios.
///
/// Replaces the non-worked-day set per worker, recomputing salaries and
/// allowance adjustments before the lines are persisted.
async fn save_salaries_handler(
    State(state): State<AppState>,
    Path((year, month, quincena)): Path<(i32, u32, u8)>,
    payload: Result<Json<SaveSalariesRequest>, JsonRejection>,
) -> Result<Json<SaveSalariesResponse>, ApiErrorResponse> {
    let correlation_id = Uuid::new_v4();
    let period = parse_period(year, month, quincena)?;
    let request = parse_json(payload, correlation_id)?;

    let mut session = state.engine().salary_session(period).await?;
    for (ci, days) in &request.non_worked_days {
        session.set_non_worked_days(ci, days)?;
    }
    session.save().await?;

    let totals = session.totals();
    info!(
        correlation_id = %correlation_id,
        %period,
        days_not_worked = totals.days_not_worked,
        "Salary proration saved"
    );
    Ok(Json(SaveSalariesResponse {
        payroll: session.payroll().clone(),
        totals,
    }))
}

/// Handler for POST /periodos/:anio/:mes/:quincena/salarios/finalizar.
async fn finalize_salaries_handler(
    State(state): State<AppState>,
    Path((year, month, quincena)): Path<(i32, u32, u8)>,
) -> Result<Json<FortnightPayroll>, ApiErrorResponse> {
    let period = parse_period(year, month, quincena)?;
    let mut session = state.engine().salary_session(period).await?;
    let payroll = session.finalize().await?;
    Ok(Json(payroll))
}

/// Handler for POST /periodos/:anio/:mes/:quincena/finalizar.
async fn finalize_period_handler(
    State(state): State<AppState>,
    Path((year, month, quincena)): Path<(i32, u32, u8)>,
) -> Result<Json<FortnightPayroll>, ApiErrorResponse> {
    let period = parse_period(year, month, quincena)?;
    let payroll = state.engine().finalize(period).await?;
    Ok(Json(payroll))
}

/// Handler for POST /periodos/:anio/:mes/:quincena/archivar.
async fn archive_handler(
    State(state): State<AppState>,
    Path((year, month, quincena)): Path<(i32, u32, u8)>,
) -> Result<Json<ArchivedPayroll>, ApiErrorResponse> {
    let period = parse_period(year, month, quincena)?;
    let archive = state.engine().archive(period).await?;
    info!(%period, net = %archive.totals.net, "Payroll archived");
    Ok(Json(archive))
}

/// Handler for GET /archivo/:anio/:mes/:quincena.
///
/// Reads a frozen fortnight; viewing history never touches the live
/// period.
async fn archived_handler(
    State(state): State<AppState>,
    Path((year, month, quincena)): Path<(i32, u32, u8)>,
) -> Result<Json<ArchivedPayroll>, ApiErrorResponse> {
    let period = parse_period(year, month, quincena)?;
    match state.engine().archived(period).await? {
        Some(archive) => Ok(Json(archive)),
        None => Err(ApiErrorResponse {
            status: axum::http::StatusCode::NOT_FOUND,
            error: ApiError::archive_not_found(period),
        }),
    }
}
