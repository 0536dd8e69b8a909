//! Axum route handlers for the Reports API.

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    Json,
};
use serde::Serialize;
use uuid::Uuid;

use crate::auth::AuthUser;
use crate::errors::{AppError, REPORT_NOT_FOUND_MESSAGE};
use crate::models::profile::ProfileForm;
use crate::models::report::{CareerReport, ReportSummary};
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct CreateReportResponse {
    pub id: Uuid,
    pub report: CareerReport,
}

#[derive(Debug, Serialize)]
pub struct ReportListResponse {
    pub reports: Vec<ReportSummary>,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/reports
///
/// Validates the intake form, runs the analysis, and stores the result.
/// Nothing is stored when validation or generation fails. A body that is not
/// a JSON form is a validation error like any other.
pub async fn handle_create_report(
    State(state): State<AppState>,
    user: AuthUser,
    payload: Result<Json<ProfileForm>, JsonRejection>,
) -> Result<(StatusCode, Json<CreateReportResponse>), AppError> {
    let Json(form) = payload?;
    let profile = form.validate()?;
    let report = state.service.generate_report(&user, profile).await?;

    Ok((
        StatusCode::CREATED,
        Json(CreateReportResponse {
            id: report.id,
            report,
        }),
    ))
}

/// GET /api/v1/reports
///
/// Dashboard list for the caller, newest first. Empty when the caller has none.
pub async fn handle_list_reports(
    State(state): State<AppState>,
    user: AuthUser,
) -> Result<Json<ReportListResponse>, AppError> {
    let reports = state.service.list_reports(&user).await?;
    Ok(Json(ReportListResponse {
        reports: reports.iter().map(ReportSummary::from).collect(),
    }))
}

/// GET /api/v1/reports/:id
///
/// Full report. 404 for missing, malformed and foreign-owned ids alike.
pub async fn handle_get_report(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<String>,
) -> Result<Json<CareerReport>, AppError> {
    let id = Uuid::parse_str(&id)
        .map_err(|_| AppError::NotFound(REPORT_NOT_FOUND_MESSAGE.to_string()))?;
    let report = state.service.get_report(&user, id).await?;
    Ok(Json(report))
}
