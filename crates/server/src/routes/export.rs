use crate::{
    dtos::request::{EmailReportBody, EmailReportResponse},
    error::ApiError,
    report,
    session::Coordinator,
    state::AppState,
};
use axum::{
    Json,
    extract::State,
    http::header,
    response::{IntoResponse, Response},
};

const XLSX_MIME: &str = "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

/// Download the approved requests as a spreadsheet (coordinator only).
/// A successful export purges every approved and rejected record; the batch
/// is considered filed.
#[utoipa::path(
    get,
    path = "/api/export",
    responses(
        (status = 200, description = "Spreadsheet attachment", content_type = "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet"),
        (status = 401, description = "Not authenticated"),
        (status = 404, description = "No approved requests to export")
    ),
    security(("coordinator_session" = [])),
    tag = "Export"
)]
pub async fn export_approved(
    _: Coordinator,
    State(state): State<AppState>,
) -> Result<Response, ApiError> {
    let _guard = state.export_lock.lock().await;

    let approved = state.requests.approved().await?;
    if approved.is_empty() {
        return Err(ApiError::NotFound("No approved requests found".to_owned()));
    }

    let workbook =
        report::render_workbook(&approved).map_err(|err| ApiError::Internal(err.to_string()))?;

    let deleted = state.requests.purge_processed().await?;
    log::info!(
        "exported {} approved requests, purged {deleted} processed records",
        approved.len()
    );

    let headers = [
        (header::CONTENT_TYPE, XLSX_MIME),
        (
            header::CONTENT_DISPOSITION,
            "attachment; filename=approved-od-requests.xlsx",
        ),
    ];
    Ok((headers, workbook).into_response())
}

/// Email the approved-requests report as an attachment (coordinator only).
/// Records are purged only after the send is confirmed; a transport failure
/// leaves storage untouched.
#[utoipa::path(
    post,
    path = "/api/export-email",
    request_body = EmailReportBody,
    responses(
        (status = 200, description = "Report sent and records purged", body = EmailReportResponse),
        (status = 400, description = "Missing recipient address"),
        (status = 401, description = "Not authenticated"),
        (status = 404, description = "No approved requests to report"),
        (status = 500, description = "Email delivery failed; nothing purged")
    ),
    security(("coordinator_session" = [])),
    tag = "Export"
)]
pub async fn email_report(
    _: Coordinator,
    State(state): State<AppState>,
    Json(body): Json<EmailReportBody>,
) -> Result<Json<EmailReportResponse>, ApiError> {
    if body.email.trim().is_empty() {
        return Err(ApiError::Validation("Email is required".to_owned()));
    }

    let _guard = state.export_lock.lock().await;

    let approved = state.requests.approved().await?;
    if approved.is_empty() {
        return Err(ApiError::NotFound("No approved requests found".to_owned()));
    }

    let workbook =
        report::render_workbook(&approved).map_err(|err| ApiError::Internal(err.to_string()))?;

    state
        .mailer
        .send_report(
            body.email.trim(),
            body.subject.as_deref(),
            body.message.as_deref(),
            workbook,
        )
        .await
        .map_err(|err| ApiError::Internal(format!("failed to send report email: {err}")))?;

    let deleted = state.requests.purge_processed().await?;

    Ok(Json(EmailReportResponse {
        success: true,
        message: format!(
            "Report sent to {}. {deleted} processed requests were removed from storage.",
            body.email.trim()
        ),
        request_count: approved.len(),
        deleted_count: deleted,
    }))
}
