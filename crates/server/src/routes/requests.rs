use crate::{
    dtos::request::{
        DecisionBody, ListQuery, RequestResponse, SubmitRequestBody, SubmitResponse,
    },
    error::ApiError,
    session::Coordinator,
    state::AppState,
};
use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use database::entities::od_request::Model;
use models::status::RequestStatus;
use uuid::Uuid;

/// Submit an OD request (public). A range spanning K periods creates K
/// independent records awaiting individual decisions.
#[utoipa::path(
    post,
    path = "/api/requests",
    request_body = SubmitRequestBody,
    responses(
        (status = 201, description = "Requests created", body = SubmitResponse),
        (status = 400, description = "Missing or malformed field")
    ),
    tag = "Requests"
)]
pub async fn submit_request(
    State(state): State<AppState>,
    Json(body): Json<SubmitRequestBody>,
) -> Result<(StatusCode, Json<SubmitResponse>), ApiError> {
    let records = state.requests.submit(body.into()).await?;

    let message = format!("Created {} request(s)", records.len());
    Ok((
        StatusCode::CREATED,
        Json(SubmitResponse {
            message,
            requests: records.into_iter().map(Into::into).collect(),
        }),
    ))
}

/// List all stored requests, newest first (coordinator only)
#[utoipa::path(
    get,
    path = "/api/requests",
    params(ListQuery),
    responses(
        (status = 200, description = "Stored requests", body = Vec<RequestResponse>),
        (status = 400, description = "Unknown status filter"),
        (status = 401, description = "Not authenticated")
    ),
    security(("coordinator_session" = [])),
    tag = "Requests"
)]
pub async fn list_requests(
    _: Coordinator,
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<Json<Vec<RequestResponse>>, ApiError> {
    let status = match query.status.as_deref() {
        Some(raw) => Some(raw.parse::<RequestStatus>().map_err(ApiError::Validation)?),
        None => None,
    };

    let records = state.requests.list(status).await?;
    Ok(Json(records.into_iter().map(Into::into).collect()))
}

/// Approve or reject a pending request (coordinator only). The transition is
/// one-shot; deciding an already-decided request yields 409.
#[utoipa::path(
    put,
    path = "/api/requests/{id}",
    params(
        ("id" = Uuid, Path, description = "Request ID")
    ),
    request_body = DecisionBody,
    responses(
        (status = 200, description = "Request decided", body = RequestResponse),
        (status = 400, description = "Status was not \"Approved\" or \"Rejected\""),
        (status = 401, description = "Not authenticated"),
        (status = 404, description = "Unknown request ID"),
        (status = 409, description = "Request was already decided")
    ),
    security(("coordinator_session" = [])),
    tag = "Requests"
)]
pub async fn decide_request(
    _: Coordinator,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(body): Json<DecisionBody>,
) -> Result<Json<RequestResponse>, ApiError> {
    let record = match body.status.as_str() {
        "Approved" => state.requests.approve(id).await?,
        "Rejected" => state.requests.reject(id).await?,
        _ => {
            return Err(ApiError::Validation(
                "Status must be \"Approved\" or \"Rejected\"".to_owned(),
            ));
        }
    };

    notify_best_effort(&state, record.clone());

    Ok(Json(record.into()))
}

/// Fires the student decision notice without blocking the response. The
/// transition is already committed; a dead mail server only costs a log line.
fn notify_best_effort(state: &AppState, record: Model) {
    let mailer = state.mailer.clone();
    tokio::spawn(async move {
        if let Err(err) = mailer.send_decision_notice(&record).await {
            log::warn!(
                "failed to send decision notice for request {}: {err}",
                record.id
            );
        }
    });
}
