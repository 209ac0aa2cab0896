use crate::{
    dtos::auth::{AuthStatusResponse, LoginBody},
    error::ApiError,
    session::COORDINATOR_FLAG,
    state::AppState,
};
use axum::{Json, extract::State};
use serde_json::json;
use tower_sessions::Session;

/// Coordinator login against the configured shared credential
#[utoipa::path(
    post,
    path = "/api/login",
    request_body = LoginBody,
    responses(
        (status = 200, description = "Login successful"),
        (status = 400, description = "Missing username or password"),
        (status = 401, description = "Invalid username or password")
    ),
    tag = "Authentication"
)]
pub async fn login(
    State(state): State<AppState>,
    session: Session,
    Json(body): Json<LoginBody>,
) -> Result<Json<serde_json::Value>, ApiError> {
    if body.username.is_empty() || body.password.is_empty() {
        return Err(ApiError::Validation(
            "Username and password are required".to_owned(),
        ));
    }

    if body.username != state.config.coordinator_username
        || body.password != state.config.coordinator_password
    {
        return Err(ApiError::Unauthorized);
    }

    session
        .insert(COORDINATOR_FLAG, true)
        .await
        .map_err(|err| ApiError::Internal(err.to_string()))?;

    Ok(Json(json!({ "success": true, "message": "Login successful" })))
}

/// Reports whether the current session carries the coordinator flag
#[utoipa::path(
    get,
    path = "/api/check-auth",
    responses(
        (status = 200, description = "Authentication state", body = AuthStatusResponse)
    ),
    tag = "Authentication"
)]
pub async fn check_auth(session: Session) -> Json<AuthStatusResponse> {
    let is_authenticated = matches!(session.get::<bool>(COORDINATOR_FLAG).await, Ok(Some(true)));

    Json(AuthStatusResponse { is_authenticated })
}

/// Ends the coordinator session
#[utoipa::path(
    post,
    path = "/api/logout",
    responses(
        (status = 200, description = "Logged out")
    ),
    tag = "Authentication"
)]
pub async fn logout(session: Session) -> Result<Json<serde_json::Value>, ApiError> {
    session
        .flush()
        .await
        .map_err(|err| ApiError::Internal(err.to_string()))?;

    Ok(Json(
        json!({ "success": true, "message": "Logged out successfully" }),
    ))
}
