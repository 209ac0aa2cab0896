use crate::error::ApiError;
use axum::{extract::FromRequestParts, http::request::Parts};
use tower_sessions::Session;

/// Session key set on successful coordinator login.
pub const COORDINATOR_FLAG: &str = "is_coordinator";

/// Extractor guarding coordinator-only routes. Rejects with 401 before the
/// handler body runs, so guarded operations have no side effects when the
/// flag is absent.
pub struct Coordinator;

impl<S> FromRequestParts<S> for Coordinator
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let session = Session::from_request_parts(parts, state)
            .await
            .map_err(|_| ApiError::Unauthorized)?;

        match session.get::<bool>(COORDINATOR_FLAG).await {
            Ok(Some(true)) => Ok(Coordinator),
            _ => Err(ApiError::Unauthorized),
        }
    }
}
