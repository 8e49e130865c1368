//! Credential handlers: signup, signin, signout, whoami.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;

use crate::dto::request::CredentialsRequest;
use crate::dto::response::SessionResponse;
use crate::error::ApiError;
use crate::extractors::{CurrentUser, ValidatedJson};
use crate::state::AppState;

/// POST /signup
pub async fn signup(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<CredentialsRequest>,
) -> Result<(StatusCode, Json<SessionResponse>), ApiError> {
    let user = state.auth_service.signup(&req.email, &req.password).await?;
    Ok((StatusCode::CREATED, Json(SessionResponse::try_from(user)?)))
}

/// GET|POST /signin
pub async fn signin(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<CredentialsRequest>,
) -> Result<Json<SessionResponse>, ApiError> {
    let user = state.auth_service.signin(&req.email, &req.password).await?;
    Ok(Json(SessionResponse::try_from(user)?))
}

/// POST /signout
pub async fn signout(
    State(state): State<AppState>,
    CurrentUser(principal): CurrentUser,
) -> Result<StatusCode, ApiError> {
    state.auth_service.signout(&principal.email).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// GET /whoami
pub async fn whoami(CurrentUser(principal): CurrentUser) -> Json<SessionResponse> {
    Json(principal.into())
}
