//! User lookup handler.

use axum::Json;
use axum::extract::{Path, State};

use stockroom_core::error::AppError;
use stockroom_database::IdentityStore;

use crate::dto::response::UserResponse;
use crate::error::ApiError;
use crate::state::AppState;

/// GET /users/{id}
pub async fn get_user(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> Result<Json<UserResponse>, ApiError> {
    let id = raw_id
        .parse::<i64>()
        .ok()
        .filter(|id| *id > 0)
        .ok_or_else(|| AppError::bad_request(format!("Invalid user id '{raw_id}'")))?;

    let user = state
        .store
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("User {id} not found")))?;

    Ok(Json(UserResponse::from(&user)))
}
