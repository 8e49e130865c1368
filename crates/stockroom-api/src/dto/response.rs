//! Response DTOs.

use serde::{Deserialize, Serialize};

use stockroom_auth::Principal;
use stockroom_core::error::AppError;
use stockroom_entity::user::User;

/// An account together with its current bearer token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionResponse {
    /// User id.
    pub id: i64,
    /// Account email.
    pub email: String,
    /// Bearer token to present on protected routes.
    pub token: String,
}

impl TryFrom<User> for SessionResponse {
    type Error = AppError;

    fn try_from(user: User) -> Result<Self, Self::Error> {
        let token = user
            .session_token
            .ok_or_else(|| AppError::internal("Signed-in user has no session token"))?;

        Ok(Self {
            id: user.id,
            email: user.email,
            token,
        })
    }
}

impl From<Principal> for SessionResponse {
    fn from(principal: Principal) -> Self {
        Self {
            id: principal.user_id,
            email: principal.email,
            token: principal.token,
        }
    }
}

/// Public view of a user record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserResponse {
    /// User id.
    pub id: i64,
    /// Account email.
    pub email: String,
    /// Whether the account currently holds a session.
    pub signed_in: bool,
}

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            email: user.email.clone(),
            signed_in: user.is_signed_in(),
        }
    }
}

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// `"ok"` or `"degraded"`.
    pub status: String,
    /// Crate version.
    pub version: String,
    /// `"connected"` or `"unavailable"`.
    pub database: String,
}
