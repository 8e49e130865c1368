//! `CurrentUser` extractor: the principal the access gate attached to the request.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use stockroom_auth::Principal;
use stockroom_core::error::AppError;

use crate::error::ApiError;

/// Authenticated caller of a protected route.
#[derive(Debug, Clone)]
pub struct CurrentUser(pub Principal);

impl std::ops::Deref for CurrentUser {
    type Target = Principal;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<S> FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        // Only present when the gate ran for a protected route.
        parts
            .extensions
            .get::<Principal>()
            .cloned()
            .map(CurrentUser)
            .ok_or_else(|| AppError::unauthorized("Unauthorized").into())
    }
}
