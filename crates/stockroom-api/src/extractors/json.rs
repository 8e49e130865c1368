//! JSON body extractor with `validator` checks.

use axum::Json;
use axum::extract::{FromRequest, Request};
use serde::de::DeserializeOwned;
use validator::Validate;

use stockroom_core::error::AppError;

use crate::error::ApiError;

/// Deserializes a JSON body and runs its validation rules.
///
/// Every rejection (missing body, wrong content type, malformed JSON, or a
/// failed rule) becomes a `400`.
#[derive(Debug, Clone)]
pub struct ValidatedJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| AppError::bad_request(rejection.body_text()))?;

        value
            .validate()
            .map_err(|e| AppError::validation(format!("Invalid request body: {e}")))?;

        Ok(Self(value))
    }
}
