//! Access gate middleware.
//!
//! Classifies the matched route through the [`RouteTable`] and runs the
//! [`AccessGate`]. Accepted protected requests carry their [`Principal`]
//! in the request extensions for [`CurrentUser`](crate::extractors::CurrentUser).

use std::sync::Arc;

use axum::extract::{MatchedPath, Request, State};
use axum::http::header;
use axum::middleware::Next;
use axum::response::Response;

use stockroom_auth::{AccessGate, Principal, RouteTable};

use crate::error::ApiError;

/// State handed to [`access_gate`].
#[derive(Debug, Clone)]
pub struct GateLayerState {
    /// Per-request access decision.
    pub gate: Arc<AccessGate>,
    /// Public/protected classification of the router's paths.
    pub routes: Arc<RouteTable>,
}

/// Rejects protected requests without a current session with `401`.
pub async fn access_gate(
    State(layer): State<GateLayerState>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let path = request
        .extensions()
        .get::<MatchedPath>()
        .map(|p| p.as_str().to_owned());
    let access = layer.routes.access_for(path.as_deref());

    let authorization = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .map(str::to_owned);

    let principal: Option<Principal> = layer.gate.check(access, authorization.as_deref()).await?;
    if let Some(principal) = principal {
        request.extensions_mut().insert(principal);
    }

    Ok(next.run(request).await)
}
