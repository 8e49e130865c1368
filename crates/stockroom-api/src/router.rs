//! Route definitions for the Stockroom HTTP API.
//!
//! Every route is registered together with its access level, so the router
//! and the gate's [`RouteTable`] cannot drift apart.

use std::sync::Arc;

use axum::{
    Router, middleware as axum_middleware,
    routing::{MethodRouter, get, post},
};

use stockroom_auth::{RouteAccess, RouteTable};

use crate::handlers;
use crate::middleware::gate::{GateLayerState, access_gate};
use crate::state::AppState;

/// Router under construction plus the access level of each path.
#[derive(Default)]
struct Routes {
    router: Router<AppState>,
    table: RouteTable,
}

impl Routes {
    fn public(self, path: &str, handler: MethodRouter<AppState>) -> Self {
        self.add(path, handler, RouteAccess::Public)
    }

    fn protected(self, path: &str, handler: MethodRouter<AppState>) -> Self {
        self.add(path, handler, RouteAccess::Protected)
    }

    fn add(mut self, path: &str, handler: MethodRouter<AppState>, access: RouteAccess) -> Self {
        self.table.insert(path, access);
        self.router = self.router.route(path, handler);
        self
    }
}

/// Build the Axum router with the access gate applied to every route.
pub fn build_router(state: AppState) -> Router {
    let Routes { router, table } = Routes::default()
        // Credentials
        .public("/signup", post(handlers::auth::signup))
        .public(
            "/signin",
            get(handlers::auth::signin).post(handlers::auth::signin),
        )
        .protected("/signout", post(handlers::auth::signout))
        .protected("/whoami", get(handlers::auth::whoami))
        // Users
        .protected("/users/{id}", get(handlers::user::get_user))
        // Health
        .public("/health", get(handlers::health::health));

    tracing::debug!(routes = table.len(), "Route table built");

    let gate_state = GateLayerState {
        gate: Arc::clone(&state.gate),
        routes: Arc::new(table),
    };

    router
        .route_layer(axum_middleware::from_fn_with_state(gate_state, access_gate))
        .with_state(state)
}
