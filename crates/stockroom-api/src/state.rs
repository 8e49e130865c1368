//! Application state shared across all handlers and middleware.

use std::sync::Arc;

use stockroom_auth::{AccessGate, PasswordHasher, TokenIssuer};
use stockroom_core::config::AppConfig;
use stockroom_core::result::AppResult;
use stockroom_database::IdentityStore;
use stockroom_service::AuthService;

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`.
/// All fields are `Arc`-wrapped for cheap cloning across tasks.
#[derive(Clone)]
pub struct AppState {
    /// Application configuration
    pub config: Arc<AppConfig>,
    /// Persisted user records
    pub store: Arc<dyn IdentityStore>,
    /// Signup, signin, signout
    pub auth_service: Arc<AuthService>,
    /// Per-request access decision
    pub gate: Arc<AccessGate>,
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("config", &self.config)
            .field("auth_service", &self.auth_service)
            .field("gate", &self.gate)
            .finish()
    }
}

impl AppState {
    /// Wires the auth components over the given identity store.
    pub fn new(config: AppConfig, store: Arc<dyn IdentityStore>) -> AppResult<Self> {
        let hasher = PasswordHasher::new(&config.auth)?;
        let issuer = TokenIssuer::new(&config.auth);

        let auth_service = Arc::new(AuthService::new(
            Arc::clone(&store),
            hasher,
            issuer.clone(),
        ));
        let gate = Arc::new(AccessGate::new(issuer, Arc::clone(&store)));

        Ok(Self {
            config: Arc::new(config),
            store,
            auth_service,
            gate,
        })
    }
}
