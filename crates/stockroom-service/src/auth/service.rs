//! Signup, signin, and signout.

use std::sync::Arc;

use tracing::{info, warn};

use stockroom_auth::error::AuthError;
use stockroom_auth::jwt::TokenIssuer;
use stockroom_auth::password::PasswordHasher;
use stockroom_core::error::{AppError, ErrorKind};
use stockroom_database::IdentityStore;
use stockroom_entity::user::{CreateUser, User};

use super::locks::AccountLocks;

/// Orchestrates account credentials.
///
/// Holds no state of its own beyond the per-account lock table. Each
/// operation runs under the lock for its email, so concurrent calls for one
/// account never interleave their read-then-write steps.
#[derive(Clone)]
pub struct AuthService {
    store: Arc<dyn IdentityStore>,
    hasher: PasswordHasher,
    issuer: TokenIssuer,
    locks: AccountLocks,
}

impl std::fmt::Debug for AuthService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthService")
            .field("hasher", &self.hasher)
            .field("issuer", &self.issuer)
            .finish()
    }
}

impl AuthService {
    /// Creates a new auth service.
    pub fn new(store: Arc<dyn IdentityStore>, hasher: PasswordHasher, issuer: TokenIssuer) -> Self {
        Self {
            store,
            hasher,
            issuer,
            locks: AccountLocks::new(),
        }
    }

    /// Registers a new account and signs it in.
    ///
    /// The returned user carries the fresh session token.
    pub async fn signup(&self, email: &str, password: &str) -> Result<User, AuthError> {
        let _guard = self.locks.acquire(email).await;

        if self.store.find_by_email(email).await?.is_some() {
            warn!(email = %email, "Signup rejected: email already registered");
            return Err(AuthError::DuplicateEmail);
        }

        let password_hash = self.hash_password(password).await?;

        let user = match self
            .store
            .create(&CreateUser {
                email: email.to_string(),
                password_hash,
            })
            .await
        {
            Ok(user) => user,
            Err(e) if e.is(ErrorKind::Conflict) => {
                warn!(email = %email, "Signup lost a race on the same email");
                return Err(AuthError::DuplicateEmail);
            }
            Err(e) => return Err(e.into()),
        };

        let user = self.start_session(&user).await?;
        info!(user_id = user.id, email = %user.email, "Account created");
        Ok(user)
    }

    /// Verifies credentials and replaces the account's session token.
    ///
    /// Any token issued before this call stops being accepted. A wrong
    /// password leaves the stored token untouched.
    pub async fn signin(&self, email: &str, password: &str) -> Result<User, AuthError> {
        let _guard = self.locks.acquire(email).await;

        let user = self
            .store
            .find_by_email(email)
            .await?
            .ok_or(AuthError::AccountNotFound)?;

        if !self.verify_password(password, &user.password_hash).await? {
            warn!(user_id = user.id, "Signin rejected: invalid credentials");
            return Err(AuthError::InvalidCredentials);
        }

        let user = self.start_session(&user).await?;
        info!(user_id = user.id, "User signed in");
        Ok(user)
    }

    /// Clears the account's session token. Repeated calls succeed.
    pub async fn signout(&self, email: &str) -> Result<(), AuthError> {
        let _guard = self.locks.acquire(email).await;

        let user = self
            .store
            .find_by_email(email)
            .await?
            .ok_or(AuthError::AccountNotFound)?;

        self.store
            .set_session_token(user.id, None)
            .await
            .map_err(account_vanished)?;

        info!(user_id = user.id, "User signed out");
        Ok(())
    }

    /// Issues a token for the user and stores it as the current session.
    async fn start_session(&self, user: &User) -> Result<User, AuthError> {
        let token = self.issuer.issue(user.id, &user.email)?;
        self.store
            .set_session_token(user.id, Some(&token))
            .await
            .map_err(account_vanished)
    }

    async fn hash_password(&self, password: &str) -> Result<String, AuthError> {
        let hasher = self.hasher.clone();
        let password = password.to_string();
        let digest = tokio::task::spawn_blocking(move || hasher.hash(&password))
            .await
            .map_err(|e| AppError::internal(format!("Password hashing task failed: {e}")))??;
        Ok(digest)
    }

    async fn verify_password(&self, password: &str, digest: &str) -> Result<bool, AuthError> {
        let hasher = self.hasher.clone();
        let password = password.to_string();
        let digest = digest.to_string();
        let matches = tokio::task::spawn_blocking(move || hasher.verify(&password, &digest))
            .await
            .map_err(|e| {
                AppError::internal(format!("Password verification task failed: {e}"))
            })??;
        Ok(matches)
    }
}

/// A user deleted between lookup and update reads as an unknown account.
fn account_vanished(err: AppError) -> AuthError {
    if err.is(ErrorKind::NotFound) {
        AuthError::AccountNotFound
    } else {
        AuthError::Store(err)
    }
}
