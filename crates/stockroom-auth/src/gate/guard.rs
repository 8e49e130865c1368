//! The access decision for a single request.

use std::sync::Arc;

use tracing::debug;

use stockroom_database::IdentityStore;

use super::access::RouteAccess;
use super::principal::Principal;
use crate::error::AuthError;
use crate::jwt::TokenIssuer;

/// Decides whether a request may reach its handler.
///
/// Public routes pass without any checks. Protected routes need a bearer
/// token that verifies and equals the session token stored for its subject.
/// Every rejection is reported as [`AuthError::Unauthorized`]; the cause is
/// only logged at debug level. Store failures propagate as
/// [`AuthError::Store`].
#[derive(Clone)]
pub struct AccessGate {
    issuer: TokenIssuer,
    store: Arc<dyn IdentityStore>,
}

impl std::fmt::Debug for AccessGate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AccessGate")
            .field("issuer", &self.issuer)
            .finish()
    }
}

impl AccessGate {
    /// Creates a gate over the given issuer and store.
    pub fn new(issuer: TokenIssuer, store: Arc<dyn IdentityStore>) -> Self {
        Self { issuer, store }
    }

    /// Runs the gate for a route with the given `Authorization` header value.
    ///
    /// Returns `Ok(None)` for public routes and `Ok(Some(principal))` for an
    /// accepted protected request.
    pub async fn check(
        &self,
        access: RouteAccess,
        authorization: Option<&str>,
    ) -> Result<Option<Principal>, AuthError> {
        if access.is_public() {
            return Ok(None);
        }
        self.authenticate(authorization).await.map(Some)
    }

    /// Resolves the principal behind an `Authorization` header value.
    pub async fn authenticate(&self, authorization: Option<&str>) -> Result<Principal, AuthError> {
        let Some(header) = authorization else {
            debug!("Rejected: missing Authorization header");
            return Err(AuthError::Unauthorized);
        };

        let token = bearer_token(header).ok_or_else(|| {
            debug!("Rejected: malformed Authorization header");
            AuthError::Unauthorized
        })?;

        let claims = self.issuer.verify(token).map_err(|e| {
            debug!(error = %e, "Rejected: token failed verification");
            AuthError::Unauthorized
        })?;

        let user = self.store.find_by_id(claims.sub).await?.ok_or_else(|| {
            debug!(user_id = claims.sub, "Rejected: token subject does not exist");
            AuthError::Unauthorized
        })?;

        if !user.holds_session(token) {
            debug!(user_id = user.id, "Rejected: token is not the current session");
            return Err(AuthError::Unauthorized);
        }

        Ok(Principal {
            user_id: user.id,
            email: user.email,
            token: token.to_string(),
        })
    }
}

/// Extracts the token from a `Bearer <token>` header value.
fn bearer_token(header: &str) -> Option<&str> {
    let (scheme, token) = header.trim().split_once(' ')?;
    let token = token.trim();
    (scheme.eq_ignore_ascii_case("bearer") && !token.is_empty()).then_some(token)
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use chrono::Duration;
    use stockroom_core::error::{AppError, ErrorKind};
    use stockroom_core::result::AppResult;
    use stockroom_database::MemoryIdentityStore;
    use stockroom_entity::user::{CreateUser, User};

    const SECRET: &str = "gate-secret";

    struct Fixture {
        gate: AccessGate,
        issuer: TokenIssuer,
        store: MemoryIdentityStore,
    }

    fn fixture() -> Fixture {
        let issuer = TokenIssuer::from_secret(SECRET, Duration::hours(1));
        let store = MemoryIdentityStore::new();
        Fixture {
            gate: AccessGate::new(issuer.clone(), Arc::new(store.clone())),
            issuer,
            store,
        }
    }

    /// Creates a user holding a freshly issued session and returns its token.
    async fn signed_in(f: &Fixture, email: &str) -> (i64, String) {
        let user = f
            .store
            .create(&CreateUser {
                email: email.to_string(),
                password_hash: "$argon2id$stub".to_string(),
            })
            .await
            .unwrap();
        let token = f.issuer.issue(user.id, email).unwrap();
        f.store
            .set_session_token(user.id, Some(&token))
            .await
            .unwrap();
        (user.id, token)
    }

    #[test]
    fn test_bearer_token_parsing() {
        assert_eq!(bearer_token("Bearer abc"), Some("abc"));
        assert_eq!(bearer_token("bearer abc"), Some("abc"));
        assert_eq!(bearer_token("Bearer "), None);
        assert_eq!(bearer_token("Bearer"), None);
        assert_eq!(bearer_token("Basic abc"), None);
        assert_eq!(bearer_token("abc"), None);
    }

    #[tokio::test]
    async fn test_public_route_needs_no_header() {
        let f = fixture();
        let outcome = f.gate.check(RouteAccess::Public, None).await.unwrap();
        assert!(outcome.is_none());

        let outcome = f
            .gate
            .check(RouteAccess::Public, Some("Bearer garbage"))
            .await
            .unwrap();
        assert!(outcome.is_none());
    }

    #[tokio::test]
    async fn test_current_session_is_accepted() {
        let f = fixture();
        let (id, token) = signed_in(&f, "a@x.com").await;

        let principal = f
            .gate
            .check(RouteAccess::Protected, Some(&format!("Bearer {token}")))
            .await
            .unwrap()
            .unwrap();

        assert_eq!(principal.user_id, id);
        assert_eq!(principal.email, "a@x.com");
        assert_eq!(principal.token, token);
    }

    #[tokio::test]
    async fn test_missing_or_malformed_header_is_unauthorized() {
        let f = fixture();
        let (_, token) = signed_in(&f, "a@x.com").await;

        for header in [None, Some(token.as_str()), Some("Bearer"), Some("Token x")] {
            let err = f.gate.check(RouteAccess::Protected, header).await.unwrap_err();
            assert!(matches!(err, AuthError::Unauthorized));
        }
    }

    #[tokio::test]
    async fn test_replaced_session_is_unauthorized() {
        let f = fixture();
        let (id, old) = signed_in(&f, "a@x.com").await;
        let new = f.issuer.issue(id, "a@x.com").unwrap();
        f.store.set_session_token(id, Some(&new)).await.unwrap();

        let err = f
            .gate
            .authenticate(Some(&format!("Bearer {old}")))
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::Unauthorized));
        assert!(f.gate.authenticate(Some(&format!("Bearer {new}"))).await.is_ok());
    }

    #[tokio::test]
    async fn test_signed_out_account_is_unauthorized() {
        let f = fixture();
        let (id, token) = signed_in(&f, "a@x.com").await;
        f.store.set_session_token(id, None).await.unwrap();

        let err = f
            .gate
            .authenticate(Some(&format!("Bearer {token}")))
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::Unauthorized));
    }

    #[tokio::test]
    async fn test_unknown_subject_is_unauthorized() {
        let f = fixture();
        let token = f.issuer.issue(99, "ghost@x.com").unwrap();

        let err = f
            .gate
            .authenticate(Some(&format!("Bearer {token}")))
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::Unauthorized));
    }

    #[tokio::test]
    async fn test_expired_token_is_unauthorized_not_invalid_token() {
        let f = fixture();
        let (id, _) = signed_in(&f, "a@x.com").await;
        let stale = TokenIssuer::from_secret(SECRET, Duration::hours(-1))
            .issue(id, "a@x.com")
            .unwrap();
        f.store.set_session_token(id, Some(&stale)).await.unwrap();

        let err = f
            .gate
            .authenticate(Some(&format!("Bearer {stale}")))
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::Unauthorized));
    }

    #[tokio::test]
    async fn test_token_from_another_secret_is_unauthorized() {
        let f = fixture();
        let (id, _) = signed_in(&f, "a@x.com").await;
        let forged = TokenIssuer::from_secret("other", Duration::hours(1))
            .issue(id, "a@x.com")
            .unwrap();
        f.store.set_session_token(id, Some(&forged)).await.unwrap();

        let err = f
            .gate
            .authenticate(Some(&format!("Bearer {forged}")))
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::Unauthorized));
    }

    /// Store whose lookups by id fail as if the database were unreachable.
    struct UnreachableStore;

    #[async_trait]
    impl IdentityStore for UnreachableStore {
        async fn find_by_email(&self, _email: &str) -> AppResult<Option<User>> {
            Ok(None)
        }

        async fn find_by_id(&self, _id: i64) -> AppResult<Option<User>> {
            Err(AppError::database("connection refused"))
        }

        async fn create(&self, _data: &CreateUser) -> AppResult<User> {
            Err(AppError::database("connection refused"))
        }

        async fn set_session_token(&self, _id: i64, _token: Option<&str>) -> AppResult<User> {
            Err(AppError::database("connection refused"))
        }

        async fn health_check(&self) -> AppResult<bool> {
            Ok(false)
        }
    }

    #[tokio::test]
    async fn test_store_failure_is_not_reported_as_unauthorized() {
        let issuer = TokenIssuer::from_secret(SECRET, Duration::hours(1));
        let gate = AccessGate::new(issuer.clone(), Arc::new(UnreachableStore));
        let token = issuer.issue(1, "a@x.com").unwrap();

        let err = gate
            .check(RouteAccess::Protected, Some(&format!("Bearer {token}")))
            .await
            .unwrap_err();
        match err {
            AuthError::Store(inner) => assert_eq!(inner.kind, ErrorKind::Database),
            other => panic!("expected a store error, got {other:?}"),
        }
    }
}
