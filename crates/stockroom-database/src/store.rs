//! Identity store abstraction.

use async_trait::async_trait;

use stockroom_core::result::AppResult;
use stockroom_entity::user::{CreateUser, User};

/// Persisted user records as seen by the authentication layer.
///
/// Every call is independently consistent, but no sequence of calls is
/// transactional. Two implementations are provided:
/// - [`UserRepository`](crate::repositories::UserRepository) backed by PostgreSQL
/// - [`MemoryIdentityStore`](crate::memory::MemoryIdentityStore) for tests and local runs
#[async_trait]
pub trait IdentityStore: Send + Sync + 'static {
    /// Find a user by email (case-insensitive).
    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>>;

    /// Find a user by primary key.
    async fn find_by_id(&self, id: i64) -> AppResult<Option<User>>;

    /// Create a new user with no session.
    ///
    /// Fails with a `Conflict` error when the email is already registered.
    async fn create(&self, data: &CreateUser) -> AppResult<User>;

    /// Replace the user's session token, or clear it with `None`.
    ///
    /// Fails with a `NotFound` error when the user does not exist.
    async fn set_session_token(&self, id: i64, token: Option<&str>) -> AppResult<User>;

    /// Check that the backing store is reachable.
    async fn health_check(&self) -> AppResult<bool>;
}
