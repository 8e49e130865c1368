//! In-memory identity store using a Tokio `RwLock` for single-node use and tests.

use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use tracing::debug;

use stockroom_core::error::AppError;
use stockroom_core::result::AppResult;
use stockroom_entity::user::{CreateUser, User};

use crate::store::IdentityStore;

/// Internal state for the memory-based store.
#[derive(Debug, Default)]
struct InnerState {
    /// Last identifier handed out; ids start at 1 and are never reused.
    last_id: i64,
    /// Users keyed by id.
    users: BTreeMap<i64, User>,
}

/// In-memory identity store.
///
/// Behaves like the PostgreSQL repository: case-insensitive email lookups,
/// a uniqueness check on insert, and `NotFound` on updates of missing users.
#[derive(Debug, Clone, Default)]
pub struct MemoryIdentityStore {
    state: Arc<RwLock<InnerState>>,
}

impl MemoryIdentityStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored users.
    pub async fn len(&self) -> usize {
        self.state.read().await.users.len()
    }

    /// Whether the store holds no users.
    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[async_trait]
impl IdentityStore for MemoryIdentityStore {
    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        let key = email.to_lowercase();
        let state = self.state.read().await;
        Ok(state
            .users
            .values()
            .find(|u| u.email.to_lowercase() == key)
            .cloned())
    }

    async fn find_by_id(&self, id: i64) -> AppResult<Option<User>> {
        Ok(self.state.read().await.users.get(&id).cloned())
    }

    async fn create(&self, data: &CreateUser) -> AppResult<User> {
        let key = data.email.to_lowercase();
        let mut state = self.state.write().await;

        if state.users.values().any(|u| u.email.to_lowercase() == key)
        {
            return Err(AppError::conflict(format!(
                "Email '{}' is already registered",
                data.email
            )));
        }

        state.last_id += 1;
        let now = Utc::now();
        let user = User {
            id: state.last_id,
            email: data.email.clone(),
            password_hash: data.password_hash.clone(),
            session_token: None,
            created_at: now,
            updated_at: now,
        };
        state.users.insert(user.id, user.clone());

        debug!(user_id = user.id, "User stored in memory");
        Ok(user)
    }

    async fn set_session_token(&self, id: i64, token: Option<&str>) -> AppResult<User> {
        let mut state = self.state.write().await;
        let user = state
            .users
            .get_mut(&id)
            .ok_or_else(|| AppError::not_found(format!("User {id} not found")))?;

        user.session_token = token.map(String::from);
        user.updated_at = Utc::now();
        Ok(user.clone())
    }

    async fn health_check(&self) -> AppResult<bool> {
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use stockroom_core::error::ErrorKind;

    fn new_user(email: &str) -> CreateUser {
        CreateUser {
            email: email.to_string(),
            password_hash: "$argon2id$stub".to_string(),
        }
    }

    #[tokio::test]
    async fn test_create_assigns_increasing_ids() {
        let store = MemoryIdentityStore::new();
        let a = store.create(&new_user("a@x.com")).await.unwrap();
        let b = store.create(&new_user("b@x.com")).await.unwrap();

        assert_eq!(a.id, 1);
        assert_eq!(b.id, 2);
        assert!(a.session_token.is_none());
        assert_eq!(store.len().await, 2);
    }

    #[tokio::test]
    async fn test_duplicate_email_is_a_conflict() {
        let store = MemoryIdentityStore::new();
        store.create(&new_user("a@x.com")).await.unwrap();

        let err = store.create(&new_user("A@X.com")).await.unwrap_err();
        assert!(err.is(ErrorKind::Conflict));
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn test_find_by_email_ignores_case() {
        let store = MemoryIdentityStore::new();
        let created = store.create(&new_user("Owner@Shop.io")).await.unwrap();

        let found = store.find_by_email("owner@shop.io").await.unwrap().unwrap();
        assert_eq!(found.id, created.id);
        assert!(store.find_by_email("other@shop.io").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_email_matching_folds_non_ascii_case() {
        let store = MemoryIdentityStore::new();
        let created = store.create(&new_user("Äb@x.com")).await.unwrap();

        let found = store.find_by_email("äb@x.com").await.unwrap().unwrap();
        assert_eq!(found.id, created.id);

        let err = store.create(&new_user("äB@X.COM")).await.unwrap_err();
        assert!(err.is(ErrorKind::Conflict));
    }

    #[tokio::test]
    async fn test_set_and_clear_session_token() {
        let store = MemoryIdentityStore::new();
        let user = store.create(&new_user("a@x.com")).await.unwrap();

        let updated = store.set_session_token(user.id, Some("t1")).await.unwrap();
        assert_eq!(updated.session_token.as_deref(), Some("t1"));

        let cleared = store.set_session_token(user.id, None).await.unwrap();
        assert!(cleared.session_token.is_none());

        let stored = store.find_by_id(user.id).await.unwrap().unwrap();
        assert!(stored.session_token.is_none());
    }

    #[tokio::test]
    async fn test_set_session_token_on_missing_user() {
        let store = MemoryIdentityStore::new();
        let err = store.set_session_token(42, Some("t")).await.unwrap_err();
        assert!(err.is(ErrorKind::NotFound));
    }
}
