//! User entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A registered admin account.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    /// Unique user identifier, assigned by the store and never reused.
    pub id: i64,
    /// Login email, unique per account (case-insensitive).
    pub email: String,
    /// Argon2 password hash.
    #[serde(skip_serializing)]
    pub password_hash: String,
    /// The one bearer token currently accepted for this account.
    ///
    /// `None` means the account is signed out.
    pub session_token: Option<String>,
    /// When the user was created.
    pub created_at: DateTime<Utc>,
    /// When the user was last updated.
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Whether the account currently holds a session.
    pub fn is_signed_in(&self) -> bool {
        self.session_token.is_some()
    }

    /// Whether `token` is the session token on record.
    pub fn holds_session(&self, token: &str) -> bool {
        self.session_token.as_deref() == Some(token)
    }
}

/// Data required to create a new user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateUser {
    /// Login email.
    pub email: String,
    /// Pre-hashed password.
    pub password_hash: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(token: Option<&str>) -> User {
        User {
            id: 1,
            email: "a@x.com".to_string(),
            password_hash: "$argon2id$stub".to_string(),
            session_token: token.map(String::from),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_holds_session_requires_exact_match() {
        let u = user(Some("abc"));
        assert!(u.holds_session("abc"));
        assert!(!u.holds_session("abcd"));
        assert!(!user(None).holds_session(""));
    }

    #[test]
    fn test_password_hash_is_never_serialized() {
        let json = serde_json::to_value(user(None)).unwrap();
        assert!(json.get("password_hash").is_none());
        assert_eq!(json["email"], "a@x.com");
    }
}
