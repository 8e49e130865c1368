//! Request DTOs.

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Body of signup and signin.
#[derive(Clone, Serialize, Deserialize, Validate)]
pub struct CredentialsRequest {
    /// Account email.
    #[validate(email(message = "must be a valid email address"))]
    pub email: String,
    /// Plaintext password.
    #[validate(length(min = 1, message = "must not be empty"))]
    pub password: String,
}

impl std::fmt::Debug for CredentialsRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CredentialsRequest")
            .field("email", &self.email)
            .field("password", &"****")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(email: &str, password: &str) -> CredentialsRequest {
        CredentialsRequest {
            email: email.to_string(),
            password: password.to_string(),
        }
    }

    #[test]
    fn test_validation() {
        assert!(request("a@x.com", "pw").validate().is_ok());
        assert!(request("not-an-email", "pw").validate().is_err());
        assert!(request("a@x.com", "").validate().is_err());
    }

    #[test]
    fn test_debug_masks_password() {
        let rendered = format!("{:?}", request("a@x.com", "hunter2"));
        assert!(!rendered.contains("hunter2"));
    }
}
