//! Claims carried by every bearer token.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// JWT claims payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject, the user id.
    pub sub: i64,
    /// Email the token was issued for.
    pub email: String,
    /// Issued-at timestamp (seconds since epoch).
    pub iat: i64,
    /// Expiration timestamp (seconds since epoch).
    pub exp: i64,
    /// Unique token id. Two tokens minted for the same user in the same
    /// second still differ.
    pub jti: Uuid,
}

impl Claims {
    /// Returns the user id from the subject claim.
    pub fn user_id(&self) -> i64 {
        self.sub
    }
}
