//! The identity attached to a request that passed the gate.

use serde::Serialize;

/// Authenticated caller of a protected route.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Principal {
    /// User id from the verified token.
    pub user_id: i64,
    /// Email on record for the user.
    pub email: String,
    /// The bearer token that was presented.
    pub token: String,
}
