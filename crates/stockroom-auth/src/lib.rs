//! # stockroom-auth
//!
//! Credential primitives and request authorization for Stockroom.
//!
//! ## Modules
//!
//! - `password` - Argon2id password hashing and verification
//! - `jwt` - signed, time-boxed bearer tokens carrying `{sub, email}`
//! - `gate` - the per-request access decision and the public/protected route table
//! - `error` - the authentication error taxonomy

pub mod error;
pub mod gate;
pub mod jwt;
pub mod password;

pub use error::AuthError;
pub use gate::{AccessGate, Principal, RouteAccess, RouteTable};
pub use jwt::{Claims, TokenIssuer};
pub use password::PasswordHasher;
