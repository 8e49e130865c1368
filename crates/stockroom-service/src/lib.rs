//! # stockroom-service
//!
//! Business logic for account credentials. [`AuthService`] orchestrates the
//! identity store, password hasher, and token issuer to implement signup,
//! signin, and signout.
//!
//! Services follow constructor injection; all dependencies are provided
//! at construction time.

pub mod auth;

pub use auth::{AccountLocks, AuthService};
