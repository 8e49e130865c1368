//! Credential lifecycle services.

pub mod locks;
pub mod service;

pub use locks::AccountLocks;
pub use service::AuthService;
