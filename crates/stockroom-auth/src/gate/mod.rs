//! Per-request access control: route classification and bearer credential checks.

pub mod access;
pub mod guard;
pub mod principal;

pub use access::{RouteAccess, RouteTable};
pub use guard::AccessGate;
pub use principal::Principal;
