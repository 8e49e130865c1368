//! Bearer token issuance, verification, and claims.

pub mod claims;
pub mod issuer;

pub use claims::Claims;
pub use issuer::TokenIssuer;
