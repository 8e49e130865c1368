//! Authentication configuration.

use serde::{Deserialize, Serialize};

/// Signing secret shipped in the default configuration.
pub const PLACEHOLDER_JWT_SECRET: &str = "CHANGE_ME_IN_PRODUCTION";

/// Credential issuance configuration.
///
/// The signing secret lives here and is handed to the token issuer at
/// construction; nothing reads it from the process environment directly.
#[derive(Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Secret key for JWT signing (HMAC-SHA256).
    #[serde(default = "default_jwt_secret")]
    pub jwt_secret: String,
    /// Lifetime of an issued bearer token, in hours.
    #[serde(default = "default_token_ttl")]
    pub token_ttl_hours: u64,
    /// Argon2 memory cost in KiB.
    #[serde(default = "default_argon2_memory")]
    pub argon2_memory_kib: u32,
    /// Argon2 iteration count.
    #[serde(default = "default_argon2_iterations")]
    pub argon2_iterations: u32,
    /// Argon2 degree of parallelism.
    #[serde(default = "default_argon2_parallelism")]
    pub argon2_parallelism: u32,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret: default_jwt_secret(),
            token_ttl_hours: default_token_ttl(),
            argon2_memory_kib: default_argon2_memory(),
            argon2_iterations: default_argon2_iterations(),
            argon2_parallelism: default_argon2_parallelism(),
        }
    }
}

impl AuthConfig {
    /// Whether tokens would be signed with the shipped placeholder or an empty secret.
    pub fn uses_placeholder_secret(&self) -> bool {
        self.jwt_secret.is_empty() || self.jwt_secret == PLACEHOLDER_JWT_SECRET
    }
}

impl std::fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthConfig")
            .field("jwt_secret", &"****")
            .field("token_ttl_hours", &self.token_ttl_hours)
            .field("argon2_memory_kib", &self.argon2_memory_kib)
            .field("argon2_iterations", &self.argon2_iterations)
            .field("argon2_parallelism", &self.argon2_parallelism)
            .finish()
    }
}

fn default_jwt_secret() -> String {
    PLACEHOLDER_JWT_SECRET.to_string()
}

fn default_token_ttl() -> u64 {
    24
}

// OWASP minimum for Argon2id: m=19 MiB, t=2, p=1.
fn default_argon2_memory() -> u32 {
    19_456
}

fn default_argon2_iterations() -> u32 {
    2
}

fn default_argon2_parallelism() -> u32 {
    1
}
