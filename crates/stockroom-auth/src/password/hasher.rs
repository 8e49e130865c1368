//! Argon2id password hashing and verification.

use argon2::{
    Algorithm, Argon2, Params, Version,
    password_hash::{
        PasswordHash, PasswordHasher as ArgonHasher, PasswordVerifier, SaltString, rand_core::OsRng,
    },
};

use stockroom_core::config::AuthConfig;
use stockroom_core::error::AppError;

/// Handles password hashing and verification using Argon2id.
///
/// Cost parameters are fixed at construction. Each hash gets a fresh random
/// salt, so hashing the same password twice yields different digests and
/// equality must always go through [`PasswordHasher::verify`].
#[derive(Clone)]
pub struct PasswordHasher {
    argon2: Argon2<'static>,
}

impl std::fmt::Debug for PasswordHasher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PasswordHasher")
            .field("algorithm", &"argon2id")
            .finish()
    }
}

impl PasswordHasher {
    /// Creates a hasher with the cost parameters from auth configuration.
    pub fn new(config: &AuthConfig) -> Result<Self, AppError> {
        let params = Params::new(
            config.argon2_memory_kib,
            config.argon2_iterations,
            config.argon2_parallelism,
            None,
        )
        .map_err(|e| AppError::configuration(format!("Invalid Argon2 parameters: {e}")))?;

        Ok(Self {
            argon2: Argon2::new(Algorithm::Argon2id, Version::V0x13, params),
        })
    }

    /// Hashes a plaintext password with a random salt, returning a PHC string.
    pub fn hash(&self, password: &str) -> Result<String, AppError> {
        let salt = SaltString::generate(&mut OsRng);

        let hash = self
            .argon2
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| AppError::internal(format!("Password hashing failed: {e}")))?;

        Ok(hash.to_string())
    }

    /// Verifies a plaintext password against a stored hash.
    ///
    /// Returns `Ok(false)` on mismatch. Only a digest that cannot be parsed,
    /// or an internal Argon2 failure, is an error.
    pub fn verify(&self, password: &str, digest: &str) -> Result<bool, AppError> {
        let parsed = PasswordHash::new(digest)
            .map_err(|e| AppError::internal(format!("Invalid password hash format: {e}")))?;

        match self.argon2.verify_password(password.as_bytes(), &parsed) {
            Ok(()) => Ok(true),
            Err(argon2::password_hash::Error::Password) => Ok(false),
            Err(e) => Err(AppError::internal(format!(
                "Password verification failed: {e}"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cheap_hasher() -> PasswordHasher {
        let config = AuthConfig {
            argon2_memory_kib: 1024,
            argon2_iterations: 1,
            argon2_parallelism: 1,
            ..AuthConfig::default()
        };
        PasswordHasher::new(&config).unwrap()
    }

    #[test]
    fn test_hash_then_verify() {
        let hasher = cheap_hasher();
        let digest = hasher.hash("pw").unwrap();

        assert!(digest.starts_with("$argon2id$"));
        assert!(hasher.verify("pw", &digest).unwrap());
        assert!(!hasher.verify("pW", &digest).unwrap());
        assert!(!hasher.verify("", &digest).unwrap());
    }

    #[test]
    fn test_same_password_gets_distinct_salts() {
        let hasher = cheap_hasher();
        let first = hasher.hash("hunter2").unwrap();
        let second = hasher.hash("hunter2").unwrap();

        assert_ne!(first, second);
        assert!(hasher.verify("hunter2", &first).unwrap());
        assert!(hasher.verify("hunter2", &second).unwrap());
    }

    #[test]
    fn test_malformed_digest_is_an_error() {
        let hasher = cheap_hasher();
        assert!(hasher.verify("pw", "plaintext-not-a-hash").is_err());
    }

    #[test]
    fn test_invalid_cost_parameters_are_rejected() {
        let config = AuthConfig {
            argon2_parallelism: 0,
            ..AuthConfig::default()
        };
        assert!(PasswordHasher::new(&config).is_err());
    }
}
