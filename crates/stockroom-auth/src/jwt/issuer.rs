//! Signing and verification of HS256 bearer tokens.

use chrono::{Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use tracing::debug;
use uuid::Uuid;

use stockroom_core::config::AuthConfig;
use stockroom_core::error::AppError;

use super::claims::Claims;
use crate::error::AuthError;

/// Seconds of clock skew tolerated when checking `exp`.
const LEEWAY_SECONDS: u64 = 5;

/// Issues and verifies signed bearer tokens.
///
/// The signing secret is fixed at construction. A token is valid only if it
/// was signed with that secret and has not expired.
#[derive(Clone)]
pub struct TokenIssuer {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    ttl: Duration,
}

impl std::fmt::Debug for TokenIssuer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenIssuer")
            .field("ttl", &self.ttl)
            .field("validation", &self.validation)
            .finish()
    }
}

impl TokenIssuer {
    /// Creates an issuer from auth configuration.
    pub fn new(config: &AuthConfig) -> Self {
        let ttl = i64::try_from(config.token_ttl_hours)
            .ok()
            .and_then(Duration::try_hours)
            .unwrap_or(Duration::MAX);
        Self::from_secret(&config.jwt_secret, ttl)
    }

    /// Creates an issuer from a raw secret and token lifetime.
    pub fn from_secret(secret: &str, ttl: Duration) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        validation.leeway = LEEWAY_SECONDS;

        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validation,
            ttl,
        }
    }

    /// Lifetime of tokens minted by this issuer.
    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Mints a token for the given user.
    pub fn issue(&self, user_id: i64, email: &str) -> Result<String, AppError> {
        let now = Utc::now();
        let exp = now
            .checked_add_signed(self.ttl)
            .ok_or_else(|| AppError::configuration("Token lifetime is out of range"))?;
        let claims = Claims {
            sub: user_id,
            email: email.to_string(),
            iat: now.timestamp(),
            exp: exp.timestamp(),
            jti: Uuid::new_v4(),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| AppError::internal(format!("Failed to encode token: {e}")))
    }

    /// Checks signature and expiry, returning the embedded claims.
    pub fn verify(&self, token: &str) -> Result<Claims, AuthError> {
        let data = decode::<Claims>(token, &self.decoding_key, &self.validation).map_err(|e| {
            let reason = match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => "Token has expired".to_string(),
                jsonwebtoken::errors::ErrorKind::InvalidToken => "Invalid token format".to_string(),
                jsonwebtoken::errors::ErrorKind::InvalidSignature => {
                    "Invalid token signature".to_string()
                }
                _ => format!("Token validation failed: {e}"),
            };
            debug!(reason = %reason, "Token rejected");
            AuthError::InvalidToken(reason)
        })?;

        Ok(data.claims)
    }
}
