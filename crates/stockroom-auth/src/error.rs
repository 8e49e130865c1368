//! Authentication error taxonomy.

use thiserror::Error;

use stockroom_core::error::{AppError, ErrorKind};

/// Failures produced by signup/signin/signout and the access gate.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Signup for an email that already has an account.
    #[error("User with this email already exists")]
    DuplicateEmail,

    /// Signin or signout for an email with no account.
    #[error("There is no account with this email")]
    AccountNotFound,

    /// Password did not match the stored hash.
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// Token failed signature, format, or expiry checks.
    ///
    /// Only the token issuer produces this; the gate folds it into
    /// [`AuthError::Unauthorized`].
    #[error("Invalid token: {0}")]
    InvalidToken(String),

    /// A protected route was called without an acceptable credential.
    #[error("Unauthorized")]
    Unauthorized,

    /// The identity store or another dependency failed.
    #[error(transparent)]
    Store(#[from] AppError),
}

impl From<AuthError> for AppError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::DuplicateEmail | AuthError::AccountNotFound => {
                AppError::bad_request(err.to_string())
            }
            AuthError::InvalidCredentials => AppError::forbidden(err.to_string()),
            AuthError::InvalidToken(_) | AuthError::Unauthorized => {
                AppError::unauthorized("Unauthorized")
            }
            AuthError::Store(inner) => inner,
        }
    }
}

impl AuthError {
    /// The application error kind this failure maps to.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::DuplicateEmail | Self::AccountNotFound => ErrorKind::BadRequest,
            Self::InvalidCredentials => ErrorKind::Forbidden,
            Self::InvalidToken(_) | Self::Unauthorized => ErrorKind::Unauthorized,
            Self::Store(inner) => inner.kind,
        }
    }
}
