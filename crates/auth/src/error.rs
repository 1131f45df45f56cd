//! Authentication errors

use fitroom_common::Error;
use thiserror::Error;

/// Session provider error
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error("Invalid email address: {0}")]
    InvalidEmail(String),

    #[error("Password must be at least {0} characters")]
    WeakPassword(usize),

    #[error("An account already exists for {0}")]
    EmailTaken(String),

    #[error("Session configuration error: {0}")]
    Configuration(String),

    #[error("Session provider error: {0}")]
    Provider(String),
}

impl AuthError {
    /// Stable code surfaced to UI callers
    pub fn code(&self) -> &'static str {
        match self {
            AuthError::InvalidCredentials => "INVALID_CREDENTIALS",
            AuthError::InvalidEmail(_) => "INVALID_EMAIL",
            AuthError::WeakPassword(_) => "WEAK_PASSWORD",
            AuthError::EmailTaken(_) => "EMAIL_TAKEN",
            AuthError::Configuration(_) => "SESSION_CONFIGURATION",
            AuthError::Provider(_) => "SESSION_PROVIDER_ERROR",
        }
    }
}

impl From<AuthError> for Error {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::InvalidCredentials => Error::Authentication(err.to_string()),
            AuthError::InvalidEmail(_) | AuthError::WeakPassword(_) => {
                Error::Validation(err.to_string())
            }
            AuthError::EmailTaken(_) => Error::Conflict(err.to_string()),
            AuthError::Configuration(_) => Error::Internal(err.to_string()),
            AuthError::Provider(_) => Error::Upstream(err.to_string()),
        }
    }
}
