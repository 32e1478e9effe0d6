//! Authentication error types.

use thiserror::Error;
use tickdesk_core::error::TickdeskError;

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("invalid credentials")]
    InvalidCredentials,

    #[error("token has expired")]
    TokenExpired,

    #[error("invalid token: {0}")]
    TokenInvalid(String),

    #[error("cryptography error: {0}")]
    Crypto(String),
}

impl From<AuthError> for TickdeskError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::InvalidCredentials
            | AuthError::TokenExpired
            | AuthError::TokenInvalid(_) => TickdeskError::Unauthorized {
                reason: err.to_string(),
            },
            AuthError::Crypto(msg) => TickdeskError::Crypto(msg),
        }
    }
}
