//! Error types for the Tickdesk system.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum TickdeskError {
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: String, id: String },

    #[error("Entity already exists: {entity}")]
    AlreadyExists { entity: String },

    #[error("Validation error on {field}: {message}")]
    Validation { field: String, message: String },

    #[error("Authentication failed: {reason}")]
    Unauthorized { reason: String },

    #[error("Access denied: {reason}")]
    Forbidden { reason: String },

    #[error("Database error: {0}")]
    Database(String),

    #[error("Cryptography error: {0}")]
    Crypto(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl TickdeskError {
    /// Shorthand for a field-level validation failure.
    pub fn validation(field: &str, message: &str) -> Self {
        Self::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Shorthand for a policy denial.
    ///
    /// The reason is logged server-side; API responses carry a generic
    /// message so a denied caller learns nothing about the resource.
    pub fn forbidden(reason: &str) -> Self {
        Self::Forbidden {
            reason: reason.into(),
        }
    }
}

pub type TickdeskResult<T> = Result<T, TickdeskError>;
