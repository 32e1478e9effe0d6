//! Database-specific error types and conversions.

use tickdesk_core::error::TickdeskError;

/// Database-layer error type.
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error("SurrealDB error: {0}")]
    Surreal(#[from] surrealdb::Error),

    #[error("Migration failed: {0}")]
    Migration(String),

    #[error("Stored record could not be decoded: {0}")]
    Decode(String),

    #[error("Record not found: {entity} with id {id}")]
    NotFound { entity: String, id: String },
}

impl From<DbError> for TickdeskError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::NotFound { entity, id } => TickdeskError::NotFound { entity, id },
            other => TickdeskError::Database(other.to_string()),
        }
    }
}
