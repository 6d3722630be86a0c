use sea_orm::{DbErr, SqlErr};
use thiserror::Error;

/// Everything a service call can fail with
#[derive(Debug, Error)]
pub enum ServiceError {
    /// A required field is missing or malformed
    #[error("{0}")]
    Validation(String),
    /// A sign-up or admin password did not match
    #[error("Invalid password")]
    Unauthorized,
    /// The slot or record is already taken
    #[error("{0}")]
    Conflict(String),
    /// The referenced record does not exist
    #[error("{0} not found")]
    NotFound(&'static str),
    #[error("Database error: {0}")]
    Db(#[from] DbErr),
}

pub type ServiceResult<T> = Result<T, ServiceError>;

/// Whether the error is the store rejecting a duplicate key
pub fn is_unique_violation(err: &DbErr) -> bool {
    matches!(err.sql_err(), Some(SqlErr::UniqueConstraintViolation(_)))
}
