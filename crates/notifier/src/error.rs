use database::error::ServiceError;
use sea_orm::DbErr;
use thiserror::Error;

/// Failure to hand a single message to the mail server
#[derive(Debug, Error)]
pub enum MailError {
    #[error("invalid address: {0}")]
    Address(#[from] lettre::address::AddressError),
    #[error("could not build message: {0}")]
    Message(#[from] lettre::error::Error),
    #[error("SMTP error: {0}")]
    Smtp(#[from] lettre::transport::smtp::Error),
}

#[derive(Debug, Error)]
pub enum NotifyError {
    #[error(transparent)]
    Db(#[from] DbErr),
    #[error(transparent)]
    Service(#[from] ServiceError),
    #[error(transparent)]
    Mail(#[from] MailError),
    #[error("could not render reminder: {0}")]
    Template(#[from] tera::Error),
    #[error("reminder date is out of range")]
    DateOutOfRange,
}
