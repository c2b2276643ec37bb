//! Users service errors.

use sqlx::{Error, error::ErrorKind};
use thiserror::Error;

use crate::domain::users::{data::RegistrationError, password::PasswordError};

const USERNAME_UNIQUE_CONSTRAINT: &str = "users_username_key";
const EMAIL_UNIQUE_CONSTRAINT: &str = "users_email_key";

#[derive(Debug, Error)]
pub enum UsersServiceError {
    #[error("user not found")]
    NotFound,

    #[error("username already exists")]
    UsernameTaken,

    #[error("email already exists")]
    EmailTaken,

    #[error("user already exists")]
    AlreadyExists,

    #[error("invalid username or password")]
    InvalidCredentials,

    #[error(transparent)]
    Invalid(#[from] RegistrationError),

    #[error("missing required data")]
    MissingRequiredData,

    #[error("invalid data")]
    InvalidData,

    #[error(transparent)]
    Password(#[from] PasswordError),

    #[error("storage error")]
    Sql(#[source] Error),
}

impl From<Error> for UsersServiceError {
    fn from(error: Error) -> Self {
        if matches!(error, Error::RowNotFound) {
            return Self::NotFound;
        }

        let Some(db_error) = error.as_database_error() else {
            return Self::Sql(error);
        };

        match (db_error.kind(), db_error.constraint()) {
            (ErrorKind::UniqueViolation, Some(USERNAME_UNIQUE_CONSTRAINT)) => Self::UsernameTaken,
            (ErrorKind::UniqueViolation, Some(EMAIL_UNIQUE_CONSTRAINT)) => Self::EmailTaken,
            (ErrorKind::UniqueViolation, _) => Self::AlreadyExists,
            (ErrorKind::NotNullViolation, _) => Self::MissingRequiredData,
            (ErrorKind::CheckViolation, _) => Self::InvalidData,
            _ => Self::Sql(error),
        }
    }
}
