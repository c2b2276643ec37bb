//! Auth service errors.

use sqlx::Error;
use thiserror::Error;

use crate::{
    auth::SessionTokenError,
    domain::users::{UsersServiceError, password::PasswordError},
};

#[derive(Debug, Error)]
pub enum AuthServiceError {
    #[error("session not found")]
    NotFound,

    #[error("invalid username or password")]
    InvalidCredentials,

    #[error("storage error")]
    Sql(#[source] Error),

    #[error("token processing error")]
    Token(#[source] SessionTokenError),

    #[error("password verification error")]
    Password(#[source] PasswordError),

    #[error("session expiry is out of range")]
    InvalidExpiry(#[source] jiff::Error),

    #[error("user lookup failed")]
    Users(#[source] UsersServiceError),
}

impl From<Error> for AuthServiceError {
    fn from(error: Error) -> Self {
        Self::Sql(error)
    }
}

impl From<SessionTokenError> for AuthServiceError {
    fn from(error: SessionTokenError) -> Self {
        Self::Token(error)
    }
}

impl From<UsersServiceError> for AuthServiceError {
    fn from(error: UsersServiceError) -> Self {
        match error {
            UsersServiceError::InvalidCredentials | UsersServiceError::NotFound => {
                Self::InvalidCredentials
            }
            UsersServiceError::Password(error) => Self::Password(error),
            UsersServiceError::Sql(error) => Self::Sql(error),
            other => Self::Users(other),
        }
    }
}
