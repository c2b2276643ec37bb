//! Carts service errors.

use sqlx::{
    Error,
    error::{DatabaseError, ErrorKind},
};
use thiserror::Error;
use trolley::{basket::BasketError, pricing::PricingError};

/// SQLSTATE `numeric_value_out_of_range`, raised when a merged quantity overflows.
const NUMERIC_OUT_OF_RANGE: &str = "22003";

#[derive(Debug, Error)]
pub enum CartsServiceError {
    #[error("cart item already exists")]
    AlreadyExists,

    #[error("cart item not found")]
    NotFound,

    #[error("related resource not found")]
    InvalidReference,

    #[error("quantity must be at least 1")]
    InvalidQuantity,

    #[error("missing required data")]
    MissingRequiredData,

    #[error("invalid data")]
    InvalidData,

    #[error(transparent)]
    Pricing(#[from] PricingError),

    #[error(transparent)]
    Basket(#[from] BasketError),

    #[error("storage error")]
    Sql(#[source] Error),
}

impl From<Error> for CartsServiceError {
    fn from(error: Error) -> Self {
        if matches!(error, Error::RowNotFound) {
            return Self::NotFound;
        }

        let out_of_range = error
            .as_database_error()
            .and_then(|db_error| db_error.code())
            .is_some_and(|code| code == NUMERIC_OUT_OF_RANGE);

        if out_of_range {
            return Self::InvalidQuantity;
        }

        match error.as_database_error().map(DatabaseError::kind) {
            Some(ErrorKind::UniqueViolation) => Self::AlreadyExists,
            Some(ErrorKind::ForeignKeyViolation) => Self::InvalidReference,
            Some(ErrorKind::NotNullViolation) => Self::MissingRequiredData,
            Some(ErrorKind::CheckViolation) => Self::InvalidData,
            Some(ErrorKind::Other | _) | None => Self::Sql(error),
        }
    }
}
