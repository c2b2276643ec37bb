//! Checkout service errors.

use sqlx::{
    Error,
    error::{DatabaseError, ErrorKind},
};
use thiserror::Error;
use trolley::{basket::BasketError, checkout::CheckoutError, pricing::PricingError};

use crate::domain::products::records::ProductUuid;

#[derive(Debug, Error)]
pub enum CheckoutServiceError {
    #[error("cannot checkout with an empty cart")]
    EmptyCart,

    #[error("insufficient stock for product {name}: available {available}, requested {requested}")]
    InsufficientStock {
        product: ProductUuid,
        name: String,
        available: u32,
        requested: u32,
    },

    /// Stock changed between the pre-check and the decrement.
    #[error("stock for product {name} changed during checkout, please retry")]
    ConcurrentConflict { product: ProductUuid, name: String },

    #[error(transparent)]
    Pricing(#[from] PricingError),

    #[error(transparent)]
    Basket(#[from] BasketError),

    #[error("related resource not found")]
    InvalidReference,

    #[error("missing required data")]
    MissingRequiredData,

    #[error("invalid data")]
    InvalidData,

    #[error("storage error")]
    Sql(#[source] Error),
}

impl From<CheckoutError<ProductUuid>> for CheckoutServiceError {
    fn from(error: CheckoutError<ProductUuid>) -> Self {
        match error {
            CheckoutError::EmptyCart => Self::EmptyCart,
            CheckoutError::InsufficientStock(shortfall) => Self::InsufficientStock {
                product: shortfall.product,
                name: shortfall.name,
                available: shortfall.available,
                requested: shortfall.requested,
            },
            CheckoutError::Pricing(error) => Self::Pricing(error),
        }
    }
}

impl From<Error> for CheckoutServiceError {
    fn from(error: Error) -> Self {
        match error.as_database_error().map(DatabaseError::kind) {
            Some(ErrorKind::ForeignKeyViolation) => Self::InvalidReference,
            Some(ErrorKind::NotNullViolation) => Self::MissingRequiredData,
            Some(ErrorKind::CheckViolation) => Self::InvalidData,
            Some(ErrorKind::UniqueViolation | ErrorKind::Other | _) | None => Self::Sql(error),
        }
    }
}
