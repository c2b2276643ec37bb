//! Checkout Errors

use salvo::http::StatusError;
use tracing::error;

use trolley_app::domain::checkout::CheckoutServiceError;

pub(crate) fn into_status_error(error: CheckoutServiceError) -> StatusError {
    match error {
        CheckoutServiceError::EmptyCart
        | CheckoutServiceError::InsufficientStock { .. }
        | CheckoutServiceError::ConcurrentConflict { .. } => {
            StatusError::conflict().brief(error.to_string())
        }
        CheckoutServiceError::InvalidReference => {
            StatusError::conflict().brief("A product in the cart no longer exists")
        }
        CheckoutServiceError::MissingRequiredData | CheckoutServiceError::InvalidData => {
            StatusError::bad_request().brief("Invalid checkout request")
        }
        CheckoutServiceError::Pricing(source) => {
            error!("failed to price checkout: {source}");

            StatusError::internal_server_error()
        }
        CheckoutServiceError::Basket(source) => {
            error!("failed to build checkout basket: {source}");

            StatusError::internal_server_error()
        }
        CheckoutServiceError::Sql(source) => {
            error!("checkout storage error: {source}");

            StatusError::internal_server_error()
        }
    }
}
