//! Cart Errors

use salvo::http::StatusError;
use tracing::error;

use trolley_app::domain::carts::CartsServiceError;

pub(crate) fn into_status_error(error: CartsServiceError) -> StatusError {
    match error {
        CartsServiceError::AlreadyExists => {
            StatusError::conflict().brief("Cart item already exists")
        }
        CartsServiceError::NotFound => StatusError::not_found().brief("Cart item not found"),
        CartsServiceError::InvalidReference => StatusError::not_found().brief("Product not found"),
        CartsServiceError::InvalidQuantity => {
            StatusError::bad_request().brief("Quantity must be at least 1")
        }
        CartsServiceError::MissingRequiredData | CartsServiceError::InvalidData => {
            StatusError::bad_request().brief("Invalid cart payload")
        }
        CartsServiceError::Pricing(source) => {
            error!("failed to price cart: {source}");

            StatusError::internal_server_error()
        }
        CartsServiceError::Basket(source) => {
            error!("failed to build basket from cart: {source}");

            StatusError::internal_server_error()
        }
        CartsServiceError::Sql(source) => {
            error!("cart storage error: {source}");

            StatusError::internal_server_error()
        }
    }
}
