//! Product Errors

use salvo::http::StatusError;
use tracing::error;

use trolley_app::domain::products::ProductsServiceError;

pub(crate) fn into_status_error(error: ProductsServiceError) -> StatusError {
    match error {
        ProductsServiceError::AlreadyExists => {
            StatusError::conflict().brief("Product already exists")
        }
        ProductsServiceError::InvalidPriceRange => {
            StatusError::bad_request().brief("min_price must not exceed max_price")
        }
        ProductsServiceError::InvalidPrice(source) => {
            StatusError::bad_request().brief(source.to_string())
        }
        ProductsServiceError::InvalidName
        | ProductsServiceError::InvalidReference
        | ProductsServiceError::MissingRequiredData
        | ProductsServiceError::InvalidData => {
            StatusError::bad_request().brief("Invalid product request")
        }
        ProductsServiceError::Sql(source) => {
            error!("failed to query products: {source}");

            StatusError::internal_server_error()
        }
        ProductsServiceError::NotFound => StatusError::not_found().brief("Product not found"),
    }
}
