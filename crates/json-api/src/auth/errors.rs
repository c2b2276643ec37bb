//! Auth Errors

use salvo::http::StatusError;
use tracing::error;

use trolley_app::auth::AuthServiceError;

pub(crate) fn into_status_error(error: AuthServiceError) -> StatusError {
    match error {
        AuthServiceError::NotFound => StatusError::unauthorized().brief("Invalid session token"),
        AuthServiceError::InvalidCredentials => {
            StatusError::unauthorized().brief("Invalid username or password")
        }
        AuthServiceError::Sql(source) => {
            error!("session storage error: {source}");

            StatusError::internal_server_error()
        }
        AuthServiceError::Token(source) => {
            error!("failed to process session token: {source}");

            StatusError::internal_server_error()
        }
        AuthServiceError::Password(source) => {
            error!("failed to verify password: {source}");

            StatusError::internal_server_error()
        }
        AuthServiceError::InvalidExpiry(source) => {
            error!("failed to compute session expiry: {source}");

            StatusError::internal_server_error()
        }
        AuthServiceError::Users(source) => {
            error!("failed to load user for login: {source}");

            StatusError::internal_server_error()
        }
    }
}
