//! User Errors

use salvo::http::StatusError;
use tracing::error;

use trolley_app::domain::users::UsersServiceError;

pub(crate) fn into_status_error(error: UsersServiceError) -> StatusError {
    match error {
        UsersServiceError::UsernameTaken => {
            StatusError::conflict().brief("Username is already taken")
        }
        UsersServiceError::EmailTaken => StatusError::conflict().brief("Email is already registered"),
        UsersServiceError::AlreadyExists => StatusError::conflict().brief("User already exists"),
        UsersServiceError::Invalid(source) => StatusError::bad_request().brief(source.to_string()),
        UsersServiceError::MissingRequiredData | UsersServiceError::InvalidData => {
            StatusError::bad_request().brief("Invalid registration")
        }
        UsersServiceError::InvalidCredentials => {
            StatusError::unauthorized().brief("Invalid username or password")
        }
        UsersServiceError::NotFound => StatusError::not_found().brief("User not found"),
        UsersServiceError::Password(source) => {
            error!("failed to hash password: {source}");

            StatusError::internal_server_error()
        }
        UsersServiceError::Sql(source) => {
            error!("user storage error: {source}");

            StatusError::internal_server_error()
        }
    }
}
