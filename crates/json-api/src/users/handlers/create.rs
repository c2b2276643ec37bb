//! Register User Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use trolley_app::domain::users::{
    data::Registration,
    records::{UserRecord, UserUuid},
};

use crate::{extensions::*, state::State, users::errors::into_status_error};

/// Registration Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
}

impl From<RegisterRequest> for Registration {
    fn from(request: RegisterRequest) -> Self {
        Registration {
            uuid: UserUuid::new(),
            username: request.username,
            email: request.email,
            password: request.password,
            confirm_password: request.confirm_password,
        }
    }
}

/// Public profile of a user account.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct UserResponse {
    pub uuid: Uuid,
    pub username: String,
    pub email: String,
    pub role: String,
    pub created_at: String,
}

impl From<UserRecord> for UserResponse {
    fn from(user: UserRecord) -> Self {
        UserResponse {
            uuid: user.uuid.into(),
            username: user.username,
            email: user.email,
            role: user.role.to_string(),
            created_at: user.created_at.to_string(),
        }
    }
}

/// Register User Handler
#[endpoint(
    tags("users"),
    summary = "Register",
    responses(
        (status_code = StatusCode::CREATED, description = "User registered"),
        (status_code = StatusCode::CONFLICT, description = "Username or email taken"),
        (status_code = StatusCode::BAD_REQUEST, description = "Invalid registration"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<RegisterRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<UserResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let user = state
        .app
        .users
        .register(json.into_inner().into())
        .await
        .map_err(into_status_error)?;

    res.status_code(StatusCode::CREATED);

    Ok(Json(user.into()))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::{Value, json};
    use testresult::TestResult;

    use trolley_app::domain::users::{
        MockUsersService, UsersServiceError, data::RegistrationError,
    };

    use crate::test_helpers::{TestServices, make_user};

    use super::*;

    fn make_service(users: MockUsersService) -> Service {
        TestServices {
            users,
            ..TestServices::default()
        }
        .anonymous(Router::with_path("users").post(handler))
    }

    fn body() -> Value {
        json!({
            "username": "alice",
            "email": "alice@example.com",
            "password": "secret1",
            "confirm_password": "secret1",
        })
    }

    #[tokio::test]
    async fn test_register_returns_201_without_password() -> TestResult {
        let mut users = MockUsersService::new();

        users
            .expect_register()
            .once()
            .withf(|form| form.username == "alice" && form.confirm_password == "secret1")
            .return_once(|form| Ok(make_user(form.uuid, &form.username)));

        let mut res = TestClient::post("http://example.com/users")
            .json(&body())
            .send(&make_service(users))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::CREATED));

        let body: Value = res.take_json().await?;

        assert_eq!(body["username"], "alice");
        assert_eq!(body["role"], "USER");
        assert!(body.get("password").is_none(), "password must not be echoed");

        Ok(())
    }

    #[tokio::test]
    async fn test_register_taken_username_returns_409() -> TestResult {
        let mut users = MockUsersService::new();

        users
            .expect_register()
            .once()
            .return_once(|_| Err(UsersServiceError::UsernameTaken));

        let res = TestClient::post("http://example.com/users")
            .json(&body())
            .send(&make_service(users))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::CONFLICT));

        Ok(())
    }

    #[tokio::test]
    async fn test_register_password_mismatch_returns_400() -> TestResult {
        let mut users = MockUsersService::new();

        users
            .expect_register()
            .once()
            .return_once(|_| Err(RegistrationError::PasswordMismatch.into()));

        let res = TestClient::post("http://example.com/users")
            .json(&body())
            .send(&make_service(users))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }

    #[tokio::test]
    async fn test_register_username_too_long_returns_400() -> TestResult {
        let mut users = MockUsersService::new();

        users
            .expect_register()
            .once()
            .return_once(|_| Err(RegistrationError::UsernameTooLong.into()));

        let res = TestClient::post("http://example.com/users")
            .json(&body())
            .send(&make_service(users))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }
}
