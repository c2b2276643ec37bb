//! Login Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{auth::errors::into_status_error, extensions::*, state::State};

/// Login Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Session Created Response
///
/// `token` is only ever returned here; send it as `Authorization: Bearer <token>`.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct SessionCreatedResponse {
    pub token: String,
    pub user_uuid: Uuid,
    pub expires_at: String,
}

/// Login Handler
#[endpoint(
    tags("sessions"),
    summary = "Log In",
    responses(
        (status_code = StatusCode::CREATED, description = "Session created"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Invalid username or password"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<LoginRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<SessionCreatedResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let request = json.into_inner();

    let session = state
        .app
        .auth
        .login(request.username.trim(), &request.password)
        .await
        .map_err(into_status_error)?;

    res.status_code(StatusCode::CREATED);

    Ok(Json(SessionCreatedResponse {
        token: session.token,
        user_uuid: session.metadata.user_uuid.into(),
        expires_at: session.metadata.expires_at.to_string(),
    }))
}
