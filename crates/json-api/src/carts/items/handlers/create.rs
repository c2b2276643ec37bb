//! Add Cart Item Handler

use std::sync::Arc;

use salvo::{
    http::header::LOCATION,
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use trolley_app::domain::carts::{data::NewCartItem, records::CartItemUuid};

use crate::{
    carts::{errors::into_status_error, get::CartItemResponse},
    extensions::*,
    state::State,
};

/// Add Cart Item Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CreateCartItemRequest {
    pub product_uuid: Uuid,

    /// Units to add; merged into an existing line for the same product
    pub quantity: i32,
}

impl From<CreateCartItemRequest> for NewCartItem {
    fn from(request: CreateCartItemRequest) -> Self {
        NewCartItem {
            uuid: CartItemUuid::new(),
            product_uuid: request.product_uuid.into(),
            quantity: request.quantity,
        }
    }
}

/// Add Cart Item Handler
#[endpoint(
    tags("cart"),
    summary = "Add Item to Cart",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::CREATED, description = "Cart line created or merged"),
        (status_code = StatusCode::NOT_FOUND, description = "Product not found"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<CreateCartItemRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<CartItemResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let user = depot.user_uuid_or_401()?;

    let item = state
        .app
        .carts
        .add_item(user, json.into_inner().into())
        .await
        .map_err(into_status_error)?;

    res.add_header(LOCATION, format!("/cart/items/{}", item.uuid), true)
        .or_500("failed to set location header")?
        .status_code(StatusCode::CREATED);

    Ok(Json(item.try_into()?))
}
