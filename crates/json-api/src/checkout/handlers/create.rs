//! Place Order Handler

use std::sync::Arc;

use salvo::{http::header::LOCATION, prelude::*};

use crate::{
    checkout::errors::into_status_error, extensions::*, orders::get::OrderResponse,
    state::State,
};

/// Place Order Handler
///
/// Turns the whole cart into an order, takes the stock and empties the cart. Nothing
/// changes when the answer is a 409.
#[endpoint(
    tags("checkout"),
    summary = "Place Order",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::CREATED, description = "Order placed"),
        (status_code = StatusCode::CONFLICT, description = "Empty cart, insufficient stock or concurrent conflict"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<OrderResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let user = depot.user_uuid_or_401()?;

    let order = state
        .app
        .checkout
        .checkout(user)
        .await
        .map_err(into_status_error)?;

    res.add_header(LOCATION, format!("/orders/{}", order.uuid), true)
        .or_500("failed to set location header")?
        .status_code(StatusCode::CREATED);

    Ok(Json(order.try_into()?))
}
