//! Order History Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::QueryParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use trolley_app::domain::orders::records::OrderStatus;

use crate::{
    extensions::*,
    orders::{errors::into_status_error, get::OrderResponse},
    state::State,
};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct OrdersResponse {
    /// Orders, newest first
    pub orders: Vec<OrderResponse>,
}

/// Order History Handler
///
/// Lists the authenticated user's orders, optionally only those in `status`.
#[endpoint(
    tags("orders"),
    summary = "List Orders",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Orders"),
        (status_code = StatusCode::BAD_REQUEST, description = "Unknown status"),
    ),
)]
pub(crate) async fn handler(
    status: QueryParam<String, false>,
    depot: &mut Depot,
) -> Result<Json<OrdersResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let user = depot.user_uuid_or_401()?;

    let status = status
        .into_inner()
        .map(|value| value.parse::<OrderStatus>())
        .transpose()
        .or_400("could not parse \"status\" query parameter")?;

    let orders = match status {
        Some(status) => state.app.orders.list_orders_by_status(user, status).await,
        None => state.app.orders.list_orders(user).await,
    }
    .map_err(into_status_error)?;

    Ok(Json(OrdersResponse {
        orders: orders
            .into_iter()
            .map(OrderResponse::try_from)
            .collect::<Result<_, _>>()?,
    }))
}
