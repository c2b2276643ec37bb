//! Get Order Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::PathParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use trolley_app::domain::orders::records::{OrderItemRecord, OrderRecord};

use crate::{extensions::*, orders::errors::into_status_error, state::State};

/// Order Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct OrderResponse {
    pub uuid: Uuid,

    /// `PENDING`, `PAID`, `SHIPPED` or `DELIVERED`
    pub status: String,

    /// Sum of the line subtotals at their purchase prices
    pub total_price: String,

    pub created_at: String,

    pub items: Vec<OrderItemResponse>,
}

impl TryFrom<OrderRecord> for OrderResponse {
    type Error = StatusError;

    fn try_from(order: OrderRecord) -> Result<Self, Self::Error> {
        Ok(OrderResponse {
            uuid: order.uuid.into(),
            status: order.status.to_string(),
            total_price: order.total_price.to_string(),
            created_at: order.created_at.to_string(),
            items: order
                .items
                .into_iter()
                .map(OrderItemResponse::try_from)
                .collect::<Result<_, _>>()?,
        })
    }
}

/// Order Item Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct OrderItemResponse {
    pub uuid: Uuid,

    pub product_uuid: Uuid,

    /// Product name when the order was placed
    pub product_name: String,

    pub quantity: u32,

    /// Unit price when the order was placed
    pub price_at_purchase: String,

    pub subtotal: String,
}

impl TryFrom<OrderItemRecord> for OrderItemResponse {
    type Error = StatusError;

    fn try_from(item: OrderItemRecord) -> Result<Self, Self::Error> {
        let subtotal = item.subtotal().or_500("failed to price order line")?;

        Ok(Self {
            uuid: item.uuid.into(),
            product_uuid: item.product_uuid.into(),
            product_name: item.product_name,
            quantity: item.quantity,
            price_at_purchase: item.price_at_purchase.to_string(),
            subtotal: subtotal.to_string(),
        })
    }
}

/// Get Order Handler
#[endpoint(
    tags("orders"),
    summary = "Get Order",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Order found"),
        (status_code = StatusCode::FORBIDDEN, description = "Order belongs to another user"),
        (status_code = StatusCode::NOT_FOUND, description = "Order not found"),
    ),
)]
pub(crate) async fn handler(
    order: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<Json<OrderResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let user = depot.user_uuid_or_401()?;

    let order = state
        .app
        .orders
        .get_order(user, order.into_inner().into())
        .await
        .map_err(into_status_error)?;

    Ok(Json(order.try_into()?))
}
