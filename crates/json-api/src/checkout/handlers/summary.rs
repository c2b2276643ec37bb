//! Checkout Summary Handler

use std::sync::Arc;

use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};

use trolley_app::domain::checkout::records::CheckoutSummary;

use crate::{
    carts::get::CartItemResponse, checkout::errors::into_status_error, extensions::*,
    state::State,
};

/// Checkout Summary Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CheckoutSummaryResponse {
    pub items: Vec<CartItemResponse>,

    /// What the order would cost if placed now
    pub total: String,
}

impl TryFrom<CheckoutSummary> for CheckoutSummaryResponse {
    type Error = StatusError;

    fn try_from(summary: CheckoutSummary) -> Result<Self, Self::Error> {
        Ok(Self {
            total: summary.total.to_string(),
            items: summary
                .items
                .into_iter()
                .map(CartItemResponse::try_from)
                .collect::<Result<_, _>>()?,
        })
    }
}

/// Checkout Summary Handler
///
/// Prices the cart exactly as checkout would, without placing an order.
#[endpoint(
    tags("checkout"),
    summary = "Checkout Summary",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Cart can be checked out"),
        (status_code = StatusCode::CONFLICT, description = "Empty cart or insufficient stock"),
    ),
)]
pub(crate) async fn handler(
    depot: &mut Depot,
) -> Result<Json<CheckoutSummaryResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let user = depot.user_uuid_or_401()?;

    let summary = state
        .app
        .checkout
        .summary(user)
        .await
        .map_err(into_status_error)?;

    Ok(Json(summary.try_into()?))
}
