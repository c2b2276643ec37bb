//! Get Cart Handler

use std::sync::Arc;

use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use trolley_app::domain::carts::records::{CartItemRecord, CartRecord};

use crate::{carts::errors::into_status_error, extensions::*, state::State};

/// Cart Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CartResponse {
    /// The items in the cart, oldest first
    pub items: Vec<CartItemResponse>,

    /// Sum of the line subtotals at current prices
    pub total: String,
}

impl TryFrom<CartRecord> for CartResponse {
    type Error = StatusError;

    fn try_from(cart: CartRecord) -> Result<Self, Self::Error> {
        Ok(CartResponse {
            total: cart.total.to_string(),
            items: cart
                .items
                .into_iter()
                .map(CartItemResponse::try_from)
                .collect::<Result<_, _>>()?,
        })
    }
}

/// Cart Item Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CartItemResponse {
    /// The unique identifier of the cart line
    pub uuid: Uuid,

    pub product_uuid: Uuid,

    pub product_name: String,

    /// Current unit price of the product
    pub unit_price: String,

    pub quantity: u32,

    /// `unit_price` times `quantity`
    pub subtotal: String,

    /// Units of the product in stock right now
    pub stock: u32,
}

impl TryFrom<CartItemRecord> for CartItemResponse {
    type Error = StatusError;

    fn try_from(item: CartItemRecord) -> Result<Self, Self::Error> {
        let subtotal = item.subtotal().or_500("failed to price cart line")?;

        Ok(Self {
            uuid: item.uuid.into(),
            product_uuid: item.product_uuid.into(),
            product_name: item.product_name,
            unit_price: item.unit_price.to_string(),
            quantity: item.quantity,
            subtotal: subtotal.to_string(),
            stock: item.stock,
        })
    }
}

/// Get Cart Handler
///
/// Returns the authenticated user's cart. A user who never added anything gets an
/// empty cart.
#[endpoint(
    tags("cart"),
    summary = "Get Cart",
    security(("bearer_auth" = []))
)]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<CartResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let user = depot.user_uuid_or_401()?;

    let cart = state
        .app
        .carts
        .get_cart(user)
        .await
        .map_err(into_status_error)?;

    Ok(Json(cart.try_into()?))
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use trolley_app::domain::{
        carts::{CartsServiceError, MockCartsService},
        products::records::ProductUuid,
    };

    use crate::test_helpers::{TEST_USER_UUID, TestServices, make_cart_item};

    use super::*;

    fn make_service(carts: MockCartsService) -> Service {
        TestServices {
            carts,
            ..TestServices::default()
        }
        .authenticated(Router::with_path("cart").get(handler))
    }

    #[tokio::test]
    async fn test_get_cart_returns_lines_and_total() -> TestResult {
        let lamp = make_cart_item(ProductUuid::new(), "Lamp", Decimal::new(1000, 2), 2);
        let bulb = make_cart_item(ProductUuid::new(), "Bulb", Decimal::new(500, 2), 1);

        let mut carts = MockCartsService::new();

        carts
            .expect_get_cart()
            .once()
            .withf(|user| *user == TEST_USER_UUID)
            .return_once(move |user| {
                Ok(CartRecord {
                    user_uuid: user,
                    items: vec![lamp, bulb],
                    total: Decimal::new(2500, 2),
                })
            });

        let cart: CartResponse = TestClient::get("http://example.com/cart")
            .send(&make_service(carts))
            .await
            .take_json()
            .await?;

        let subtotals: Vec<_> = cart.items.iter().map(|i| i.subtotal.as_str()).collect();

        assert_eq!(cart.total, "25.00");
        assert_eq!(subtotals, vec!["20.00", "5.00"]);

        Ok(())
    }

    #[tokio::test]
    async fn test_get_empty_cart_returns_zero_total() -> TestResult {
        let mut carts = MockCartsService::new();

        carts.expect_get_cart().once().return_once(|user| {
            Ok(CartRecord {
                user_uuid: user,
                items: vec![],
                total: Decimal::ZERO,
            })
        });

        let cart: CartResponse = TestClient::get("http://example.com/cart")
            .send(&make_service(carts))
            .await
            .take_json()
            .await?;

        assert!(cart.items.is_empty(), "expected no lines");
        assert_eq!(cart.total, "0");

        Ok(())
    }

    #[tokio::test]
    async fn test_get_cart_storage_error_returns_500() -> TestResult {
        let mut carts = MockCartsService::new();

        carts
            .expect_get_cart()
            .once()
            .return_once(|_| Err(CartsServiceError::Sql(sqlx::Error::PoolTimedOut)));

        let res = TestClient::get("http://example.com/cart")
            .send(&make_service(carts))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::INTERNAL_SERVER_ERROR));

        Ok(())
    }
}
