//! Update Cart Item Handler

use std::sync::Arc;

use salvo::{
    oapi::{
        ToSchema,
        extract::{JsonBody, PathParam},
    },
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    carts::{errors::into_status_error, get::CartItemResponse},
    extensions::*,
    state::State,
};

/// Update Cart Item Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct UpdateCartItemRequest {
    /// New quantity; zero or less removes the line
    pub quantity: i32,
}

/// Update Cart Item Handler
///
/// Answers 200 with the updated line, or 204 when the quantity removed it.
#[endpoint(
    tags("cart"),
    summary = "Update Cart Item Quantity",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Cart line updated"),
        (status_code = StatusCode::NO_CONTENT, description = "Cart line removed"),
        (status_code = StatusCode::NOT_FOUND, description = "Cart item not found"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    )
)]
pub(crate) async fn handler(
    item: PathParam<Uuid>,
    json: JsonBody<UpdateCartItemRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<StatusCode, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let user = depot.user_uuid_or_401()?;

    let updated = state
        .app
        .carts
        .update_quantity(user, item.into_inner().into(), json.into_inner().quantity)
        .await
        .map_err(into_status_error)?;

    let Some(item) = updated else {
        return Ok(StatusCode::NO_CONTENT);
    };

    res.render(Json(CartItemResponse::try_from(item)?));

    Ok(StatusCode::OK)
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::json;
    use testresult::TestResult;

    use trolley_app::domain::{
        carts::{CartsServiceError, MockCartsService, records::CartItemUuid},
        products::records::ProductUuid,
    };

    use crate::test_helpers::{TEST_USER_UUID, TestServices, make_cart_item};

    use super::*;

    fn make_service(carts: MockCartsService) -> Service {
        TestServices {
            carts,
            ..TestServices::default()
        }
        .authenticated(Router::with_path("cart/items/{item}").put(handler))
    }

    #[tokio::test]
    async fn test_update_returns_line() -> TestResult {
        let line = make_cart_item(ProductUuid::new(), "Mug", Decimal::new(850, 2), 4);
        let uuid = line.uuid;

        let mut carts = MockCartsService::new();

        carts
            .expect_update_quantity()
            .once()
            .withf(move |user, item, quantity| {
                *user == TEST_USER_UUID && *item == uuid && *quantity == 4
            })
            .return_once(move |_, _, _| Ok(Some(line)));

        let mut res = TestClient::put(format!("http://example.com/cart/items/{uuid}"))
            .json(&json!({ "quantity": 4 }))
            .send(&make_service(carts))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));

        let body: CartItemResponse = res.take_json().await?;

        assert_eq!(body.subtotal, "34.00");

        Ok(())
    }

    #[tokio::test]
    async fn test_update_to_zero_returns_204() -> TestResult {
        let uuid = CartItemUuid::new();

        let mut carts = MockCartsService::new();

        carts
            .expect_update_quantity()
            .once()
            .withf(|_, _, quantity| *quantity == 0)
            .return_once(|_, _, _| Ok(None));

        let res = TestClient::put(format!("http://example.com/cart/items/{uuid}"))
            .json(&json!({ "quantity": 0 }))
            .send(&make_service(carts))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NO_CONTENT));

        Ok(())
    }

    #[tokio::test]
    async fn test_update_someone_elses_line_returns_404() -> TestResult {
        let mut carts = MockCartsService::new();

        carts
            .expect_update_quantity()
            .once()
            .return_once(|_, _, _| Err(CartsServiceError::NotFound));

        let res = TestClient::put(format!(
            "http://example.com/cart/items/{}",
            CartItemUuid::new()
        ))
        .json(&json!({ "quantity": 2 }))
        .send(&make_service(carts))
        .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));

        Ok(())
    }
}
