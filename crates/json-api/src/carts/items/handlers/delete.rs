//! Delete Cart Item Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};
use uuid::Uuid;

use crate::{carts::errors::into_status_error, extensions::*, state::State};

/// Delete Cart Item Handler
#[endpoint(
    tags("cart"),
    summary = "Remove Cart Item",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::NO_CONTENT, description = "Cart line removed"),
        (status_code = StatusCode::NOT_FOUND, description = "Cart item not found"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    )
)]
pub(crate) async fn handler(
    item: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<StatusCode, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let user = depot.user_uuid_or_401()?;

    state
        .app
        .carts
        .remove_item(user, item.into_inner().into())
        .await
        .map_err(into_status_error)?;

    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use salvo::test::TestClient;
    use testresult::TestResult;

    use trolley_app::domain::carts::{CartsServiceError, MockCartsService, records::CartItemUuid};

    use crate::test_helpers::{TEST_USER_UUID, TestServices};

    use super::*;

    fn make_service(carts: MockCartsService) -> Service {
        TestServices {
            carts,
            ..TestServices::default()
        }
        .authenticated(Router::with_path("cart/items/{item}").delete(handler))
    }

    #[tokio::test]
    async fn test_delete_returns_204() -> TestResult {
        let uuid = CartItemUuid::new();

        let mut carts = MockCartsService::new();

        carts
            .expect_remove_item()
            .once()
            .withf(move |user, item| *user == TEST_USER_UUID && *item == uuid)
            .return_once(|_, _| Ok(()));

        let res = TestClient::delete(format!("http://example.com/cart/items/{uuid}"))
            .send(&make_service(carts))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NO_CONTENT));

        Ok(())
    }

    #[tokio::test]
    async fn test_delete_missing_line_returns_404() -> TestResult {
        let mut carts = MockCartsService::new();

        carts
            .expect_remove_item()
            .once()
            .return_once(|_, _| Err(CartsServiceError::NotFound));

        let res = TestClient::delete(format!(
            "http://example.com/cart/items/{}",
            CartItemUuid::new()
        ))
        .send(&make_service(carts))
        .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));

        Ok(())
    }
}
