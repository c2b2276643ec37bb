//! Clear Cart Handler

use std::sync::Arc;

use salvo::prelude::*;

use crate::{carts::errors::into_status_error, extensions::*, state::State};

/// Clear Cart Handler
///
/// Removes every line from the authenticated user's cart.
#[endpoint(
    tags("cart"),
    summary = "Clear Cart",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::NO_CONTENT, description = "Cart cleared"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    )
)]
pub(crate) async fn handler(depot: &mut Depot) -> Result<StatusCode, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let user = depot.user_uuid_or_401()?;

    state
        .app
        .carts
        .clear_cart(user)
        .await
        .map_err(into_status_error)?;

    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use salvo::test::TestClient;
    use testresult::TestResult;
    use trolley_app::domain::carts::MockCartsService;

    use crate::test_helpers::{TEST_USER_UUID, TestServices};

    use super::*;

    #[tokio::test]
    async fn test_clear_cart_returns_204_even_when_empty() -> TestResult {
        let mut carts = MockCartsService::new();

        carts
            .expect_clear_cart()
            .once()
            .withf(|user| *user == TEST_USER_UUID)
            .return_once(|_| Ok(0));

        let service = TestServices {
            carts,
            ..TestServices::default()
        }
        .authenticated(Router::with_path("cart").delete(handler));

        let res = TestClient::delete("http://example.com/cart").send(&service).await;

        assert_eq!(res.status_code, Some(StatusCode::NO_CONTENT));

        Ok(())
    }
}
