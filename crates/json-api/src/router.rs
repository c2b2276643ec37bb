//! App Router

use salvo::Router;

use crate::{auth, carts, checkout, orders, products, users};

/// Routes open to anonymous clients.
pub(crate) fn public_router() -> Router {
    Router::new()
        .push(Router::with_path("users").post(users::create::handler))
        .push(Router::with_path("sessions").post(auth::login::handler))
        .push(
            Router::with_path("products")
                .get(products::index::handler)
                .push(Router::with_path("{product}").get(products::get::handler)),
        )
}

/// Routes that require a bearer session.
pub(crate) fn authenticated_router() -> Router {
    Router::new()
        .hoop(auth::middleware::handler)
        .push(Router::with_path("users/me").get(users::me::handler))
        .push(Router::with_path("sessions/current").delete(auth::logout::handler))
        .push(
            Router::with_path("cart")
                .get(carts::get::handler)
                .delete(carts::clear::handler)
                .push(
                    Router::with_path("items")
                        .post(carts::items::create::handler)
                        .push(
                            Router::with_path("{item}")
                                .put(carts::items::update::handler)
                                .delete(carts::items::delete::handler),
                        ),
                ),
        )
        .push(
            Router::with_path("checkout")
                .get(checkout::summary::handler)
                .post(checkout::create::handler),
        )
        .push(
            Router::with_path("orders")
                .get(orders::index::handler)
                .push(Router::with_path("{order}").get(orders::get::handler)),
        )
}

#[cfg(test)]
mod tests {
    use salvo::{affix_state::inject, prelude::*, test::TestClient};
    use testresult::TestResult;

    use crate::test_helpers::TestServices;

    use super::*;

    fn make_service() -> Service {
        Service::new(
            Router::new()
                .hoop(inject(TestServices::default().into_state()))
                .push(public_router())
                .push(authenticated_router()),
        )
    }

    #[tokio::test]
    async fn test_cart_requires_bearer_token() -> TestResult {
        let res = TestClient::get("http://example.com/cart")
            .send(&make_service())
            .await;

        assert_eq!(res.status_code, Some(StatusCode::UNAUTHORIZED));

        Ok(())
    }

    #[tokio::test]
    async fn test_checkout_requires_bearer_token() -> TestResult {
        let res = TestClient::post("http://example.com/checkout")
            .send(&make_service())
            .await;

        assert_eq!(res.status_code, Some(StatusCode::UNAUTHORIZED));

        Ok(())
    }

    #[tokio::test]
    async fn test_order_detail_requires_bearer_token() -> TestResult {
        let res = TestClient::get(format!("http://example.com/orders/{}", uuid::Uuid::now_v7()))
            .send(&make_service())
            .await;

        assert_eq!(res.status_code, Some(StatusCode::UNAUTHORIZED));

        Ok(())
    }
}
