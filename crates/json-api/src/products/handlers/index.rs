//! Product Index Handler

use std::{str::FromStr, sync::Arc};

use rust_decimal::Decimal;
use salvo::{
    oapi::{ToSchema, extract::QueryParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use trolley_app::domain::products::data::PriceRange;

use crate::{
    extensions::*,
    products::{errors::into_status_error, get::ProductResponse},
    state::State,
};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ProductsResponse {
    /// The list of products
    pub products: Vec<ProductResponse>,
}

/// Product Index Handler
///
/// Returns the catalog. Filters are applied one at a time: `search` wins over a
/// price range, which wins over `in_stock`. Without filters products are sorted by
/// name, or kept in the order they were added with `sort=added`.
#[endpoint(
    tags("products"),
    summary = "List Products",
    responses(
        (status_code = StatusCode::OK, description = "Products"),
        (status_code = StatusCode::BAD_REQUEST, description = "Invalid filter"),
    ),
)]
pub(crate) async fn handler(
    search: QueryParam<String, false>,
    min_price: QueryParam<String, false>,
    max_price: QueryParam<String, false>,
    in_stock: QueryParam<bool, false>,
    sort: QueryParam<String, false>,
    depot: &mut Depot,
) -> Result<Json<ProductsResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let products = &state.app.products;

    let min_price = parse_price(min_price.into_inner(), "could not parse \"min_price\"")?;
    let max_price = parse_price(max_price.into_inner(), "could not parse \"max_price\"")?;

    let records = if let Some(keyword) = search.into_inner() {
        products.search_products(&keyword).await
    } else if min_price.is_some() || max_price.is_some() {
        let range = PriceRange::new(
            min_price.unwrap_or(Decimal::ZERO),
            max_price.unwrap_or(Decimal::MAX),
        )
        .map_err(into_status_error)?;

        products.list_products_in_price_range(range).await
    } else if in_stock.into_inner().unwrap_or(false) {
        products.list_in_stock_products().await
    } else if sort.into_inner().as_deref() == Some("added") {
        products.list_products().await
    } else {
        products.list_products_by_name().await
    }
    .map_err(into_status_error)?;

    Ok(Json(ProductsResponse {
        products: records.into_iter().map(Into::into).collect(),
    }))
}

fn parse_price(value: Option<String>, brief: &str) -> Result<Option<Decimal>, StatusError> {
    value
        .map(|value| Decimal::from_str(value.trim()))
        .transpose()
        .or_400(brief)
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use trolley_app::domain::products::{
        MockProductsService, ProductsServiceError, records::ProductUuid,
    };

    use crate::test_helpers::{TestServices, make_product, strict_products_mock};

    use super::*;

    fn make_service(products: MockProductsService) -> Service {
        TestServices {
            products,
            ..TestServices::default()
        }
        .anonymous(Router::with_path("products").get(handler))
    }

    #[tokio::test]
    async fn test_index_defaults_to_name_order() -> TestResult {
        let uuid_a = ProductUuid::new();
        let uuid_b = ProductUuid::new();

        let mut products = MockProductsService::new();

        products.expect_list_products_by_name().once().return_once(move || {
            Ok(vec![
                make_product(uuid_a, "Kettle", Decimal::new(3500, 2), 0),
                make_product(uuid_b, "Mug", Decimal::new(850, 2), 4),
            ])
        });

        let response: ProductsResponse = TestClient::get("http://example.com/products")
            .send(&make_service(products))
            .await
            .take_json()
            .await?;

        let uuids: Vec<_> = response.products.iter().map(|p| p.uuid).collect();

        assert_eq!(uuids, vec![uuid_a.into_uuid(), uuid_b.into_uuid()]);

        Ok(())
    }

    #[tokio::test]
    async fn test_index_search_takes_precedence() -> TestResult {
        let mut products = MockProductsService::new();

        products
            .expect_search_products()
            .once()
            .withf(|keyword| keyword == "lamp")
            .return_once(|_| Ok(vec![]));

        let res = TestClient::get("http://example.com/products?search=lamp&min_price=1&in_stock=true")
            .send(&make_service(products))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));

        Ok(())
    }

    #[tokio::test]
    async fn test_index_price_range_fills_open_end() -> TestResult {
        let mut products = MockProductsService::new();

        products
            .expect_list_products_in_price_range()
            .once()
            .withf(|range| range.min() == Decimal::new(500, 2) && range.max() == Decimal::MAX)
            .return_once(|_| Ok(vec![]));

        let res = TestClient::get("http://example.com/products?min_price=5.00")
            .send(&make_service(products))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));

        Ok(())
    }

    #[tokio::test]
    async fn test_index_inverted_range_returns_400() -> TestResult {
        let res = TestClient::get("http://example.com/products?min_price=20&max_price=10")
            .send(&make_service(strict_products_mock()))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }

    #[tokio::test]
    async fn test_index_unparseable_price_returns_400() -> TestResult {
        let res = TestClient::get("http://example.com/products?max_price=cheap")
            .send(&make_service(strict_products_mock()))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }

    #[tokio::test]
    async fn test_index_in_stock_filter() -> TestResult {
        let mut products = MockProductsService::new();

        products
            .expect_list_in_stock_products()
            .once()
            .return_once(|| Ok(vec![]));

        let res = TestClient::get("http://example.com/products?in_stock=true")
            .send(&make_service(products))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));

        Ok(())
    }

    #[tokio::test]
    async fn test_index_sort_added_keeps_catalog_order() -> TestResult {
        let mut products = MockProductsService::new();

        products
            .expect_list_products()
            .once()
            .return_once(|| Ok(vec![]));

        let res = TestClient::get("http://example.com/products?sort=added")
            .send(&make_service(products))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));

        Ok(())
    }

    #[tokio::test]
    async fn test_index_storage_error_returns_500() -> TestResult {
        let mut products = MockProductsService::new();

        products
            .expect_list_products_by_name()
            .once()
            .return_once(|| Err(ProductsServiceError::Sql(sqlx::Error::PoolTimedOut)));

        let res = TestClient::get("http://example.com/products")
            .send(&make_service(products))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::INTERNAL_SERVER_ERROR));

        Ok(())
    }
}
