//! Products Repository

use jiff_sqlx::Timestamp as SqlxTimestamp;
use rust_decimal::Decimal;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as};

use crate::{
    database::{count_param, try_get_count},
    domain::products::{
        data::{NewProduct, ProductUpdate},
        records::{ProductRecord, ProductUuid},
    },
};

const LIST_PRODUCTS_SQL: &str = include_str!("sql/list_products.sql");
const LIST_PRODUCTS_BY_NAME_SQL: &str = include_str!("sql/list_products_by_name.sql");
const SEARCH_PRODUCTS_SQL: &str = include_str!("sql/search_products.sql");
const FIND_PRODUCTS_BY_NAME_SQL: &str = include_str!("sql/find_products_by_name.sql");
const LIST_PRODUCTS_IN_PRICE_RANGE_SQL: &str = include_str!("sql/list_products_in_price_range.sql");
const LIST_IN_STOCK_PRODUCTS_SQL: &str = include_str!("sql/list_in_stock_products.sql");
const GET_PRODUCT_SQL: &str = include_str!("sql/get_product.sql");
const CREATE_PRODUCT_SQL: &str = include_str!("sql/create_product.sql");
const UPDATE_PRODUCT_SQL: &str = include_str!("sql/update_product.sql");
const SET_STOCK_SQL: &str = include_str!("sql/set_stock.sql");
const DECREMENT_STOCK_SQL: &str = include_str!("sql/decrement_stock.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgProductsRepository;

impl PgProductsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn list_products(
        &self,
        tx: &mut Transaction<'_, Postgres>,
    ) -> Result<Vec<ProductRecord>, sqlx::Error> {
        query_as::<Postgres, ProductRecord>(LIST_PRODUCTS_SQL)
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn list_products_by_name(
        &self,
        tx: &mut Transaction<'_, Postgres>,
    ) -> Result<Vec<ProductRecord>, sqlx::Error> {
        query_as::<Postgres, ProductRecord>(LIST_PRODUCTS_BY_NAME_SQL)
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn search_products(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        keyword: &str,
    ) -> Result<Vec<ProductRecord>, sqlx::Error> {
        query_as::<Postgres, ProductRecord>(SEARCH_PRODUCTS_SQL)
            .bind(keyword)
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn find_products_by_name(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        name: &str,
    ) -> Result<Vec<ProductRecord>, sqlx::Error> {
        query_as::<Postgres, ProductRecord>(FIND_PRODUCTS_BY_NAME_SQL)
            .bind(name)
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn list_products_in_price_range(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        min: Decimal,
        max: Decimal,
    ) -> Result<Vec<ProductRecord>, sqlx::Error> {
        query_as::<Postgres, ProductRecord>(LIST_PRODUCTS_IN_PRICE_RANGE_SQL)
            .bind(min)
            .bind(max)
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn list_in_stock_products(
        &self,
        tx: &mut Transaction<'_, Postgres>,
    ) -> Result<Vec<ProductRecord>, sqlx::Error> {
        query_as::<Postgres, ProductRecord>(LIST_IN_STOCK_PRODUCTS_SQL)
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn get_product(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        product: ProductUuid,
    ) -> Result<ProductRecord, sqlx::Error> {
        query_as::<Postgres, ProductRecord>(GET_PRODUCT_SQL)
            .bind(product.into_uuid())
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn create_product(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        product: &NewProduct,
    ) -> Result<ProductRecord, sqlx::Error> {
        query_as::<Postgres, ProductRecord>(CREATE_PRODUCT_SQL)
            .bind(product.uuid.into_uuid())
            .bind(product.name.trim())
            .bind(&product.description)
            .bind(product.price)
            .bind(count_param(product.stock, "stock")?)
            .bind(product.image_url.as_deref())
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn update_product(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        product: ProductUuid,
        update: &ProductUpdate,
    ) -> Result<ProductRecord, sqlx::Error> {
        query_as::<Postgres, ProductRecord>(UPDATE_PRODUCT_SQL)
            .bind(product.into_uuid())
            .bind(update.name.trim())
            .bind(&update.description)
            .bind(update.price)
            .bind(update.image_url.as_deref())
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn set_stock(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        product: ProductUuid,
        stock: u32,
    ) -> Result<ProductRecord, sqlx::Error> {
        query_as::<Postgres, ProductRecord>(SET_STOCK_SQL)
            .bind(product.into_uuid())
            .bind(count_param(stock, "stock")?)
            .fetch_one(&mut **tx)
            .await
    }

    /// Take `quantity` units out of stock if, and only if, that many are still there.
    ///
    /// Returns `false` when the row did not qualify, leaving stock untouched. Under
    /// READ COMMITTED a concurrent decrement blocks this statement until it commits,
    /// after which the predicate is re-evaluated against the new stock.
    pub(crate) async fn decrement_stock(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        product: ProductUuid,
        quantity: u32,
    ) -> Result<bool, sqlx::Error> {
        let rows_affected = query(DECREMENT_STOCK_SQL)
            .bind(product.into_uuid())
            .bind(count_param(quantity, "quantity")?)
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected == 1)
    }
}

impl<'r> FromRow<'r, PgRow> for ProductRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: ProductUuid::from_uuid(row.try_get("uuid")?),
            name: row.try_get("name")?,
            description: row.try_get("description")?,
            price: row.try_get("price")?,
            stock: try_get_count(row, "stock")?,
            image_url: row.try_get("image_url")?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
        })
    }
}
