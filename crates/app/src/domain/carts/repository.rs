//! Cart Items Repository

use jiff_sqlx::Timestamp as SqlxTimestamp;
use rust_decimal::Decimal;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as, query_scalar};

use crate::{
    database::{try_get_count, try_get_total},
    domain::{
        carts::records::{CartItemRecord, CartItemUuid},
        products::records::ProductUuid,
        users::records::UserUuid,
    },
};

const LIST_CART_ITEMS_SQL: &str = include_str!("sql/list_cart_items.sql");
const ADD_CART_ITEM_SQL: &str = include_str!("sql/add_cart_item.sql");
const UPDATE_CART_ITEM_QUANTITY_SQL: &str = include_str!("sql/update_cart_item_quantity.sql");
const DELETE_CART_ITEM_SQL: &str = include_str!("sql/delete_cart_item.sql");
const CLEAR_CART_SQL: &str = include_str!("sql/clear_cart.sql");
const COUNT_CART_ITEMS_SQL: &str = include_str!("sql/count_cart_items.sql");
const CART_TOTAL_SQL: &str = include_str!("sql/cart_total.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgCartItemsRepository;

impl PgCartItemsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn list_cart_items(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserUuid,
    ) -> Result<Vec<CartItemRecord>, sqlx::Error> {
        query_as::<Postgres, CartItemRecord>(LIST_CART_ITEMS_SQL)
            .bind(user.into_uuid())
            .fetch_all(&mut **tx)
            .await
    }

    /// Insert a line, or grow the existing line for the same product.
    ///
    /// Fails with [`sqlx::Error::RowNotFound`] when the product does not exist.
    pub(crate) async fn add_cart_item(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserUuid,
        item: CartItemUuid,
        product: ProductUuid,
        quantity: i32,
    ) -> Result<CartItemRecord, sqlx::Error> {
        query_as::<Postgres, CartItemRecord>(ADD_CART_ITEM_SQL)
            .bind(item.into_uuid())
            .bind(user.into_uuid())
            .bind(product.into_uuid())
            .bind(quantity)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn update_cart_item_quantity(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserUuid,
        item: CartItemUuid,
        quantity: i32,
    ) -> Result<CartItemRecord, sqlx::Error> {
        query_as::<Postgres, CartItemRecord>(UPDATE_CART_ITEM_QUANTITY_SQL)
            .bind(item.into_uuid())
            .bind(user.into_uuid())
            .bind(quantity)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn delete_cart_item(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserUuid,
        item: CartItemUuid,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(DELETE_CART_ITEM_SQL)
            .bind(item.into_uuid())
            .bind(user.into_uuid())
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }

    pub(crate) async fn clear_cart(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserUuid,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(CLEAR_CART_SQL)
            .bind(user.into_uuid())
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }

    pub(crate) async fn count_cart_items(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserUuid,
    ) -> Result<u64, sqlx::Error> {
        let row = query(COUNT_CART_ITEMS_SQL)
            .bind(user.into_uuid())
            .fetch_one(&mut **tx)
            .await?;

        try_get_total(&row, "count")
    }

    pub(crate) async fn cart_total(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserUuid,
    ) -> Result<Decimal, sqlx::Error> {
        query_scalar(CART_TOTAL_SQL)
            .bind(user.into_uuid())
            .fetch_one(&mut **tx)
            .await
    }
}

impl<'r> FromRow<'r, PgRow> for CartItemRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: CartItemUuid::from_uuid(row.try_get("uuid")?),
            user_uuid: UserUuid::from_uuid(row.try_get("user_uuid")?),
            product_uuid: ProductUuid::from_uuid(row.try_get("product_uuid")?),
            product_name: row.try_get("product_name")?,
            unit_price: row.try_get("unit_price")?,
            stock: try_get_count(row, "stock")?,
            quantity: try_get_count(row, "quantity")?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
        })
    }
}
