//! Orders Repository

use jiff_sqlx::Timestamp as SqlxTimestamp;
use rust_decimal::Decimal;
use rustc_hash::FxHashMap;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as, query_scalar};
use trolley::orders::OrderStatus;
use uuid::Uuid;

use crate::{
    database::{count_param, try_get_count, try_get_total},
    domain::{
        orders::records::{OrderItemRecord, OrderItemUuid, OrderRecord, OrderUuid},
        products::records::ProductUuid,
        users::records::UserUuid,
    },
};

const CREATE_ORDER_SQL: &str = include_str!("sql/create_order.sql");
const CREATE_ORDER_ITEM_SQL: &str = include_str!("sql/create_order_item.sql");
const LIST_ORDERS_SQL: &str = include_str!("sql/list_orders.sql");
const LIST_ORDERS_BY_STATUS_SQL: &str = include_str!("sql/list_orders_by_status.sql");
const GET_ORDER_SQL: &str = include_str!("sql/get_order.sql");
const LIST_ORDER_ITEMS_SQL: &str = include_str!("sql/list_order_items.sql");
const COUNT_ORDERS_SQL: &str = include_str!("sql/count_orders.sql");
const TOTAL_SPENT_SQL: &str = include_str!("sql/total_spent.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgOrdersRepository;

impl PgOrdersRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    /// Insert an order header. The returned record has no items.
    pub(crate) async fn create_order(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: OrderUuid,
        user: UserUuid,
        total_price: Decimal,
        status: OrderStatus,
    ) -> Result<OrderRecord, sqlx::Error> {
        query_as::<Postgres, OrderRecord>(CREATE_ORDER_SQL)
            .bind(order.into_uuid())
            .bind(user.into_uuid())
            .bind(total_price)
            .bind(status.as_str())
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn create_order_item(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        item: &OrderItemRecord,
    ) -> Result<OrderItemRecord, sqlx::Error> {
        query_as::<Postgres, OrderItemRecord>(CREATE_ORDER_ITEM_SQL)
            .bind(item.uuid.into_uuid())
            .bind(item.order_uuid.into_uuid())
            .bind(item.product_uuid.into_uuid())
            .bind(&item.product_name)
            .bind(count_param(item.quantity, "quantity")?)
            .bind(item.price_at_purchase)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn list_orders(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserUuid,
    ) -> Result<Vec<OrderRecord>, sqlx::Error> {
        let orders = query_as::<Postgres, OrderRecord>(LIST_ORDERS_SQL)
            .bind(user.into_uuid())
            .fetch_all(&mut **tx)
            .await?;

        self.attach_items(tx, orders).await
    }

    pub(crate) async fn list_orders_by_status(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserUuid,
        status: OrderStatus,
    ) -> Result<Vec<OrderRecord>, sqlx::Error> {
        let orders = query_as::<Postgres, OrderRecord>(LIST_ORDERS_BY_STATUS_SQL)
            .bind(user.into_uuid())
            .bind(status.as_str())
            .fetch_all(&mut **tx)
            .await?;

        self.attach_items(tx, orders).await
    }

    /// Load an order by UUID regardless of owner, with its items.
    pub(crate) async fn get_order(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: OrderUuid,
    ) -> Result<OrderRecord, sqlx::Error> {
        let order = query_as::<Postgres, OrderRecord>(GET_ORDER_SQL)
            .bind(order.into_uuid())
            .fetch_one(&mut **tx)
            .await?;

        let mut orders = self.attach_items(tx, vec![order]).await?;

        orders.pop().ok_or(sqlx::Error::RowNotFound)
    }

    pub(crate) async fn count_orders(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserUuid,
    ) -> Result<u64, sqlx::Error> {
        let row = query(COUNT_ORDERS_SQL)
            .bind(user.into_uuid())
            .fetch_one(&mut **tx)
            .await?;

        try_get_total(&row, "count")
    }

    pub(crate) async fn total_spent(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserUuid,
    ) -> Result<Decimal, sqlx::Error> {
        query_scalar(TOTAL_SPENT_SQL)
            .bind(user.into_uuid())
            .fetch_one(&mut **tx)
            .await
    }

    /// Fill in the items of each order with a single query.
    async fn attach_items(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        mut orders: Vec<OrderRecord>,
    ) -> Result<Vec<OrderRecord>, sqlx::Error> {
        if orders.is_empty() {
            return Ok(orders);
        }

        let uuids: Vec<Uuid> = orders.iter().map(|order| order.uuid.into_uuid()).collect();

        let items = query_as::<Postgres, OrderItemRecord>(LIST_ORDER_ITEMS_SQL)
            .bind(&uuids)
            .fetch_all(&mut **tx)
            .await?;

        let mut by_order: FxHashMap<OrderUuid, Vec<OrderItemRecord>> = FxHashMap::default();

        for item in items {
            by_order.entry(item.order_uuid).or_default().push(item);
        }

        for order in &mut orders {
            order.items = by_order.remove(&order.uuid).unwrap_or_default();
        }

        Ok(orders)
    }
}

impl<'r> FromRow<'r, PgRow> for OrderRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        let status: String = row.try_get("status")?;

        let status = status
            .parse::<OrderStatus>()
            .map_err(|e| sqlx::Error::ColumnDecode {
                index: "status".to_string(),
                source: Box::new(e),
            })?;

        Ok(Self {
            uuid: OrderUuid::from_uuid(row.try_get("uuid")?),
            user_uuid: UserUuid::from_uuid(row.try_get("user_uuid")?),
            total_price: row.try_get("total_price")?,
            status,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            items: Vec::new(),
        })
    }
}

impl<'r> FromRow<'r, PgRow> for OrderItemRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: OrderItemUuid::from_uuid(row.try_get("uuid")?),
            order_uuid: OrderUuid::from_uuid(row.try_get("order_uuid")?),
            product_uuid: ProductUuid::from_uuid(row.try_get("product_uuid")?),
            product_name: row.try_get("product_name")?,
            quantity: try_get_count(row, "quantity")?,
            price_at_purchase: row.try_get("price_at_purchase")?,
        })
    }
}
