//! Orders service.

use async_trait::async_trait;
use mockall::automock;
use rust_decimal::Decimal;
use tracing::warn;
use trolley::orders::OrderStatus;

use crate::{
    database::Db,
    domain::{
        orders::{
            errors::OrdersServiceError,
            records::{OrderRecord, OrderUuid},
            repository::PgOrdersRepository,
        },
        users::records::UserUuid,
    },
};

#[derive(Debug, Clone)]
pub struct PgOrdersService {
    db: Db,
    repository: PgOrdersRepository,
}

impl PgOrdersService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgOrdersRepository::new(),
        }
    }
}

#[async_trait]
impl OrdersService for PgOrdersService {
    async fn list_orders(&self, user: UserUuid) -> Result<Vec<OrderRecord>, OrdersServiceError> {
        let mut tx = self.db.begin().await?;

        let orders = self.repository.list_orders(&mut tx, user).await?;

        tx.commit().await?;

        Ok(orders)
    }

    async fn list_orders_by_status(
        &self,
        user: UserUuid,
        status: OrderStatus,
    ) -> Result<Vec<OrderRecord>, OrdersServiceError> {
        let mut tx = self.db.begin().await?;

        let orders = self
            .repository
            .list_orders_by_status(&mut tx, user, status)
            .await?;

        tx.commit().await?;

        Ok(orders)
    }

    async fn get_order(
        &self,
        user: UserUuid,
        order: OrderUuid,
    ) -> Result<OrderRecord, OrdersServiceError> {
        let mut tx = self.db.begin().await?;

        let record = self.repository.get_order(&mut tx, order).await?;

        tx.commit().await?;

        if record.user_uuid != user {
            warn!(%user, %order, "order requested by a user who does not own it");

            return Err(OrdersServiceError::Forbidden);
        }

        Ok(record)
    }

    async fn count_orders(&self, user: UserUuid) -> Result<u64, OrdersServiceError> {
        let mut tx = self.db.begin().await?;

        let count = self.repository.count_orders(&mut tx, user).await?;

        tx.commit().await?;

        Ok(count)
    }

    async fn total_spent(&self, user: UserUuid) -> Result<Decimal, OrdersServiceError> {
        let mut tx = self.db.begin().await?;

        let total = self.repository.total_spent(&mut tx, user).await?;

        tx.commit().await?;

        Ok(total)
    }
}

#[automock]
#[async_trait]
pub trait OrdersService: Send + Sync {
    /// The user's orders with their items, newest first.
    async fn list_orders(&self, user: UserUuid) -> Result<Vec<OrderRecord>, OrdersServiceError>;

    /// The user's orders in the given status, newest first.
    async fn list_orders_by_status(
        &self,
        user: UserUuid,
        status: OrderStatus,
    ) -> Result<Vec<OrderRecord>, OrdersServiceError>;

    /// Retrieve one order with its items.
    ///
    /// An order that exists but belongs to someone else yields
    /// [`OrdersServiceError::Forbidden`] rather than `NotFound`.
    async fn get_order(
        &self,
        user: UserUuid,
        order: OrderUuid,
    ) -> Result<OrderRecord, OrdersServiceError>;

    async fn count_orders(&self, user: UserUuid) -> Result<u64, OrdersServiceError>;

    /// Sum of the user's order totals.
    async fn total_spent(&self, user: UserUuid) -> Result<Decimal, OrdersServiceError>;
}
