//! Checkout service.
//!
//! Checkout converts every line of a user's cart into one order inside a single
//! transaction. The cart is read and planned with [`trolley::checkout::plan`], which
//! rejects empty carts and short lines before anything is written. Stock is then taken
//! with a conditional decrement per line, in product UUID order so that concurrent
//! checkouts lock rows in the same sequence. A decrement that finds less stock than
//! planned aborts the whole checkout with [`CheckoutServiceError::ConcurrentConflict`];
//! dropping the transaction rolls back every earlier write.

use async_trait::async_trait;
use mockall::automock;
use tracing::{info, warn};
use trolley::{
    basket::Basket,
    checkout::{CheckoutError, plan},
    items::LineItem,
    orders::{OrderDraft, OrderLine},
};

use crate::{
    database::Db,
    domain::{
        carts::{records::CartItemRecord, repository::PgCartItemsRepository},
        checkout::{errors::CheckoutServiceError, records::CheckoutSummary},
        orders::{
            records::{OrderItemRecord, OrderItemUuid, OrderRecord, OrderUuid},
            repository::PgOrdersRepository,
        },
        products::{records::ProductUuid, repository::PgProductsRepository},
        users::records::UserUuid,
    },
};

#[derive(Debug, Clone)]
pub struct PgCheckoutService {
    db: Db,
    carts: PgCartItemsRepository,
    products: PgProductsRepository,
    orders: PgOrdersRepository,
}

impl PgCheckoutService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            carts: PgCartItemsRepository::new(),
            products: PgProductsRepository::new(),
            orders: PgOrdersRepository::new(),
        }
    }
}

fn plan_cart(
    user: UserUuid,
    items: &[CartItemRecord],
) -> Result<OrderDraft<ProductUuid>, CheckoutServiceError> {
    let basket = Basket::with_items(items.iter().map(LineItem::from))?;

    plan(&basket).map_err(|error| {
        if let CheckoutError::InsufficientStock(shortfall) = &error {
            warn!(
                %user,
                product = %shortfall.product,
                available = shortfall.available,
                requested = shortfall.requested,
                "checkout rejected: insufficient stock"
            );
        }

        CheckoutServiceError::from(error)
    })
}

#[async_trait]
impl CheckoutService for PgCheckoutService {
    async fn summary(&self, user: UserUuid) -> Result<CheckoutSummary, CheckoutServiceError> {
        let mut tx = self.db.begin().await?;

        let items = self.carts.list_cart_items(&mut tx, user).await?;

        tx.commit().await?;

        let draft = plan_cart(user, &items)?;

        Ok(CheckoutSummary {
            items,
            total: draft.total(),
        })
    }

    async fn checkout(&self, user: UserUuid) -> Result<OrderRecord, CheckoutServiceError> {
        let mut tx = self.db.begin().await?;

        let items = self.carts.list_cart_items(&mut tx, user).await?;

        let draft = plan_cart(user, &items)?;

        let mut decrements: Vec<&OrderLine<ProductUuid>> = draft.lines().iter().collect();

        decrements.sort_by_key(|line| line.product);

        for line in decrements {
            let taken = self
                .products
                .decrement_stock(&mut tx, line.product, line.quantity)
                .await?;

            if !taken {
                warn!(
                    %user,
                    product = %line.product,
                    requested = line.quantity,
                    "checkout aborted: stock changed concurrently"
                );

                return Err(CheckoutServiceError::ConcurrentConflict {
                    product: line.product,
                    name: line.name.clone(),
                });
            }
        }

        let order_uuid = OrderUuid::new();

        let mut order = self
            .orders
            .create_order(&mut tx, order_uuid, user, draft.total(), draft.status())
            .await?;

        for line in draft.lines() {
            let item = OrderItemRecord {
                uuid: OrderItemUuid::new(),
                order_uuid,
                product_uuid: line.product,
                product_name: line.name.clone(),
                quantity: line.quantity,
                price_at_purchase: line.price_at_purchase,
            };

            order
                .items
                .push(self.orders.create_order_item(&mut tx, &item).await?);
        }

        self.carts.clear_cart(&mut tx, user).await?;

        tx.commit().await?;

        info!(
            %user,
            order = %order.uuid,
            lines = order.items.len(),
            total = %order.total_price,
            "order placed"
        );

        Ok(order)
    }
}

#[automock]
#[async_trait]
pub trait CheckoutService: Send + Sync {
    /// Price the cart as checkout would, without writing anything.
    async fn summary(&self, user: UserUuid) -> Result<CheckoutSummary, CheckoutServiceError>;

    /// Place an order for everything in the cart, take the stock and empty the cart.
    ///
    /// Either all of that happens or none of it does.
    async fn checkout(&self, user: UserUuid) -> Result<OrderRecord, CheckoutServiceError>;
}
