//! Carts service.

use async_trait::async_trait;
use mockall::automock;
use rust_decimal::Decimal;
use trolley::{pricing::total_price, stock::find_shortfall};

use crate::{
    database::Db,
    domain::{
        carts::{
            data::NewCartItem,
            errors::CartsServiceError,
            records::{CartItemRecord, CartItemUuid, CartRecord},
            repository::PgCartItemsRepository,
        },
        users::records::UserUuid,
    },
};

#[derive(Debug, Clone)]
pub struct PgCartsService {
    db: Db,
    repository: PgCartItemsRepository,
}

impl PgCartsService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgCartItemsRepository::new(),
        }
    }
}

/// Build a cart from its lines, totalling them at the current prices.
pub(crate) fn cart_from_items(
    user: UserUuid,
    items: Vec<CartItemRecord>,
) -> Result<CartRecord, CartsServiceError> {
    let subtotals = items
        .iter()
        .map(CartItemRecord::subtotal)
        .collect::<Result<Vec<_>, _>>()?;

    Ok(CartRecord {
        user_uuid: user,
        total: total_price(subtotals)?,
        items,
    })
}

#[async_trait]
impl CartsService for PgCartsService {
    async fn get_cart(&self, user: UserUuid) -> Result<CartRecord, CartsServiceError> {
        let mut tx = self.db.begin().await?;

        let items = self.repository.list_cart_items(&mut tx, user).await?;

        tx.commit().await?;

        cart_from_items(user, items)
    }

    async fn add_item(
        &self,
        user: UserUuid,
        item: NewCartItem,
    ) -> Result<CartItemRecord, CartsServiceError> {
        if item.quantity < 1 {
            return Err(CartsServiceError::InvalidQuantity);
        }

        let mut tx = self.db.begin().await?;

        let added = self
            .repository
            .add_cart_item(&mut tx, user, item.uuid, item.product_uuid, item.quantity)
            .await?;

        tx.commit().await?;

        Ok(added)
    }

    async fn update_quantity(
        &self,
        user: UserUuid,
        item: CartItemUuid,
        quantity: i32,
    ) -> Result<Option<CartItemRecord>, CartsServiceError> {
        let mut tx = self.db.begin().await?;

        if quantity <= 0 {
            let rows_affected = self.repository.delete_cart_item(&mut tx, user, item).await?;

            if rows_affected == 0 {
                return Err(CartsServiceError::NotFound);
            }

            tx.commit().await?;

            return Ok(None);
        }

        let updated = self
            .repository
            .update_cart_item_quantity(&mut tx, user, item, quantity)
            .await?;

        tx.commit().await?;

        Ok(Some(updated))
    }

    async fn remove_item(&self, user: UserUuid, item: CartItemUuid) -> Result<(), CartsServiceError> {
        let mut tx = self.db.begin().await?;

        let rows_affected = self.repository.delete_cart_item(&mut tx, user, item).await?;

        if rows_affected == 0 {
            return Err(CartsServiceError::NotFound);
        }

        tx.commit().await?;

        Ok(())
    }

    async fn clear_cart(&self, user: UserUuid) -> Result<u64, CartsServiceError> {
        let mut tx = self.db.begin().await?;

        let rows_affected = self.repository.clear_cart(&mut tx, user).await?;

        tx.commit().await?;

        Ok(rows_affected)
    }

    async fn count_items(&self, user: UserUuid) -> Result<u64, CartsServiceError> {
        let mut tx = self.db.begin().await?;

        let count = self.repository.count_cart_items(&mut tx, user).await?;

        tx.commit().await?;

        Ok(count)
    }

    async fn cart_total(&self, user: UserUuid) -> Result<Decimal, CartsServiceError> {
        let mut tx = self.db.begin().await?;

        let total = self.repository.cart_total(&mut tx, user).await?;

        tx.commit().await?;

        Ok(total)
    }

    async fn validate_stock(&self, user: UserUuid) -> Result<bool, CartsServiceError> {
        let cart = self.get_cart(user).await?;

        Ok(find_shortfall(&cart.basket()?).is_none())
    }
}

#[automock]
#[async_trait]
pub trait CartsService: Send + Sync {
    /// Retrieve the user's cart with current prices and its total.
    async fn get_cart(&self, user: UserUuid) -> Result<CartRecord, CartsServiceError>;

    /// Add a product to the cart, merging with an existing line for the same product.
    ///
    /// Stock is not checked here; checkout does that.
    async fn add_item(
        &self,
        user: UserUuid,
        item: NewCartItem,
    ) -> Result<CartItemRecord, CartsServiceError>;

    /// Set a line's quantity. Zero or less removes the line and returns `None`.
    async fn update_quantity(
        &self,
        user: UserUuid,
        item: CartItemUuid,
        quantity: i32,
    ) -> Result<Option<CartItemRecord>, CartsServiceError>;

    async fn remove_item(&self, user: UserUuid, item: CartItemUuid) -> Result<(), CartsServiceError>;

    /// Remove every line, returning how many were removed.
    async fn clear_cart(&self, user: UserUuid) -> Result<u64, CartsServiceError>;

    async fn count_items(&self, user: UserUuid) -> Result<u64, CartsServiceError>;

    async fn cart_total(&self, user: UserUuid) -> Result<Decimal, CartsServiceError>;

    /// Whether every line fits within current stock.
    async fn validate_stock(&self, user: UserUuid) -> Result<bool, CartsServiceError>;
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;
    use testresult::TestResult;

    use crate::{
        domain::products::{ProductsService, records::ProductUuid},
        test::{
            TestContext,
            helpers::{add_item, create_product, create_user},
        },
    };

    use super::*;

    #[tokio::test]
    async fn empty_cart_has_zero_total() -> TestResult {
        let ctx = TestContext::new().await;
        let user = create_user(&ctx, "alice").await?;

        let cart = ctx.carts.get_cart(user.uuid).await?;

        assert!(cart.is_empty());
        assert_eq!(cart.total, Decimal::ZERO);
        assert_eq!(ctx.carts.cart_total(user.uuid).await?, Decimal::ZERO);
        assert_eq!(ctx.carts.count_items(user.uuid).await?, 0);

        Ok(())
    }

    #[tokio::test]
    async fn add_item_merges_quantities_for_same_product() -> TestResult {
        let ctx = TestContext::new().await;
        let user = create_user(&ctx, "alice").await?;
        let product = create_product(&ctx, "Notebook", Decimal::new(350, 2), 10).await?;

        let first = add_item(&ctx, user.uuid, product.uuid, 2).await?;
        let second = add_item(&ctx, user.uuid, product.uuid, 3).await?;

        assert_eq!(second.uuid, first.uuid, "line should be reused");
        assert_eq!(second.quantity, 5);
        assert_eq!(ctx.carts.count_items(user.uuid).await?, 1);

        Ok(())
    }

    #[tokio::test]
    async fn add_item_rejects_non_positive_quantity() -> TestResult {
        let ctx = TestContext::new().await;
        let user = create_user(&ctx, "alice").await?;
        let product = create_product(&ctx, "Notebook", Decimal::ONE, 10).await?;

        for quantity in [0, -2] {
            let result = add_item(&ctx, user.uuid, product.uuid, quantity).await;

            assert!(
                matches!(result, Err(CartsServiceError::InvalidQuantity)),
                "expected InvalidQuantity for {quantity}, got {result:?}"
            );
        }

        Ok(())
    }

    #[tokio::test]
    async fn add_item_merge_past_integer_range_is_invalid_quantity() -> TestResult {
        let ctx = TestContext::new().await;
        let user = create_user(&ctx, "alice").await?;
        let product = create_product(&ctx, "Notebook", Decimal::ONE, 10).await?;

        add_item(&ctx, user.uuid, product.uuid, i32::MAX).await?;

        let result = add_item(&ctx, user.uuid, product.uuid, 1).await;

        assert!(
            matches!(result, Err(CartsServiceError::InvalidQuantity)),
            "expected InvalidQuantity, got {result:?}"
        );

        let cart = ctx.carts.get_cart(user.uuid).await?;

        assert_eq!(cart.items.len(), 1);
        assert_eq!(cart.items[0].quantity, i32::MAX.unsigned_abs());

        Ok(())
    }

    #[tokio::test]
    async fn add_item_unknown_product_returns_not_found() -> TestResult {
        let ctx = TestContext::new().await;
        let user = create_user(&ctx, "alice").await?;

        let result = add_item(&ctx, user.uuid, ProductUuid::new(), 1).await;

        assert!(
            matches!(result, Err(CartsServiceError::NotFound)),
            "expected NotFound, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn add_item_does_not_check_stock() -> TestResult {
        let ctx = TestContext::new().await;
        let user = create_user(&ctx, "alice").await?;
        let product = create_product(&ctx, "Rare Coin", Decimal::TEN, 1).await?;

        add_item(&ctx, user.uuid, product.uuid, 5).await?;

        assert!(!ctx.carts.validate_stock(user.uuid).await?);

        Ok(())
    }

    #[tokio::test]
    async fn cart_total_uses_current_prices() -> TestResult {
        let ctx = TestContext::new().await;
        let user = create_user(&ctx, "alice").await?;
        let lamp = create_product(&ctx, "Lamp", Decimal::new(1000, 2), 10).await?;
        let bulb = create_product(&ctx, "Bulb", Decimal::new(500, 2), 10).await?;

        add_item(&ctx, user.uuid, lamp.uuid, 2).await?;
        add_item(&ctx, user.uuid, bulb.uuid, 1).await?;

        let cart = ctx.carts.get_cart(user.uuid).await?;

        assert_eq!(cart.items.len(), 2);
        assert_eq!(cart.total, Decimal::new(2500, 2));
        assert_eq!(ctx.carts.cart_total(user.uuid).await?, Decimal::new(2500, 2));
        assert!(ctx.carts.validate_stock(user.uuid).await?);

        ctx.products.set_stock(bulb.uuid, 0).await?;

        assert!(!ctx.carts.validate_stock(user.uuid).await?);

        Ok(())
    }

    #[tokio::test]
    async fn update_quantity_sets_or_removes_line() -> TestResult {
        let ctx = TestContext::new().await;
        let user = create_user(&ctx, "alice").await?;
        let product = create_product(&ctx, "Mug", Decimal::new(800, 2), 10).await?;

        let line = add_item(&ctx, user.uuid, product.uuid, 1).await?;

        let updated = ctx.carts.update_quantity(user.uuid, line.uuid, 4).await?;

        assert_eq!(updated.map(|item| item.quantity), Some(4));

        let removed = ctx.carts.update_quantity(user.uuid, line.uuid, 0).await?;

        assert!(removed.is_none());
        assert_eq!(ctx.carts.count_items(user.uuid).await?, 0);

        Ok(())
    }

    #[tokio::test]
    async fn other_users_lines_are_not_reachable() -> TestResult {
        let ctx = TestContext::new().await;
        let alice = create_user(&ctx, "alice").await?;
        let mallory = create_user(&ctx, "mallory").await?;
        let product = create_product(&ctx, "Mug", Decimal::ONE, 10).await?;

        let line = add_item(&ctx, alice.uuid, product.uuid, 1).await?;

        let update = ctx.carts.update_quantity(mallory.uuid, line.uuid, 9).await;
        let remove = ctx.carts.remove_item(mallory.uuid, line.uuid).await;

        assert!(
            matches!(update, Err(CartsServiceError::NotFound)),
            "expected NotFound, got {update:?}"
        );
        assert!(
            matches!(remove, Err(CartsServiceError::NotFound)),
            "expected NotFound, got {remove:?}"
        );
        assert_eq!(ctx.carts.get_cart(alice.uuid).await?.items[0].quantity, 1);

        Ok(())
    }

    #[tokio::test]
    async fn remove_item_unknown_returns_not_found() -> TestResult {
        let ctx = TestContext::new().await;
        let user = create_user(&ctx, "alice").await?;

        let result = ctx.carts.remove_item(user.uuid, CartItemUuid::new()).await;

        assert!(
            matches!(result, Err(CartsServiceError::NotFound)),
            "expected NotFound, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn clear_cart_reports_removed_lines() -> TestResult {
        let ctx = TestContext::new().await;
        let user = create_user(&ctx, "alice").await?;
        let pen = create_product(&ctx, "Pen", Decimal::ONE, 10).await?;
        let ink = create_product(&ctx, "Ink", Decimal::ONE, 10).await?;

        add_item(&ctx, user.uuid, pen.uuid, 1).await?;
        add_item(&ctx, user.uuid, ink.uuid, 1).await?;

        assert_eq!(ctx.carts.clear_cart(user.uuid).await?, 2);
        assert_eq!(ctx.carts.clear_cart(user.uuid).await?, 0);

        Ok(())
    }
}
