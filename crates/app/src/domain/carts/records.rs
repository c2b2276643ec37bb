//! Cart Records

use jiff::Timestamp;
use rust_decimal::Decimal;
use trolley::{
    basket::{Basket, BasketError},
    items::LineItem,
    pricing::{PricingError, line_subtotal},
};

use crate::{
    domain::{products::records::ProductUuid, users::records::UserUuid},
    uuids::TypedUuid,
};

/// Cart Item UUID
pub type CartItemUuid = TypedUuid<CartItemRecord>;

/// A cart line joined with the product's current name, price and stock.
#[derive(Debug, Clone, PartialEq)]
pub struct CartItemRecord {
    pub uuid: CartItemUuid,
    pub user_uuid: UserUuid,
    pub product_uuid: ProductUuid,
    pub product_name: String,
    pub unit_price: Decimal,
    pub stock: u32,
    pub quantity: u32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl CartItemRecord {
    /// Quantity times the current unit price.
    ///
    /// # Errors
    ///
    /// Returns [`PricingError::Overflow`] if the multiplication overflows.
    pub fn subtotal(&self) -> Result<Decimal, PricingError> {
        line_subtotal(self.unit_price, self.quantity)
    }
}

impl From<&CartItemRecord> for LineItem<ProductUuid> {
    fn from(item: &CartItemRecord) -> Self {
        LineItem::new(
            item.product_uuid,
            item.product_name.clone(),
            item.unit_price,
            item.quantity,
            item.stock,
        )
    }
}

/// A user's cart
#[derive(Debug, Clone, PartialEq)]
pub struct CartRecord {
    pub user_uuid: UserUuid,
    pub items: Vec<CartItemRecord>,
    pub total: Decimal,
}

impl CartRecord {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Convert the lines into a basket for checkout planning.
    ///
    /// # Errors
    ///
    /// Returns a [`BasketError`] if a line has no quantity.
    pub fn basket(&self) -> Result<Basket<ProductUuid>, BasketError> {
        Basket::with_items(self.items.iter().map(LineItem::from))
    }
}
