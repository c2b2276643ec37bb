//! Order Records

use jiff::Timestamp;
use rust_decimal::Decimal;
use rusty_money::iso::Currency;
use trolley::{
    pricing::{PricingError, line_subtotal},
    receipt::{Receipt, ReceiptError, ReceiptLine},
};

pub use trolley::orders::OrderStatus;

use crate::{
    domain::{products::records::ProductUuid, users::records::UserUuid},
    uuids::TypedUuid,
};

/// Order UUID
pub type OrderUuid = TypedUuid<OrderRecord>;

/// Order Item UUID
pub type OrderItemUuid = TypedUuid<OrderItemRecord>;

/// Order Record
///
/// Orders are immutable once placed; `total_price` is the sum of the line subtotals
/// at their purchase prices.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderRecord {
    pub uuid: OrderUuid,
    pub user_uuid: UserUuid,
    pub total_price: Decimal,
    pub status: OrderStatus,
    pub created_at: Timestamp,
    pub items: Vec<OrderItemRecord>,
}

impl OrderRecord {
    /// Render-ready receipt for this order.
    ///
    /// # Errors
    ///
    /// Returns a [`ReceiptError`] if a line subtotal overflows.
    pub fn receipt(&self, currency: &'static Currency) -> Result<Receipt, ReceiptError> {
        let lines = self
            .items
            .iter()
            .map(|item| ReceiptLine {
                name: item.product_name.clone(),
                quantity: item.quantity,
                unit_price: item.price_at_purchase,
            })
            .collect::<Vec<_>>();

        Ok(Receipt::new(lines, currency)?.with_reference(self.uuid.to_string()))
    }
}

/// Order Item Record
#[derive(Debug, Clone, PartialEq)]
pub struct OrderItemRecord {
    pub uuid: OrderItemUuid,
    pub order_uuid: OrderUuid,
    pub product_uuid: ProductUuid,
    pub product_name: String,
    pub quantity: u32,
    pub price_at_purchase: Decimal,
}

impl OrderItemRecord {
    /// # Errors
    ///
    /// Returns [`PricingError::Overflow`] if the multiplication overflows.
    pub fn subtotal(&self) -> Result<Decimal, PricingError> {
        line_subtotal(self.price_at_purchase, self.quantity)
    }
}
