//! Checkout Records

use rust_decimal::Decimal;

use crate::domain::carts::records::CartItemRecord;

/// What a checkout would place right now, without placing it.
#[derive(Debug, Clone, PartialEq)]
pub struct CheckoutSummary {
    pub items: Vec<CartItemRecord>,
    pub total: Decimal,
}
