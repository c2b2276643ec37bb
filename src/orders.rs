//! Orders

use std::{
    fmt::{Display, Formatter, Result as FmtResult},
    str::FromStr,
};

use rust_decimal::Decimal;
use smallvec::SmallVec;
use thiserror::Error;

use crate::{
    items::LineItem,
    pricing::{PricingError, line_subtotal},
};

/// Lifecycle state of an order.
///
/// Orders are created as [`OrderStatus::Pending`]; nothing moves them between states.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OrderStatus {
    /// Placed, awaiting payment.
    #[default]
    Pending,

    /// Payment received.
    Paid,

    /// Handed to a carrier.
    Shipped,

    /// Received by the customer.
    Delivered,
}

impl OrderStatus {
    /// Storage representation
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "PENDING",
            Self::Paid => "PAID",
            Self::Shipped => "SHIPPED",
            Self::Delivered => "DELIVERED",
        }
    }
}

impl Display for OrderStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.as_str())
    }
}

/// Returned when parsing an unknown order status.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown order status: {0}")]
pub struct UnknownOrderStatus(pub String);

impl FromStr for OrderStatus {
    type Err = UnknownOrderStatus;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.to_ascii_uppercase().as_str() {
            "PENDING" => Ok(Self::Pending),
            "PAID" => Ok(Self::Paid),
            "SHIPPED" => Ok(Self::Shipped),
            "DELIVERED" => Ok(Self::Delivered),
            _ => Err(UnknownOrderStatus(value.to_string())),
        }
    }
}

/// One line of an order with its price frozen at purchase time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderLine<K> {
    /// Product key
    pub product: K,

    /// Product name at purchase time
    pub name: String,

    /// Units bought
    pub quantity: u32,

    /// Unit price at purchase time
    pub price_at_purchase: Decimal,
}

impl<K> OrderLine<K> {
    /// Line subtotal at the purchase price.
    ///
    /// # Errors
    ///
    /// Returns [`PricingError::Overflow`] if the multiplication overflows.
    pub fn subtotal(&self) -> Result<Decimal, PricingError> {
        line_subtotal(self.price_at_purchase, self.quantity)
    }
}

impl<K: Copy> From<&LineItem<K>> for OrderLine<K> {
    fn from(item: &LineItem<K>) -> Self {
        Self {
            product: item.product(),
            name: item.name().to_string(),
            quantity: item.quantity(),
            price_at_purchase: item.unit_price(),
        }
    }
}

/// An order that has been priced but not yet persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderDraft<K> {
    status: OrderStatus,
    lines: SmallVec<[OrderLine<K>; 4]>,
    total: Decimal,
}

impl<K> Default for OrderDraft<K> {
    fn default() -> Self {
        Self {
            status: OrderStatus::Pending,
            lines: SmallVec::new(),
            total: Decimal::ZERO,
        }
    }
}

impl<K> OrderDraft<K> {
    /// Create an empty pending draft.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a new draft with `line` appended and the total grown by its subtotal.
    ///
    /// # Errors
    ///
    /// Returns [`PricingError::Overflow`] if the subtotal or total overflows.
    pub fn with_line(mut self, line: OrderLine<K>) -> Result<Self, PricingError> {
        let subtotal = line.subtotal()?;

        self.total = self
            .total
            .checked_add(subtotal)
            .ok_or(PricingError::Overflow)?;

        self.lines.push(line);

        Ok(self)
    }

    /// Draft status
    pub fn status(&self) -> OrderStatus {
        self.status
    }

    /// Lines in the order they were added
    pub fn lines(&self) -> &[OrderLine<K>] {
        &self.lines
    }

    /// Sum of the line subtotals
    pub fn total(&self) -> Decimal {
        self.total
    }

    /// Number of lines
    #[must_use]
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Whether the draft has no lines
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}
