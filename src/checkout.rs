//! Checkout planning
//!
//! Turns a basket into a priced [`OrderDraft`]. Persistence layers run this against
//! the basket they loaded inside their transaction, then apply the stock decrements
//! themselves.

use std::fmt::Debug;

use thiserror::Error;

use crate::{
    basket::Basket,
    orders::{OrderDraft, OrderLine},
    pricing::PricingError,
    stock::{StockShortfall, find_shortfall},
};

/// Reasons a basket cannot be turned into an order.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CheckoutError<K: Debug> {
    /// The basket has no lines.
    #[error("cannot checkout with an empty cart")]
    EmptyCart,

    /// A line asks for more units than are in stock.
    #[error(
        "insufficient stock for product {}: available {}, requested {}",
        .0.name,
        .0.available,
        .0.requested
    )]
    InsufficientStock(StockShortfall<K>),

    /// The order total could not be calculated.
    #[error(transparent)]
    Pricing(#[from] PricingError),
}

/// Validate a basket and snapshot its current prices into an order draft.
///
/// Checks run in order: the basket must not be empty, then every line must fit
/// in stock. No line is priced until all lines have passed the stock check.
///
/// # Errors
///
/// - [`CheckoutError::EmptyCart`]: the basket has no lines.
/// - [`CheckoutError::InsufficientStock`]: the first line whose quantity exceeds stock.
/// - [`CheckoutError::Pricing`]: the total overflowed.
pub fn plan<K: Copy + Eq + Debug>(basket: &Basket<K>) -> Result<OrderDraft<K>, CheckoutError<K>> {
    if basket.is_empty() {
        return Err(CheckoutError::EmptyCart);
    }

    if let Some(shortfall) = find_shortfall(basket) {
        return Err(CheckoutError::InsufficientStock(shortfall));
    }

    let draft = basket
        .iter()
        .try_fold(OrderDraft::new(), |draft, item| {
            draft.with_line(OrderLine::from(item))
        })?;

    Ok(draft)
}
