//! Stock

use crate::{basket::Basket, items::LineItem};

/// A basket line that asks for more units than the product has.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StockShortfall<K> {
    /// Product key
    pub product: K,

    /// Product name, for messages
    pub name: String,

    /// Units in stock
    pub available: u32,

    /// Units requested
    pub requested: u32,
}

impl<K: Copy> From<&LineItem<K>> for StockShortfall<K> {
    fn from(item: &LineItem<K>) -> Self {
        Self {
            product: item.product(),
            name: item.name().to_string(),
            available: item.stock(),
            requested: item.quantity(),
        }
    }
}

/// Whether `available` units can satisfy a request for `requested` units.
#[must_use]
pub fn has_stock(available: u32, requested: u32) -> bool {
    available >= requested
}

/// Find the first line the current stock cannot satisfy.
///
/// Every line is considered before anything is mutated, so callers can reject a
/// basket as a whole.
pub fn find_shortfall<K: Copy + Eq>(basket: &Basket<K>) -> Option<StockShortfall<K>> {
    basket
        .iter()
        .find(|item| !has_stock(item.stock(), item.quantity()))
        .map(StockShortfall::from)
}
