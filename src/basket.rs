//! Basket

use rust_decimal::Decimal;
use thiserror::Error;

use crate::{
    items::LineItem,
    pricing::{PricingError, total_price},
};

/// Errors related to basket construction.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BasketError {
    /// A line was added with a quantity of zero.
    #[error("quantity must be at least 1")]
    ZeroQuantity,

    /// Merging two lines for the same product exceeded the quantity range.
    #[error("quantity overflowed while merging lines")]
    QuantityOverflow,
}

/// The lines of one user's cart, at most one per product.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Basket<K> {
    items: Vec<LineItem<K>>,
}

impl<K> Default for Basket<K> {
    fn default() -> Self {
        Self { items: Vec::new() }
    }
}

impl<K: Copy + Eq> Basket<K> {
    /// Create an empty basket.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a basket from the given lines, merging lines for the same product.
    ///
    /// # Errors
    ///
    /// Returns a `BasketError` if any line has a zero quantity or a merge overflows.
    pub fn with_items(items: impl IntoIterator<Item = LineItem<K>>) -> Result<Self, BasketError> {
        items.into_iter().try_fold(Self::new(), |mut basket, item| {
            basket.add(item)?;

            Ok(basket)
        })
    }

    /// Add a line. If the product is already present its quantity grows by the new
    /// line's quantity, otherwise the line is appended.
    ///
    /// # Errors
    ///
    /// Returns a `BasketError` if the quantity is zero or the merged quantity overflows.
    pub fn add(&mut self, item: LineItem<K>) -> Result<(), BasketError> {
        if item.quantity() == 0 {
            return Err(BasketError::ZeroQuantity);
        }

        match self
            .items
            .iter_mut()
            .find(|existing| existing.product() == item.product())
        {
            Some(existing) => {
                let quantity = existing
                    .quantity()
                    .checked_add(item.quantity())
                    .ok_or(BasketError::QuantityOverflow)?;

                existing.set_quantity(quantity);
            }
            None => self.items.push(item),
        }

        Ok(())
    }

    /// Get the line for a product.
    pub fn get(&self, product: K) -> Option<&LineItem<K>> {
        self.items.iter().find(|item| item.product() == product)
    }

    /// Calculate the basket total at current catalog prices.
    ///
    /// # Errors
    ///
    /// Returns [`PricingError::Overflow`] if the total overflows.
    pub fn subtotal(&self) -> Result<Decimal, PricingError> {
        let subtotals = self
            .items
            .iter()
            .map(LineItem::subtotal)
            .collect::<Result<Vec<_>, _>>()?;

        total_price(subtotals)
    }

    /// Iterate over the lines in the basket.
    pub fn iter(&self) -> impl Iterator<Item = &LineItem<K>> {
        self.items.iter()
    }

    /// Get the number of lines in the basket.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Check if the basket is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    fn item(product: u8, price: i64, quantity: u32) -> LineItem<u8> {
        LineItem::new(product, format!("Product {product}"), Decimal::new(price, 2), quantity, 100)
    }

    #[test]
    fn adding_same_product_twice_merges_quantities() -> TestResult {
        let mut basket = Basket::new();

        basket.add(item(1, 1000, 2))?;
        basket.add(item(1, 1000, 3))?;

        assert_eq!(basket.len(), 1);
        assert_eq!(basket.get(1).map(LineItem::quantity), Some(5));

        Ok(())
    }

    #[test]
    fn with_items_keeps_distinct_products() -> TestResult {
        let basket = Basket::with_items([item(1, 1000, 2), item(2, 500, 1)])?;

        assert_eq!(basket.len(), 2);
        assert_eq!(basket.subtotal()?, Decimal::new(2500, 2));

        Ok(())
    }

    #[test]
    fn zero_quantity_is_rejected() {
        let mut basket = Basket::new();

        assert_eq!(basket.add(item(1, 1000, 0)), Err(BasketError::ZeroQuantity));
        assert!(basket.is_empty());
    }

    #[test]
    fn merge_overflow_is_rejected() -> TestResult {
        let mut basket = Basket::new();

        basket.add(item(1, 1000, u32::MAX))?;

        assert_eq!(basket.add(item(1, 1000, 1)), Err(BasketError::QuantityOverflow));

        Ok(())
    }

    #[test]
    fn empty_basket_subtotal_is_zero() -> TestResult {
        let basket = Basket::<u8>::new();

        assert_eq!(basket.subtotal()?, Decimal::ZERO);

        Ok(())
    }
}
