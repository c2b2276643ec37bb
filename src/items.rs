//! Items

use rust_decimal::Decimal;

use crate::pricing::{PricingError, line_subtotal};

/// A cart line joined with the product state it currently points at.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LineItem<K> {
    product: K,
    name: String,
    unit_price: Decimal,
    quantity: u32,
    stock: u32,
}

impl<K: Copy> LineItem<K> {
    /// Creates a new line item.
    pub fn new(
        product: K,
        name: impl Into<String>,
        unit_price: Decimal,
        quantity: u32,
        stock: u32,
    ) -> Self {
        Self {
            product,
            name: name.into(),
            unit_price,
            quantity,
            stock,
        }
    }

    /// Product key
    pub fn product(&self) -> K {
        self.product
    }

    /// Product name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Current catalog price of one unit
    pub fn unit_price(&self) -> Decimal {
        self.unit_price
    }

    /// Requested quantity
    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    /// Units of the product currently in stock
    pub fn stock(&self) -> u32 {
        self.stock
    }

    /// Price of the whole line at the current catalog price.
    ///
    /// # Errors
    ///
    /// Returns [`PricingError::Overflow`] if the multiplication overflows.
    pub fn subtotal(&self) -> Result<Decimal, PricingError> {
        line_subtotal(self.unit_price, self.quantity)
    }

    pub(crate) fn set_quantity(&mut self, quantity: u32) {
        self.quantity = quantity;
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[test]
    fn test_subtotal() -> TestResult {
        let item = LineItem::new(1_u8, "Mug", Decimal::new(450, 2), 4, 10);

        assert_eq!(item.subtotal()?, Decimal::new(1800, 2));
        assert_eq!(item.name(), "Mug");
        assert_eq!(item.stock(), 10);

        Ok(())
    }
}
