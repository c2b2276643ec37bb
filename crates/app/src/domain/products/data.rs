//! Products Data

use rust_decimal::Decimal;
use trolley::pricing::{PricingError, validate_price};

use crate::domain::products::{errors::ProductsServiceError, records::ProductUuid};

/// Longest accepted product name, in characters.
pub const MAX_NAME_CHARS: usize = 200;

/// New Product Data
#[derive(Debug, Clone, PartialEq)]
pub struct NewProduct {
    pub uuid: ProductUuid,
    pub name: String,
    pub description: String,
    pub price: Decimal,
    pub stock: u32,
    pub image_url: Option<String>,
}

/// Product Update Data
///
/// Stock changes through restocking and checkout only.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductUpdate {
    pub name: String,
    pub description: String,
    pub price: Decimal,
    pub image_url: Option<String>,
}

impl NewProduct {
    pub(crate) fn validate(&self) -> Result<(), ProductsServiceError> {
        validate_name(&self.name)?;
        validate_price(self.price)?;

        Ok(())
    }
}

impl ProductUpdate {
    pub(crate) fn validate(&self) -> Result<(), ProductsServiceError> {
        validate_name(&self.name)?;
        validate_price(self.price)?;

        Ok(())
    }
}

fn validate_name(name: &str) -> Result<(), ProductsServiceError> {
    let name = name.trim();

    if name.is_empty() || name.chars().count() > MAX_NAME_CHARS {
        return Err(ProductsServiceError::InvalidName);
    }

    Ok(())
}

/// Inclusive price bounds, checked so `min <= max`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PriceRange {
    min: Decimal,
    max: Decimal,
}

impl PriceRange {
    /// # Errors
    ///
    /// Returns [`ProductsServiceError::InvalidPriceRange`] when `min > max`, or
    /// [`ProductsServiceError::InvalidPrice`] when a bound is negative.
    pub fn new(min: Decimal, max: Decimal) -> Result<Self, ProductsServiceError> {
        if min.is_sign_negative() {
            return Err(PricingError::NegativePrice(min).into());
        }

        if min > max {
            return Err(ProductsServiceError::InvalidPriceRange);
        }

        Ok(Self { min, max })
    }

    #[must_use]
    pub fn min(&self) -> Decimal {
        self.min
    }

    #[must_use]
    pub fn max(&self) -> Decimal {
        self.max
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    fn product(name: &str, price: Decimal) -> NewProduct {
        NewProduct {
            uuid: ProductUuid::new(),
            name: name.to_string(),
            description: String::new(),
            price,
            stock: 1,
            image_url: None,
        }
    }

    #[test]
    fn blank_and_overlong_names_are_rejected() {
        assert!(matches!(
            product("   ", Decimal::ONE).validate(),
            Err(ProductsServiceError::InvalidName)
        ));
        assert!(matches!(
            product(&"x".repeat(MAX_NAME_CHARS + 1), Decimal::ONE).validate(),
            Err(ProductsServiceError::InvalidName)
        ));
        assert!(product(&"x".repeat(MAX_NAME_CHARS), Decimal::ONE).validate().is_ok());
    }

    #[test]
    fn price_must_have_two_decimal_places_at_most() {
        assert!(matches!(
            product("Pen", Decimal::new(1999, 3)).validate(),
            Err(ProductsServiceError::InvalidPrice(PricingError::TooPrecise(_)))
        ));
        assert!(matches!(
            product("Pen", Decimal::new(-1, 0)).validate(),
            Err(ProductsServiceError::InvalidPrice(PricingError::NegativePrice(_)))
        ));
    }

    #[test]
    fn price_range_rejects_inverted_bounds() -> TestResult {
        let range = PriceRange::new(Decimal::ONE, Decimal::TEN)?;

        assert_eq!(range.min(), Decimal::ONE);
        assert_eq!(range.max(), Decimal::TEN);
        assert!(PriceRange::new(Decimal::ONE, Decimal::ONE).is_ok());
        assert!(matches!(
            PriceRange::new(Decimal::TEN, Decimal::ONE),
            Err(ProductsServiceError::InvalidPriceRange)
        ));

        Ok(())
    }
}
