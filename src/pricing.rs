//! Pricing

use rust_decimal::Decimal;
use thiserror::Error;

/// Number of fractional digits a catalog price may carry.
pub const PRICE_SCALE: u32 = 2;

/// Errors that can occur while validating prices or calculating totals.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PricingError {
    /// A price was below zero.
    #[error("price {0} must not be negative")]
    NegativePrice(Decimal),

    /// A price carried more fractional digits than the catalog stores.
    #[error("price {0} has more than {PRICE_SCALE} fractional digits")]
    TooPrecise(Decimal),

    /// Decimal arithmetic exceeded the representable range.
    #[error("price calculation overflowed")]
    Overflow,
}

/// Checks that a price can be stored in the catalog.
///
/// # Errors
///
/// - [`PricingError::NegativePrice`]: the price is below zero.
/// - [`PricingError::TooPrecise`]: the price has more than [`PRICE_SCALE`] significant fractional digits.
pub fn validate_price(price: Decimal) -> Result<Decimal, PricingError> {
    if price.is_sign_negative() && !price.is_zero() {
        return Err(PricingError::NegativePrice(price));
    }

    if price.normalize().scale() > PRICE_SCALE {
        return Err(PricingError::TooPrecise(price));
    }

    Ok(price)
}

/// Calculates `unit_price * quantity` without rounding.
///
/// # Errors
///
/// Returns [`PricingError::Overflow`] if the multiplication overflows.
pub fn line_subtotal(unit_price: Decimal, quantity: u32) -> Result<Decimal, PricingError> {
    unit_price
        .checked_mul(Decimal::from(quantity))
        .ok_or(PricingError::Overflow)
}

/// Sums a sequence of amounts exactly.
///
/// # Errors
///
/// Returns [`PricingError::Overflow`] if the sum overflows.
pub fn total_price(amounts: impl IntoIterator<Item = Decimal>) -> Result<Decimal, PricingError> {
    amounts
        .into_iter()
        .try_fold(Decimal::ZERO, |acc, amount| {
            acc.checked_add(amount).ok_or(PricingError::Overflow)
        })
}
