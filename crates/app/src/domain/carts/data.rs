//! Cart Data

use crate::domain::{carts::records::CartItemUuid, products::records::ProductUuid};

/// New Cart Item Data
///
/// `quantity` is signed so callers can pass user input through unchecked; the service
/// rejects anything below one.
#[derive(Debug, Clone, PartialEq)]
pub struct NewCartItem {
    pub uuid: CartItemUuid,
    pub product_uuid: ProductUuid,
    pub quantity: i32,
}
