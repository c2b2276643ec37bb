//! Product Records

use jiff::Timestamp;
use rust_decimal::Decimal;

use crate::uuids::TypedUuid;

/// Product UUID
pub type ProductUuid = TypedUuid<ProductRecord>;

/// Product Record
#[derive(Debug, Clone, PartialEq)]
pub struct ProductRecord {
    pub uuid: ProductUuid,
    pub name: String,
    pub description: String,
    pub price: Decimal,
    pub stock: u32,
    pub image_url: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl ProductRecord {
    #[must_use]
    pub fn in_stock(&self) -> bool {
        self.stock > 0
    }
}
