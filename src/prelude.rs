//! Trolley prelude.
//!
//! Convenience exports for common library consumers.

pub use crate::{
    basket::{Basket, BasketError},
    checkout::{CheckoutError, plan},
    items::LineItem,
    orders::{OrderDraft, OrderLine, OrderStatus, UnknownOrderStatus},
    pricing::{PricingError, line_subtotal, total_price, validate_price},
    receipt::{Receipt, ReceiptError, ReceiptLine},
    stock::{StockShortfall, find_shortfall, has_stock},
};
