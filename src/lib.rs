//! Trolley
//!
//! Trolley is the pure domain core of a shopping cart: cart lines, exact decimal pricing,
//! stock checks, checkout planning and receipts. It performs no I/O of its own.

pub mod basket;
pub mod checkout;
pub mod items;
pub mod orders;
pub mod prelude;
pub mod pricing;
pub mod receipt;
pub mod stock;
