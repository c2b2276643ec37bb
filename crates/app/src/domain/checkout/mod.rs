//! Checkout

pub mod errors;
pub mod records;
pub mod service;

pub use errors::CheckoutServiceError;
pub use service::*;
