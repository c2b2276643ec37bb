//! Authentication
//!
//! Users log in with a username and password and receive an opaque bearer token.
//! Only a SHA-256 verifier of the token is stored, so a database dump does not
//! contain usable credentials.

mod errors;
mod models;
mod repository;
mod service;
mod token;

pub use errors::*;
pub use models::*;
pub use service::*;
pub use token::*;
