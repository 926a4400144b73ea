//! Domain models for the storefront.

pub mod order;
pub mod product;
pub mod review;
pub mod session;
pub mod user;

pub use session::{CurrentUser, session_keys};
