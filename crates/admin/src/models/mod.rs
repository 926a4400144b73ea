//! Domain models for the admin backend.

pub mod dashboard;
pub mod intake;
pub mod order;
pub mod product;
pub mod session;
pub mod user;

pub use session::{CurrentAdmin, session_keys};
