//! Middleware: sessions and admin auth extractors.

pub mod auth;
pub mod session;
