//! AI content helpers backed by the Anthropic messages API.
//!
//! Drafts product descriptions and suggests priced units for admins
//! filling in the catalog. Requests walk a fallback list of models; the
//! last error surfaces only if every model fails.

mod client;
mod error;
mod types;

pub use client::AiClient;
pub use error::AiError;
