//! Razorpay REST client and signature verification.
//!
//! The storefront only needs two gateway capabilities: creating an order
//! before the client-side checkout widget runs, and verifying HMAC
//! signatures on the callback and webhook paths. Refunds live in the
//! admin backend.

pub mod signature;
pub mod types;

use secrecy::ExposeSecret;
use thiserror::Error;

use crate::config::RazorpayConfig;

pub use types::{GatewayOrder, WebhookEvent};

/// Errors from the Razorpay API.
#[derive(Debug, Error)]
pub enum RazorpayError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// API returned an error response.
    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },
}

/// Razorpay API client (key-authenticated, storefront scope).
#[derive(Clone)]
pub struct RazorpayClient {
    client: reqwest::Client,
    base_url: String,
    key_id: String,
    key_secret: secrecy::SecretString,
}

impl RazorpayClient {
    /// Create a new client from config.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client fails to build.
    pub fn new(config: &RazorpayConfig) -> Result<Self, RazorpayError> {
        let client = reqwest::Client::builder().build()?;

        Ok(Self {
            client,
            base_url: config.base_url.clone(),
            key_id: config.key_id.clone(),
            key_secret: config.key_secret.clone(),
        })
    }

    /// The public key id, exposed to the checkout widget.
    #[must_use]
    pub fn key_id(&self) -> &str {
        &self.key_id
    }

    /// Create a gateway order for the given amount in paise.
    ///
    /// # Errors
    ///
    /// Returns `RazorpayError::Api` on a non-2xx response.
    pub async fn create_order(
        &self,
        amount_paise: i64,
        currency: &str,
        receipt: &str,
    ) -> Result<GatewayOrder, RazorpayError> {
        let url = format!("{}/orders", self.base_url);

        let body = serde_json::json!({
            "amount": amount_paise,
            "currency": currency,
            "receipt": receipt,
        });

        let response = self
            .client
            .post(&url)
            .basic_auth(&self.key_id, Some(self.key_secret.expose_secret()))
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(RazorpayError::Api {
                status: status.as_u16(),
                message,
            });
        }

        Ok(response.json::<GatewayOrder>().await?)
    }
}
