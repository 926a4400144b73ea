//! Razorpay REST client, refund scope.
//!
//! The admin backend only talks to the gateway to refund captured
//! payments when an order is rejected. Order creation and signature
//! verification live in the storefront binary.

use secrecy::ExposeSecret;
use serde::Deserialize;
use thiserror::Error;
use tracing::instrument;

use crate::config::RazorpayConfig;

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

/// A refund as returned by the gateway. Amount is in paise.
#[derive(Debug, Clone, Deserialize)]
pub struct GatewayRefund {
    pub id: String,
    pub payment_id: String,
    pub amount: i64,
    pub currency: String,
    pub status: String,
}

/// Razorpay API client (key-authenticated, admin scope).
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

    /// Issue a full refund for a captured payment.
    ///
    /// # Errors
    ///
    /// Returns `RazorpayError::Api` on a non-2xx response.
    #[instrument(skip(self))]
    pub async fn refund_payment(&self, payment_id: &str) -> Result<GatewayRefund, RazorpayError> {
        let url = format!("{}/payments/{payment_id}/refund", self.base_url);

        // No amount in the body means a full refund
        let response = self
            .client
            .post(&url)
            .basic_auth(&self.key_id, Some(self.key_secret.expose_secret()))
            .json(&serde_json::json!({}))
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

        Ok(response.json::<GatewayRefund>().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_refund_parse() {
        let json = r#"{
            "id": "rfnd_FP8QHiV938haTz",
            "payment_id": "pay_29QQoUBi66xm2f",
            "amount": 18000,
            "currency": "INR",
            "status": "processed"
        }"#;

        let refund: GatewayRefund = serde_json::from_str(json).expect("parse");
        assert_eq!(refund.id, "rfnd_FP8QHiV938haTz");
        assert_eq!(refund.amount, 18000);
        assert_eq!(refund.status, "processed");
    }
}
