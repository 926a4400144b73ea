//! Wire types for the Razorpay REST API and webhook deliveries.

use serde::{Deserialize, Serialize};

/// A gateway order, as returned by `POST /orders`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GatewayOrder {
    /// Gateway order id (`order_...`).
    pub id: String,
    /// Amount in paise.
    pub amount: i64,
    /// ISO 4217 currency code.
    pub currency: String,
    /// The receipt string we supplied.
    pub receipt: Option<String>,
    /// Gateway order status (`created`, `attempted`, `paid`).
    pub status: String,
}

/// Top-level webhook envelope.
///
/// Only the fields this service consumes are modeled; unknown fields in
/// deliveries are ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct WebhookEvent {
    /// Event name, e.g. `payment.captured`.
    pub event: String,
    pub payload: WebhookPayload,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct WebhookPayload {
    #[serde(default)]
    pub payment: Option<WebhookEntity<WebhookPayment>>,
    #[serde(default)]
    pub refund: Option<WebhookEntity<WebhookRefund>>,
}

/// Entities arrive wrapped in an `{"entity": ...}` object.
#[derive(Debug, Clone, Deserialize)]
pub struct WebhookEntity<T> {
    pub entity: T,
}

/// Payment entity inside `payment.*` events.
#[derive(Debug, Clone, Deserialize)]
pub struct WebhookPayment {
    /// Gateway payment id (`pay_...`).
    pub id: String,
    /// Gateway order id (`order_...`).
    pub order_id: Option<String>,
    /// Amount in paise.
    pub amount: i64,
    pub currency: String,
    pub status: String,
}

/// Refund entity inside `refund.*` events.
#[derive(Debug, Clone, Deserialize)]
pub struct WebhookRefund {
    /// Gateway refund id (`rfnd_...`).
    pub id: String,
    /// The payment being refunded (`pay_...`).
    pub payment_id: String,
    /// Refunded amount in paise.
    pub amount: i64,
    pub currency: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_payment_captured_event() {
        let body = r#"{
            "event": "payment.captured",
            "payload": {
                "payment": {
                    "entity": {
                        "id": "pay_123",
                        "order_id": "order_456",
                        "amount": 18000,
                        "currency": "INR",
                        "status": "captured"
                    }
                }
            }
        }"#;

        let event: WebhookEvent = serde_json::from_str(body).unwrap();
        assert_eq!(event.event, "payment.captured");
        let payment = event.payload.payment.unwrap().entity;
        assert_eq!(payment.id, "pay_123");
        assert_eq!(payment.amount, 18000);
    }

    #[test]
    fn parses_refund_created_event() {
        let body = r#"{
            "event": "refund.created",
            "payload": {
                "refund": {
                    "entity": {
                        "id": "rfnd_789",
                        "payment_id": "pay_123",
                        "amount": 18000,
                        "currency": "INR"
                    }
                }
            }
        }"#;

        let event: WebhookEvent = serde_json::from_str(body).unwrap();
        let refund = event.payload.refund.unwrap().entity;
        assert_eq!(refund.payment_id, "pay_123");
    }

    #[test]
    fn tolerates_unmodeled_payload_entities() {
        let body = r#"{"event": "order.paid", "payload": {}}"#;
        let event: WebhookEvent = serde_json::from_str(body).unwrap();
        assert!(event.payload.payment.is_none());
        assert!(event.payload.refund.is_none());
    }
}
