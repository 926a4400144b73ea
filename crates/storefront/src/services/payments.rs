//! Unified payment-state transitions.
//!
//! The synchronous verify path and the asynchronous webhook path both
//! reduce to the same three transitions, keyed by the gateway payment id.
//! Running a transition twice (webhook retry, verify racing a webhook)
//! converges on the same row state.

use rust_decimal::Decimal;
use sqlx::PgPool;

use crate::db::RepositoryError;
use crate::db::orders::OrderRepository;
use crate::razorpay::WebhookEvent;

/// A payment-state transition extracted from either delivery path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PaymentEvent {
    Captured {
        gateway_payment_id: String,
    },
    Failed {
        gateway_payment_id: String,
    },
    Refunded {
        gateway_payment_id: String,
        refund_id: String,
        amount: Decimal,
    },
}

impl PaymentEvent {
    /// Map a webhook delivery to a transition.
    ///
    /// Returns `None` for event types this service does not act on.
    #[must_use]
    pub fn from_webhook(event: &WebhookEvent) -> Option<Self> {
        match event.event.as_str() {
            "payment.captured" => {
                let payment = event.payload.payment.as_ref()?;
                Some(Self::Captured {
                    gateway_payment_id: payment.entity.id.clone(),
                })
            }
            "payment.failed" => {
                let payment = event.payload.payment.as_ref()?;
                Some(Self::Failed {
                    gateway_payment_id: payment.entity.id.clone(),
                })
            }
            "refund.created" => {
                let refund = event.payload.refund.as_ref()?;
                Some(Self::Refunded {
                    gateway_payment_id: refund.entity.payment_id.clone(),
                    refund_id: refund.entity.id.clone(),
                    amount: Decimal::from(refund.entity.amount) / Decimal::ONE_HUNDRED,
                })
            }
            _ => None,
        }
    }
}

/// Apply a payment transition. Returns the number of rows updated; zero
/// means no transaction with that gateway payment id exists yet (a webhook
/// can outrun checkout persistence).
///
/// # Errors
///
/// Returns `RepositoryError::Database` if the update fails.
pub async fn apply_payment_event(
    pool: &PgPool,
    event: &PaymentEvent,
) -> Result<u64, RepositoryError> {
    let orders = OrderRepository::new(pool);

    match event {
        PaymentEvent::Captured { gateway_payment_id } => {
            orders.mark_payment_captured(gateway_payment_id).await
        }
        PaymentEvent::Failed { gateway_payment_id } => {
            orders.mark_payment_failed(gateway_payment_id).await
        }
        PaymentEvent::Refunded {
            gateway_payment_id,
            refund_id,
            amount,
        } => {
            orders
                .mark_payment_refunded(gateway_payment_id, refund_id, *amount)
                .await
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(body: &str) -> WebhookEvent {
        serde_json::from_str(body).unwrap()
    }

    #[test]
    fn maps_payment_captured() {
        let event = parse(
            r#"{"event":"payment.captured","payload":{"payment":{"entity":
               {"id":"pay_1","order_id":"order_1","amount":18000,
                "currency":"INR","status":"captured"}}}}"#,
        );

        assert_eq!(
            PaymentEvent::from_webhook(&event),
            Some(PaymentEvent::Captured {
                gateway_payment_id: "pay_1".to_string()
            })
        );
    }

    #[test]
    fn maps_refund_with_paise_conversion() {
        let event = parse(
            r#"{"event":"refund.created","payload":{"refund":{"entity":
               {"id":"rfnd_1","payment_id":"pay_1","amount":18000,"currency":"INR"}}}}"#,
        );

        let Some(PaymentEvent::Refunded { amount, .. }) = PaymentEvent::from_webhook(&event) else {
            panic!("expected refund event");
        };
        assert_eq!(amount, Decimal::from(180));
    }

    #[test]
    fn ignores_unhandled_events() {
        let event = parse(r#"{"event":"order.paid","payload":{}}"#);
        assert_eq!(PaymentEvent::from_webhook(&event), None);
    }

    #[test]
    fn ignores_malformed_payload() {
        // Right event name but missing entity.
        let event = parse(r#"{"event":"payment.captured","payload":{}}"#);
        assert_eq!(PaymentEvent::from_webhook(&event), None);
    }
}
