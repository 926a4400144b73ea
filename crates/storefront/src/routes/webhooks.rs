//! Payment gateway webhook handler.
//!
//! The signature is an HMAC-SHA256 over the raw request body; parsing
//! happens only after the signature checks out. Transitions are idempotent,
//! so gateway retries are harmless.

use axum::{
    Json,
    body::Bytes,
    extract::State,
    http::{HeaderMap, StatusCode},
};
use serde_json::{Value, json};
use tracing::instrument;

use crate::error::{AppError, Result};
use crate::razorpay::WebhookEvent;
use crate::razorpay::signature::verify_webhook_signature;
use crate::services::payments::{PaymentEvent, apply_payment_event};
use crate::state::AppState;

/// Header carrying the webhook signature.
pub const SIGNATURE_HEADER: &str = "x-webhook-signature";

/// Handle a payment gateway webhook delivery.
#[instrument(skip(state, headers, body))]
pub async fn payments(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<(StatusCode, Json<Value>)> {
    let signature = headers
        .get(SIGNATURE_HEADER)
        .and_then(|v| v.to_str().ok())
        .ok_or_else(|| AppError::BadRequest("missing webhook signature".to_string()))?;

    if !verify_webhook_signature(&state.config().razorpay.webhook_secret, &body, signature) {
        tracing::warn!("Webhook signature verification failed");
        return Err(AppError::BadRequest("invalid webhook signature".to_string()));
    }

    let event: WebhookEvent = serde_json::from_slice(&body)
        .map_err(|e| AppError::BadRequest(format!("malformed webhook body: {e}")))?;

    let Some(transition) = PaymentEvent::from_webhook(&event) else {
        tracing::debug!(event = %event.event, "Ignoring unhandled webhook event");
        return Ok((StatusCode::OK, Json(json!({ "status": "ignored" }))));
    };

    let updated = apply_payment_event(state.pool(), &transition).await?;

    tracing::info!(
        event = %event.event,
        rows_updated = updated,
        "Webhook event applied"
    );

    Ok((StatusCode::OK, Json(json!({ "status": "ok" }))))
}
