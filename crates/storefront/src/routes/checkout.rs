//! Checkout route handlers.
//!
//! `create` computes the cart total server-side at current effective unit
//! prices and opens a gateway order; `verify` checks the client-returned
//! HMAC signature and, on success, persists the whole order atomically.

use axum::{Json, extract::State, http::StatusCode};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use tracing::instrument;

use farmhaat_core::{CURRENCY, to_paise};

use crate::db::cart::CartRepository;
use crate::db::orders::{CapturedPayment, OrderRepository, ShippingDetails};
use crate::error::{AppError, Result};
use crate::middleware::auth::RequireAuth;
use crate::models::product::CartLine;
use crate::razorpay::signature::verify_payment_signature;
use crate::state::AppState;

/// Response for a created checkout session.
#[derive(Debug, Serialize)]
pub struct CheckoutResponse {
    pub gateway_order_id: String,
    /// Amount in paise, as the gateway expects.
    pub amount: i64,
    pub currency: String,
    /// Public key id for the client-side checkout widget.
    pub key_id: String,
}

/// Create a gateway order for the caller's cart.
///
/// The total is computed here from current prices; nothing the client
/// sends influences the amount.
#[instrument(skip(state))]
pub async fn create(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
) -> Result<Json<CheckoutResponse>> {
    let lines = CartRepository::new(state.pool()).lines(user.id).await?;
    if lines.is_empty() {
        return Err(AppError::BadRequest("cart is empty".to_string()));
    }

    let total: Decimal = lines.iter().map(CartLine::line_total).sum();
    let amount_paise = to_paise(total)
        .map_err(|e| AppError::Internal(format!("cart total out of range: {e}")))?;

    let receipt = format!("user_{}", user.id);
    let order = state
        .razorpay()
        .create_order(amount_paise, CURRENCY, &receipt)
        .await?;

    tracing::info!(
        gateway_order_id = %order.id,
        amount_paise,
        "Checkout session created"
    );

    Ok(Json(CheckoutResponse {
        gateway_order_id: order.id,
        amount: order.amount,
        currency: order.currency,
        key_id: state.razorpay().key_id().to_string(),
    }))
}

/// Payload returned by the checkout widget after payment.
#[derive(Debug, Deserialize)]
pub struct VerifyPayment {
    pub gateway_order_id: String,
    pub gateway_payment_id: String,
    pub signature: String,
    pub shipping_name: String,
    pub shipping_address: String,
    pub shipping_phone: String,
}

/// Verify a payment signature and persist the order.
///
/// On a signature mismatch nothing is written. On success the order, its
/// items, and the captured payment transaction are created in one database
/// transaction and the cart is emptied.
#[instrument(skip(state, payload), fields(gateway_order_id = %payload.gateway_order_id))]
pub async fn verify(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Json(payload): Json<VerifyPayment>,
) -> Result<(StatusCode, Json<Value>)> {
    let valid = verify_payment_signature(
        &state.config().razorpay.key_secret,
        &payload.gateway_order_id,
        &payload.gateway_payment_id,
        &payload.signature,
    );
    if !valid {
        tracing::warn!(
            gateway_payment_id = %payload.gateway_payment_id,
            "Payment signature verification failed"
        );
        return Err(AppError::BadRequest("invalid payment signature".to_string()));
    }

    let lines = CartRepository::new(state.pool()).lines(user.id).await?;
    if lines.is_empty() {
        return Err(AppError::BadRequest("cart is empty".to_string()));
    }

    let total: Decimal = lines.iter().map(CartLine::line_total).sum();

    let shipping = ShippingDetails {
        name: payload.shipping_name,
        address: payload.shipping_address,
        phone: payload.shipping_phone,
    };
    let payment = CapturedPayment {
        gateway_order_id: payload.gateway_order_id,
        gateway_payment_id: payload.gateway_payment_id,
        amount: total,
        currency: CURRENCY.to_string(),
    };

    let order = OrderRepository::new(state.pool())
        .create_from_cart(user.id, &lines, &shipping, &payment)
        .await?;

    tracing::info!(order_id = %order.id, "Order created from verified payment");

    Ok((StatusCode::CREATED, Json(json!({ "order": order }))))
}
