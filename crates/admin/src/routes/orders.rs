//! Order lifecycle handlers: list, detail, approve, reject, deliver.
//!
//! Rejection triggers an automatic gateway refund. A refund failure is
//! logged and left for manual handling; the order is rejected either way
//! so the customer never sees a half-rejected order.

use axum::{
    Json,
    extract::{Path, Query, State},
};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::{Value, json};
use tracing::instrument;

use farmhaat_core::{OrderId, OrderStatus, PaymentStatus};

use crate::db::orders::OrderRepository;
use crate::error::{AppError, Result};
use crate::middleware::auth::RequireAdminAuth;
use crate::models::order::Order;
use crate::state::AppState;

const DEFAULT_PER_PAGE: i64 = 20;
const MAX_PER_PAGE: i64 = 100;

/// Query parameters for the order list.
#[derive(Debug, Deserialize)]
pub struct ListParams {
    pub status: Option<String>,
    pub page: Option<i64>,
    pub per_page: Option<i64>,
}

/// List orders, newest first, optionally filtered by status.
#[instrument(skip(state, params))]
pub async fn index(
    _admin: RequireAdminAuth,
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> Result<Json<Value>> {
    let status = params
        .status
        .as_deref()
        .map(str::parse::<OrderStatus>)
        .transpose()
        .map_err(AppError::BadRequest)?;

    let page = params.page.unwrap_or(1).max(1);
    let per_page = params
        .per_page
        .unwrap_or(DEFAULT_PER_PAGE)
        .clamp(1, MAX_PER_PAGE);
    let offset = (page - 1) * per_page;

    let repo = OrderRepository::new(state.pool());
    let orders = repo.list(status, per_page, offset).await?;
    let total = repo.count(status).await?;

    Ok(Json(json!({
        "orders": orders,
        "total": total,
        "page": page,
        "per_page": per_page,
    })))
}

/// Order detail with customer, items, and payment.
#[instrument(skip(state))]
pub async fn show(
    _admin: RequireAdminAuth,
    State(state): State<AppState>,
    Path(id): Path<OrderId>,
) -> Result<Json<Value>> {
    let detail = OrderRepository::new(state.pool())
        .get_detail(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("order {id}")))?;

    Ok(Json(json!({ "order": detail })))
}

/// Approve payload.
#[derive(Debug, Deserialize)]
pub struct ApprovePayload {
    pub delivery_date: Option<NaiveDate>,
    #[serde(default)]
    pub pickup: bool,
}

/// Approve a PENDING order.
#[instrument(skip(state, payload))]
pub async fn approve(
    _admin: RequireAdminAuth,
    State(state): State<AppState>,
    Path(id): Path<OrderId>,
    Json(payload): Json<ApprovePayload>,
) -> Result<Json<Value>> {
    let repo = OrderRepository::new(state.pool());

    let Some(order) = repo
        .approve(id, payload.delivery_date, payload.pickup)
        .await?
    else {
        return Err(transition_error(&repo, id, "approve").await?);
    };

    tracing::info!(order_id = %id, "Order approved");

    Ok(Json(json!({ "order": order })))
}

/// Reject payload.
#[derive(Debug, Deserialize)]
pub struct RejectPayload {
    pub reason: String,
}

/// Reject a PENDING order and attempt a gateway refund.
#[instrument(skip(state, payload))]
pub async fn reject(
    _admin: RequireAdminAuth,
    State(state): State<AppState>,
    Path(id): Path<OrderId>,
    Json(payload): Json<RejectPayload>,
) -> Result<Json<Value>> {
    let reason = payload.reason.trim();
    if reason.is_empty() {
        return Err(AppError::BadRequest("reason is required".to_string()));
    }

    let repo = OrderRepository::new(state.pool());

    let Some(order) = repo.reject(id, reason).await? else {
        return Err(transition_error(&repo, id, "reject").await?);
    };

    tracing::info!(order_id = %id, "Order rejected");

    let refund_status = attempt_refund(&state, &repo, &order).await?;

    Ok(Json(json!({ "order": order, "refund": refund_status })))
}

/// Mark an APPROVED order as delivered.
#[instrument(skip(state))]
pub async fn deliver(
    _admin: RequireAdminAuth,
    State(state): State<AppState>,
    Path(id): Path<OrderId>,
) -> Result<Json<Value>> {
    let repo = OrderRepository::new(state.pool());

    let Some(order) = repo.deliver(id).await? else {
        return Err(transition_error(&repo, id, "deliver").await?);
    };

    tracing::info!(order_id = %id, "Order delivered");

    Ok(Json(json!({ "order": order })))
}

/// Refund the captured payment for a rejected order.
///
/// Gateway failure is tolerated: the rejection stands and the refund is
/// flagged for manual handling.
async fn attempt_refund(
    state: &AppState,
    repo: &OrderRepository<'_>,
    order: &Order,
) -> Result<&'static str> {
    let Some(payment) = repo.get_payment(order.id).await? else {
        return Ok("no_payment");
    };
    if payment.status != PaymentStatus::Captured {
        return Ok("not_captured");
    }

    match state
        .razorpay()
        .refund_payment(&payment.gateway_payment_id)
        .await
    {
        Ok(refund) => {
            let amount = paise_to_rupees(refund.amount);
            repo.record_refund(payment.id, &refund.id, amount).await?;
            tracing::info!(
                order_id = %order.id,
                refund_id = %refund.id,
                "Refund issued for rejected order"
            );
            Ok("refunded")
        }
        Err(e) => {
            sentry::capture_error(&e);
            tracing::error!(
                order_id = %order.id,
                payment_id = %payment.gateway_payment_id,
                error = %e,
                "Refund failed for rejected order, manual refund required"
            );
            Ok("failed")
        }
    }
}

/// 404 if the order doesn't exist, 400 if it is in the wrong state.
async fn transition_error(
    repo: &OrderRepository<'_>,
    id: OrderId,
    action: &str,
) -> Result<AppError> {
    match repo.get_status(id).await? {
        None => Ok(AppError::NotFound(format!("order {id}"))),
        Some(status) => Ok(AppError::BadRequest(format!(
            "cannot {action} an order in {status} state"
        ))),
    }
}

/// Gateway amounts are in paise.
fn paise_to_rupees(paise: i64) -> Decimal {
    Decimal::from(paise) / Decimal::ONE_HUNDRED
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paise_to_rupees() {
        assert_eq!(paise_to_rupees(18000), Decimal::from(180));
        assert_eq!(paise_to_rupees(12345), Decimal::new(12345, 2));
    }
}
