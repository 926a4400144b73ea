//! Intake review handlers: contact submissions, newsletter subscribers,
//! seller applications.

use axum::{
    Json,
    extract::{Path, State},
};
use serde::Deserialize;
use serde_json::{Value, json};
use tracing::instrument;

use farmhaat_core::{ApplicationStatus, SellerApplicationId};

use crate::db::intake::IntakeRepository;
use crate::error::{AppError, Result};
use crate::middleware::auth::RequireAdminAuth;
use crate::state::AppState;

/// List contact form submissions.
#[instrument(skip(state))]
pub async fn contact_submissions(
    _admin: RequireAdminAuth,
    State(state): State<AppState>,
) -> Result<Json<Value>> {
    let submissions = IntakeRepository::new(state.pool())
        .list_contact_submissions()
        .await?;

    Ok(Json(json!({ "submissions": submissions })))
}

/// List newsletter subscribers.
#[instrument(skip(state))]
pub async fn newsletter_subscribers(
    _admin: RequireAdminAuth,
    State(state): State<AppState>,
) -> Result<Json<Value>> {
    let subscribers = IntakeRepository::new(state.pool())
        .list_newsletter_subscribers()
        .await?;

    Ok(Json(json!({ "subscribers": subscribers })))
}

/// List seller applications.
#[instrument(skip(state))]
pub async fn seller_applications(
    _admin: RequireAdminAuth,
    State(state): State<AppState>,
) -> Result<Json<Value>> {
    let applications = IntakeRepository::new(state.pool())
        .list_seller_applications()
        .await?;

    Ok(Json(json!({ "applications": applications })))
}

/// Status-update payload.
#[derive(Debug, Deserialize)]
pub struct UpdateApplication {
    pub status: String,
}

/// Set a seller application's review status.
#[instrument(skip(state, payload))]
pub async fn update_seller_application(
    _admin: RequireAdminAuth,
    State(state): State<AppState>,
    Path(id): Path<SellerApplicationId>,
    Json(payload): Json<UpdateApplication>,
) -> Result<Json<Value>> {
    let status = payload
        .status
        .parse::<ApplicationStatus>()
        .map_err(AppError::BadRequest)?;

    let application = IntakeRepository::new(state.pool())
        .set_application_status(id, status)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("seller application {id}")))?;

    tracing::info!(application_id = %id, status = %status, "Seller application updated");

    Ok(Json(json!({ "application": application })))
}
