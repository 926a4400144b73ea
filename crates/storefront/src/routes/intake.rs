//! Public intake route handlers: newsletter, contact form, seller
//! applications. No authentication required.

use axum::{Json, extract::State, http::StatusCode};
use serde::Deserialize;
use serde_json::{Value, json};
use tracing::instrument;

use farmhaat_core::Email;

use crate::db::intake::IntakeRepository;
use crate::error::{AppError, Result};
use crate::state::AppState;

/// Newsletter subscription payload.
#[derive(Debug, Deserialize)]
pub struct NewsletterPayload {
    pub email: String,
}

/// Subscribe to the newsletter. Re-subscribing is treated as success.
#[instrument(skip(state, payload))]
pub async fn newsletter(
    State(state): State<AppState>,
    Json(payload): Json<NewsletterPayload>,
) -> Result<Json<Value>> {
    let email = Email::parse(&payload.email)
        .map_err(|e| AppError::BadRequest(format!("invalid email: {e}")))?;

    IntakeRepository::new(state.pool())
        .subscribe_newsletter(&email)
        .await?;

    tracing::info!(email = %email, "Newsletter subscription");

    Ok(Json(json!({ "status": "subscribed" })))
}

/// Contact form payload.
#[derive(Debug, Deserialize)]
pub struct ContactPayload {
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
}

/// Store a contact form submission.
#[instrument(skip(state, payload))]
pub async fn contact(
    State(state): State<AppState>,
    Json(payload): Json<ContactPayload>,
) -> Result<(StatusCode, Json<Value>)> {
    let email = Email::parse(&payload.email)
        .map_err(|e| AppError::BadRequest(format!("invalid email: {e}")))?;

    let name = payload.name.trim();
    let subject = payload.subject.trim();
    let message = payload.message.trim();
    if name.is_empty() || subject.is_empty() || message.is_empty() {
        return Err(AppError::BadRequest(
            "name, subject and message are required".to_string(),
        ));
    }

    let id = IntakeRepository::new(state.pool())
        .create_contact(name, &email, subject, message)
        .await?;

    Ok((StatusCode::CREATED, Json(json!({ "id": id }))))
}

/// Seller application payload.
#[derive(Debug, Deserialize)]
pub struct SellerApplicationPayload {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub farm_name: String,
    #[serde(default)]
    pub message: String,
}

/// Store a seller application (starts PENDING).
#[instrument(skip(state, payload))]
pub async fn seller_application(
    State(state): State<AppState>,
    Json(payload): Json<SellerApplicationPayload>,
) -> Result<(StatusCode, Json<Value>)> {
    let email = Email::parse(&payload.email)
        .map_err(|e| AppError::BadRequest(format!("invalid email: {e}")))?;

    let name = payload.name.trim();
    let phone = payload.phone.trim();
    let farm_name = payload.farm_name.trim();
    if name.is_empty() || phone.is_empty() || farm_name.is_empty() {
        return Err(AppError::BadRequest(
            "name, phone and farm_name are required".to_string(),
        ));
    }

    let id = IntakeRepository::new(state.pool())
        .create_seller_application(name, &email, phone, farm_name, payload.message.trim())
        .await?;

    Ok((StatusCode::CREATED, Json(json!({ "id": id }))))
}
