//! Authentication route handlers: register, login, logout, email
//! verification, password reset.

use axum::{Json, extract::State, http::StatusCode};
use serde::Deserialize;
use serde_json::{Value, json};
use tower_sessions::Session;
use tracing::instrument;

use crate::error::{AppError, Result};
use crate::middleware::auth::{RequireAuth, clear_current_user, set_current_user};
use crate::models::CurrentUser;
use crate::models::user::User;
use crate::services::auth::AuthService;
use crate::state::AppState;

fn current_user(user: &User) -> CurrentUser {
    CurrentUser {
        id: user.id,
        email: user.email.clone(),
        name: user.name.clone(),
        role: user.role,
    }
}

/// Registration payload.
#[derive(Debug, Deserialize)]
pub struct RegisterPayload {
    pub email: String,
    pub name: String,
    pub password: String,
}

/// Register a new account and log it in.
///
/// The verification email is best-effort: a delivery failure is logged
/// but never fails the registration.
#[instrument(skip(state, session, payload), fields(email = %payload.email))]
pub async fn register(
    State(state): State<AppState>,
    session: Session,
    Json(payload): Json<RegisterPayload>,
) -> Result<(StatusCode, Json<Value>)> {
    let name = payload.name.trim();
    if name.is_empty() {
        return Err(AppError::BadRequest("name is required".to_string()));
    }

    let (user, token) = AuthService::new(state.pool())
        .register_with_password(&payload.email, name, &payload.password)
        .await?;

    if let Err(e) = state
        .email()
        .send_verification_email(user.email.as_str(), &token)
        .await
    {
        tracing::warn!(error = %e, "Failed to send verification email");
    }

    set_current_user(&session, &current_user(&user))
        .await
        .map_err(|e| AppError::Internal(format!("session error: {e}")))?;

    Ok((StatusCode::CREATED, Json(json!({ "user": user }))))
}

/// Login payload.
#[derive(Debug, Deserialize)]
pub struct LoginPayload {
    pub email: String,
    pub password: String,
}

/// Login with email and password.
#[instrument(skip(state, session, payload), fields(email = %payload.email))]
pub async fn login(
    State(state): State<AppState>,
    session: Session,
    Json(payload): Json<LoginPayload>,
) -> Result<Json<Value>> {
    let user = AuthService::new(state.pool())
        .login_with_password(&payload.email, &payload.password)
        .await?;

    // Rotate the session id on privilege change
    session
        .cycle_id()
        .await
        .map_err(|e| AppError::Internal(format!("session error: {e}")))?;
    set_current_user(&session, &current_user(&user))
        .await
        .map_err(|e| AppError::Internal(format!("session error: {e}")))?;

    Ok(Json(json!({ "user": user })))
}

/// Log out the current session.
#[instrument(skip(session))]
pub async fn logout(session: Session) -> Result<Json<Value>> {
    clear_current_user(&session)
        .await
        .map_err(|e| AppError::Internal(format!("session error: {e}")))?;

    Ok(Json(json!({ "status": "ok" })))
}

/// The logged-in user's identity.
#[instrument]
pub async fn me(RequireAuth(user): RequireAuth) -> Json<CurrentUser> {
    Json(user)
}

/// Email verification payload.
#[derive(Debug, Deserialize)]
pub struct VerifyEmailPayload {
    pub token: String,
}

/// Consume an email verification token.
#[instrument(skip(state, payload))]
pub async fn verify_email(
    State(state): State<AppState>,
    Json(payload): Json<VerifyEmailPayload>,
) -> Result<Json<Value>> {
    AuthService::new(state.pool())
        .verify_email(&payload.token)
        .await?;

    Ok(Json(json!({ "status": "verified" })))
}

/// Password reset request payload.
#[derive(Debug, Deserialize)]
pub struct ResetRequestPayload {
    pub email: String,
}

/// Start a password reset.
///
/// Always responds 200 so the endpoint cannot be used to probe for
/// registered emails.
#[instrument(skip(state, payload))]
pub async fn request_password_reset(
    State(state): State<AppState>,
    Json(payload): Json<ResetRequestPayload>,
) -> Result<Json<Value>> {
    match AuthService::new(state.pool())
        .request_password_reset(&payload.email)
        .await
    {
        Ok(Some((user, token))) => {
            if let Err(e) = state
                .email()
                .send_password_reset_email(user.email.as_str(), &token)
                .await
            {
                tracing::warn!(error = %e, "Failed to send password reset email");
            }
        }
        Ok(None) => {
            tracing::debug!("Password reset requested for unknown email");
        }
        // Malformed email gets the same response as an unknown one
        Err(crate::services::auth::AuthError::InvalidEmail(_)) => {}
        Err(e) => return Err(e.into()),
    }

    Ok(Json(json!({ "status": "ok" })))
}

/// Password reset confirmation payload.
#[derive(Debug, Deserialize)]
pub struct ResetConfirmPayload {
    pub token: String,
    pub password: String,
}

/// Consume a reset token and set the new password.
#[instrument(skip(state, payload))]
pub async fn confirm_password_reset(
    State(state): State<AppState>,
    Json(payload): Json<ResetConfirmPayload>,
) -> Result<Json<Value>> {
    AuthService::new(state.pool())
        .reset_password(&payload.token, &payload.password)
        .await?;

    Ok(Json(json!({ "status": "ok" })))
}
