//! Google OAuth route handlers.
//!
//! The redirect stores an anti-CSRF state token in the session; the
//! callback checks it before exchanging the code.

use axum::{
    extract::{Query, State},
    response::Redirect,
};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;
use uuid::Uuid;

use crate::error::{AppError, Result};
use crate::middleware::auth::set_current_user;
use crate::models::{CurrentUser, session_keys};
use crate::services::auth::{AuthError, AuthService};
use crate::state::AppState;

/// Redirect to Google's consent screen.
#[instrument(skip(state, session))]
pub async fn google_redirect(
    State(state): State<AppState>,
    session: Session,
) -> Result<Redirect> {
    let oauth_state = Uuid::new_v4().to_string();
    session
        .insert(session_keys::OAUTH_STATE, &oauth_state)
        .await
        .map_err(|e| AppError::Internal(format!("session error: {e}")))?;

    Ok(Redirect::to(&state.google().authorize_url(&oauth_state)))
}

/// Callback query parameters from Google.
#[derive(Debug, Deserialize)]
pub struct CallbackParams {
    pub code: Option<String>,
    pub state: Option<String>,
    pub error: Option<String>,
}

/// Handle the OAuth callback: state check, code exchange, login.
#[instrument(skip(state, session, params))]
pub async fn google_callback(
    State(state): State<AppState>,
    session: Session,
    Query(params): Query<CallbackParams>,
) -> Result<Redirect> {
    if let Some(error) = params.error {
        return Err(AppError::BadRequest(format!("oauth denied: {error}")));
    }

    let stored_state: Option<String> = session
        .remove(session_keys::OAUTH_STATE)
        .await
        .map_err(|e| AppError::Internal(format!("session error: {e}")))?;

    let returned_state = params
        .state
        .ok_or_else(|| AppError::BadRequest("missing oauth state".to_string()))?;
    if stored_state.as_deref() != Some(returned_state.as_str()) {
        tracing::warn!("OAuth state mismatch");
        return Err(AppError::BadRequest("oauth state mismatch".to_string()));
    }

    let code = params
        .code
        .ok_or_else(|| AppError::BadRequest("missing oauth code".to_string()))?;

    let profile = state
        .google()
        .exchange_code(&code)
        .await
        .map_err(|e| AppError::Auth(AuthError::OAuth(e.to_string())))?;

    let user = AuthService::new(state.pool())
        .login_with_google(&profile)
        .await?;

    session
        .cycle_id()
        .await
        .map_err(|e| AppError::Internal(format!("session error: {e}")))?;
    set_current_user(
        &session,
        &CurrentUser {
            id: user.id,
            email: user.email.clone(),
            name: user.name.clone(),
            role: user.role,
        },
    )
    .await
    .map_err(|e| AppError::Internal(format!("session error: {e}")))?;

    tracing::info!(user_id = %user.id, "Google OAuth login");

    Ok(Redirect::to("/"))
}
