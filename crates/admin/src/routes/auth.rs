//! Admin authentication: credentials login, logout, whoami.
//!
//! Only users with `role = admin` may log in here. OAuth is deliberately
//! not offered on the admin surface.

use argon2::password_hash::PasswordHash;
use argon2::{Argon2, PasswordVerifier};
use axum::{Json, extract::State};
use serde::Deserialize;
use serde_json::{Value, json};
use tower_sessions::Session;
use tracing::instrument;

use farmhaat_core::{Email, UserRole};

use crate::db::admins::AdminRepository;
use crate::error::{AppError, Result};
use crate::middleware::auth::{RequireAdminAuth, clear_current_admin, set_current_admin};
use crate::models::CurrentAdmin;
use crate::state::AppState;

/// Login payload.
#[derive(Debug, Deserialize)]
pub struct LoginPayload {
    pub email: String,
    pub password: String,
}

/// Log in with email and password. Non-admin users are rejected with the
/// same response as bad credentials.
#[instrument(skip(state, session, payload))]
pub async fn login(
    State(state): State<AppState>,
    session: Session,
    Json(payload): Json<LoginPayload>,
) -> Result<Json<Value>> {
    let email = Email::parse(&payload.email)
        .map_err(|_| AppError::Unauthorized("invalid credentials".to_string()))?;

    let Some((user, hash)) = AdminRepository::new(state.pool())
        .get_password_hash(&email)
        .await?
    else {
        return Err(AppError::Unauthorized("invalid credentials".to_string()));
    };

    if !verify_password(&payload.password, &hash) {
        return Err(AppError::Unauthorized("invalid credentials".to_string()));
    }

    if user.role != UserRole::Admin {
        tracing::warn!(user_id = %user.id, "Non-admin login attempt on admin surface");
        return Err(AppError::Unauthorized("invalid credentials".to_string()));
    }

    let admin = CurrentAdmin {
        id: user.id,
        email: user.email.clone(),
        name: user.name.clone(),
    };

    // New session id on privilege change
    session
        .cycle_id()
        .await
        .map_err(|e| AppError::Internal(format!("session error: {e}")))?;
    set_current_admin(&session, &admin)
        .await
        .map_err(|e| AppError::Internal(format!("session error: {e}")))?;

    tracing::info!(user_id = %user.id, "Admin login");

    Ok(Json(json!({ "admin": admin })))
}

/// Log out the current admin.
#[instrument(skip(session))]
pub async fn logout(session: Session) -> Result<Json<Value>> {
    clear_current_admin(&session)
        .await
        .map_err(|e| AppError::Internal(format!("session error: {e}")))?;

    Ok(Json(json!({ "status": "logged_out" })))
}

/// The logged-in admin.
#[instrument(skip(admin))]
pub async fn me(RequireAdminAuth(admin): RequireAdminAuth) -> Json<CurrentAdmin> {
    Json(admin)
}

/// Verify a password against an argon2 hash.
fn verify_password(password: &str, hash: &str) -> bool {
    let Ok(parsed) = PasswordHash::new(hash) else {
        return false;
    };
    Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok()
}

#[cfg(test)]
mod tests {
    use argon2::password_hash::{PasswordHasher, SaltString, rand_core::OsRng};

    use super::*;

    #[test]
    fn test_verify_password_roundtrip() {
        let salt = SaltString::generate(&mut OsRng);
        let hash = Argon2::default()
            .hash_password(b"correct horse battery staple", &salt)
            .expect("hash")
            .to_string();

        assert!(verify_password("correct horse battery staple", &hash));
        assert!(!verify_password("wrong password", &hash));
    }

    #[test]
    fn test_verify_password_rejects_garbage_hash() {
        assert!(!verify_password("anything", "not-a-phc-string"));
    }
}
