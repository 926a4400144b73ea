//! User and OAuth account models.

use chrono::{DateTime, Utc};
use serde::Serialize;

use farmhaat_core::{AccountId, Email, OAuthProvider, UserId, UserRole};

/// A registered user.
///
/// `password_hash` lives in its own query path and is never attached here,
/// so the model is safe to serialize into API responses.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct User {
    pub id: UserId,
    pub email: Email,
    pub name: String,
    pub role: UserRole,
    pub email_verified: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// An OAuth provider link for a user.
///
/// A user may have zero links (credentials only) or one per provider.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Account {
    pub id: AccountId,
    pub user_id: UserId,
    pub provider: OAuthProvider,
    pub provider_account_id: String,
    pub created_at: DateTime<Utc>,
}
