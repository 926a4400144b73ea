//! Admin user model.

use chrono::{DateTime, Utc};
use serde::Serialize;

use farmhaat_core::{Email, UserId, UserRole};

/// A user row as seen by the admin backend.
///
/// `password_hash` is fetched separately by the login path and never
/// attached here.
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
