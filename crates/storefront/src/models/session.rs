//! Session state stored by tower-sessions.

use serde::{Deserialize, Serialize};

use farmhaat_core::{Email, UserId, UserRole};

/// Session keys for typed session access.
pub mod session_keys {
    /// Key for the logged-in user.
    pub const CURRENT_USER: &str = "current_user";
    /// Key for the OAuth CSRF state parameter.
    pub const OAUTH_STATE: &str = "oauth_state";
}

/// The logged-in user, as stored in the session record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrentUser {
    pub id: UserId,
    pub email: Email,
    pub name: String,
    pub role: UserRole,
}
