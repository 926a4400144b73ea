//! Session state stored by tower-sessions.

use serde::{Deserialize, Serialize};

use farmhaat_core::{Email, UserId};

/// Session keys for typed session access.
pub mod session_keys {
    /// Key for the logged-in admin.
    pub const CURRENT_ADMIN: &str = "current_admin";
}

/// The logged-in admin, as stored in the session record.
///
/// Only users with `role = admin` ever reach the session, so no role
/// field is carried here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrentAdmin {
    pub id: UserId,
    pub email: Email,
    pub name: String,
}
