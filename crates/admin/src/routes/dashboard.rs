//! Dashboard handler.

use axum::{Json, extract::State};
use tracing::instrument;

use crate::db::dashboard::DashboardRepository;
use crate::error::Result;
use crate::middleware::auth::RequireAdminAuth;
use crate::models::dashboard::DashboardStats;
use crate::state::AppState;

/// Counts, orders by status, captured revenue, and recent orders.
#[instrument(skip(state))]
pub async fn show(
    _admin: RequireAdminAuth,
    State(state): State<AppState>,
) -> Result<Json<DashboardStats>> {
    let stats = DashboardRepository::new(state.pool()).stats().await?;

    Ok(Json(stats))
}
