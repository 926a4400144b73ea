//! Dashboard aggregate queries.

use rust_decimal::Decimal;
use sqlx::PgPool;

use farmhaat_core::{OrderStatus, PaymentStatus};

use super::RepositoryError;
use super::orders::OrderRepository;
use crate::models::dashboard::{DashboardStats, OrdersByStatus};

const RECENT_ORDER_LIMIT: i64 = 5;

/// Repository for dashboard statistics.
pub struct DashboardRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> DashboardRepository<'a> {
    /// Create a new dashboard repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Gather the dashboard payload.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if any query fails.
    pub async fn stats(&self) -> Result<DashboardStats, RepositoryError> {
        let user_count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM users")
            .fetch_one(self.pool)
            .await?;

        let product_count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM products")
            .fetch_one(self.pool)
            .await?;

        let rows = sqlx::query_as::<_, (OrderStatus, i64)>(
            "SELECT status, COUNT(*) FROM orders GROUP BY status",
        )
        .fetch_all(self.pool)
        .await?;

        let mut orders_by_status = OrdersByStatus::default();
        for (status, count) in rows {
            match status {
                OrderStatus::Pending => orders_by_status.pending = count,
                OrderStatus::Approved => orders_by_status.approved = count,
                OrderStatus::Rejected => orders_by_status.rejected = count,
                OrderStatus::Delivered => orders_by_status.delivered = count,
            }
        }

        let captured_revenue = sqlx::query_scalar::<_, Decimal>(
            "SELECT COALESCE(SUM(amount), 0) FROM payment_transactions WHERE status = $1",
        )
        .bind(PaymentStatus::Captured)
        .fetch_one(self.pool)
        .await?;

        let recent_orders = OrderRepository::new(self.pool)
            .list(None, RECENT_ORDER_LIMIT, 0)
            .await?;

        Ok(DashboardStats {
            user_count,
            product_count,
            orders_by_status,
            captured_revenue,
            recent_orders,
        })
    }
}
