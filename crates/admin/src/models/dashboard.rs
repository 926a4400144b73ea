//! Dashboard aggregate models.

use rust_decimal::Decimal;
use serde::Serialize;

use super::order::OrderWithCustomer;

/// Orders broken down by lifecycle status.
#[derive(Debug, Clone, Default, Serialize)]
pub struct OrdersByStatus {
    pub pending: i64,
    pub approved: i64,
    pub rejected: i64,
    pub delivered: i64,
}

/// The dashboard payload.
#[derive(Debug, Clone, Serialize)]
pub struct DashboardStats {
    pub user_count: i64,
    pub product_count: i64,
    pub orders_by_status: OrdersByStatus,
    /// Sum of captured (non-refunded) payment amounts.
    pub captured_revenue: Decimal,
    pub recent_orders: Vec<OrderWithCustomer>,
}
