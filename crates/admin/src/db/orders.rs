//! Order lifecycle repository.
//!
//! State transitions are enforced in SQL with guarded `UPDATE ... WHERE
//! status = ...` statements, so concurrent admin actions can never move an
//! order through an illegal transition.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use sqlx::PgPool;

use farmhaat_core::{OrderId, OrderStatus, PaymentStatus, PaymentTransactionId};

use super::RepositoryError;
use crate::models::order::{Order, OrderDetail, OrderItem, OrderWithCustomer, PaymentTransaction};

const ORDER_COLUMNS: &str = "id, user_id, status, total, shipping_name, shipping_address, \
     shipping_phone, reject_reason, delivery_date, pickup, delivered_at, created_at, updated_at";

const ORDER_WITH_CUSTOMER_COLUMNS: &str = "o.id, o.user_id, u.email AS customer_email, \
     u.name AS customer_name, o.status, o.total, o.shipping_name, o.shipping_address, \
     o.shipping_phone, o.reject_reason, o.delivery_date, o.pickup, o.delivered_at, \
     o.created_at, o.updated_at";

const TRANSACTION_COLUMNS: &str = "id, order_id, gateway_order_id, gateway_payment_id, amount, \
     currency, status, refund_id, refund_amount, created_at, updated_at";

/// Repository for admin order operations.
pub struct OrderRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> OrderRepository<'a> {
    /// Create a new order repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List orders newest first, optionally filtered by status.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list(
        &self,
        status: Option<OrderStatus>,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<OrderWithCustomer>, RepositoryError> {
        let orders = match status {
            Some(status) => {
                sqlx::query_as::<_, OrderWithCustomer>(&format!(
                    "SELECT {ORDER_WITH_CUSTOMER_COLUMNS}
                     FROM orders o
                     JOIN users u ON u.id = o.user_id
                     WHERE o.status = $1
                     ORDER BY o.created_at DESC
                     LIMIT $2 OFFSET $3"
                ))
                .bind(status)
                .bind(limit)
                .bind(offset)
                .fetch_all(self.pool)
                .await?
            }
            None => {
                sqlx::query_as::<_, OrderWithCustomer>(&format!(
                    "SELECT {ORDER_WITH_CUSTOMER_COLUMNS}
                     FROM orders o
                     JOIN users u ON u.id = o.user_id
                     ORDER BY o.created_at DESC
                     LIMIT $1 OFFSET $2"
                ))
                .bind(limit)
                .bind(offset)
                .fetch_all(self.pool)
                .await?
            }
        };

        Ok(orders)
    }

    /// Count orders, optionally filtered by status.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn count(&self, status: Option<OrderStatus>) -> Result<i64, RepositoryError> {
        let count = match status {
            Some(status) => {
                sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM orders WHERE status = $1")
                    .bind(status)
                    .fetch_one(self.pool)
                    .await?
            }
            None => {
                sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM orders")
                    .fetch_one(self.pool)
                    .await?
            }
        };

        Ok(count)
    }

    /// Get an order with customer, items, and payment transaction.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if a query fails.
    pub async fn get_detail(&self, id: OrderId) -> Result<Option<OrderDetail>, RepositoryError> {
        let Some(order) = sqlx::query_as::<_, OrderWithCustomer>(&format!(
            "SELECT {ORDER_WITH_CUSTOMER_COLUMNS}
             FROM orders o
             JOIN users u ON u.id = o.user_id
             WHERE o.id = $1"
        ))
        .bind(id)
        .fetch_optional(self.pool)
        .await?
        else {
            return Ok(None);
        };

        let items = sqlx::query_as::<_, OrderItem>(
            "SELECT id, order_id, product_id, product_name, unit_label, unit_price, quantity, \
             total_price
             FROM order_items WHERE order_id = $1 ORDER BY id",
        )
        .bind(id)
        .fetch_all(self.pool)
        .await?;

        let payment = self.get_payment(id).await?;

        Ok(Some(OrderDetail {
            order,
            items,
            payment,
        }))
    }

    /// Get an order's current status.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_status(&self, id: OrderId) -> Result<Option<OrderStatus>, RepositoryError> {
        let status = sqlx::query_scalar::<_, OrderStatus>("SELECT status FROM orders WHERE id = $1")
            .bind(id)
            .fetch_optional(self.pool)
            .await?;

        Ok(status)
    }

    /// Get the payment transaction for an order, if any.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_payment(
        &self,
        order_id: OrderId,
    ) -> Result<Option<PaymentTransaction>, RepositoryError> {
        let payment = sqlx::query_as::<_, PaymentTransaction>(&format!(
            "SELECT {TRANSACTION_COLUMNS}
             FROM payment_transactions
             WHERE order_id = $1
             ORDER BY id DESC
             LIMIT 1"
        ))
        .bind(order_id)
        .fetch_optional(self.pool)
        .await?;

        Ok(payment)
    }

    /// Approve a PENDING order, optionally with a delivery date and pickup
    /// flag. Returns `None` if the order was not in PENDING.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn approve(
        &self,
        id: OrderId,
        delivery_date: Option<NaiveDate>,
        pickup: bool,
    ) -> Result<Option<Order>, RepositoryError> {
        let order = sqlx::query_as::<_, Order>(&format!(
            "UPDATE orders
             SET status = $2, delivery_date = $3, pickup = $4, updated_at = now()
             WHERE id = $1 AND status = $5
             RETURNING {ORDER_COLUMNS}"
        ))
        .bind(id)
        .bind(OrderStatus::Approved)
        .bind(delivery_date)
        .bind(pickup)
        .bind(OrderStatus::Pending)
        .fetch_optional(self.pool)
        .await?;

        Ok(order)
    }

    /// Reject a PENDING order with a reason. Returns `None` if the order
    /// was not in PENDING.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn reject(
        &self,
        id: OrderId,
        reason: &str,
    ) -> Result<Option<Order>, RepositoryError> {
        let order = sqlx::query_as::<_, Order>(&format!(
            "UPDATE orders
             SET status = $2, reject_reason = $3, updated_at = now()
             WHERE id = $1 AND status = $4
             RETURNING {ORDER_COLUMNS}"
        ))
        .bind(id)
        .bind(OrderStatus::Rejected)
        .bind(reason)
        .bind(OrderStatus::Pending)
        .fetch_optional(self.pool)
        .await?;

        Ok(order)
    }

    /// Mark an APPROVED order as delivered, stamping `delivered_at`.
    /// Returns `None` if the order was not in APPROVED.
    ///
    /// Delivery opens the review/rating gate on the storefront.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn deliver(&self, id: OrderId) -> Result<Option<Order>, RepositoryError> {
        let order = sqlx::query_as::<_, Order>(&format!(
            "UPDATE orders
             SET status = $2, delivered_at = now(), updated_at = now()
             WHERE id = $1 AND status = $3
             RETURNING {ORDER_COLUMNS}"
        ))
        .bind(id)
        .bind(OrderStatus::Delivered)
        .bind(OrderStatus::Approved)
        .fetch_optional(self.pool)
        .await?;

        Ok(order)
    }

    /// Record a successful gateway refund against a transaction.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the transaction doesn't exist.
    pub async fn record_refund(
        &self,
        transaction_id: PaymentTransactionId,
        refund_id: &str,
        amount: Decimal,
    ) -> Result<(), RepositoryError> {
        let result = sqlx::query(
            "UPDATE payment_transactions
             SET status = $2, refund_id = $3, refund_amount = $4, updated_at = now()
             WHERE id = $1",
        )
        .bind(transaction_id)
        .bind(PaymentStatus::Refunded)
        .bind(refund_id)
        .bind(amount)
        .execute(self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }
}
