//! Order repository: checkout persistence, order history, and the
//! idempotent payment-state transitions shared by the synchronous verify
//! path and the asynchronous webhook path.

use rust_decimal::Decimal;
use sqlx::PgPool;

use farmhaat_core::{OrderId, OrderStatus, PaymentStatus, ProductId, UserId};

use super::RepositoryError;
use crate::models::order::{Order, OrderDetail, OrderItem, PaymentTransaction};
use crate::models::product::CartLine;

const ORDER_COLUMNS: &str = "id, user_id, status, total, shipping_name, shipping_address, \
                             shipping_phone, reject_reason, delivery_date, pickup, \
                             delivered_at, created_at, updated_at";

const TRANSACTION_COLUMNS: &str = "id, order_id, gateway_order_id, gateway_payment_id, \
                                   amount, currency, status, refund_id, refund_amount, \
                                   created_at, updated_at";

/// Shipping details captured at checkout.
#[derive(Debug, Clone)]
pub struct ShippingDetails {
    pub name: String,
    pub address: String,
    pub phone: String,
}

/// Verified gateway payment to record alongside a new order.
#[derive(Debug, Clone)]
pub struct CapturedPayment {
    pub gateway_order_id: String,
    pub gateway_payment_id: String,
    pub amount: Decimal,
    pub currency: String,
}

/// Repository for orders and payment transactions.
pub struct OrderRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> OrderRepository<'a> {
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Persist a verified checkout in a single transaction: the order
    /// (PENDING), its line items, the CAPTURED payment transaction, and
    /// emptying the cart. A crash leaves either everything or nothing.
    ///
    /// The order total is computed here from the cart lines' current
    /// prices; client-supplied amounts are never trusted.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if any statement fails; the
    /// transaction is rolled back.
    pub async fn create_from_cart(
        &self,
        user_id: UserId,
        lines: &[CartLine],
        shipping: &ShippingDetails,
        payment: &CapturedPayment,
    ) -> Result<Order, RepositoryError> {
        let total: Decimal = lines.iter().map(CartLine::line_total).sum();

        let mut tx = self.pool.begin().await?;

        let order = sqlx::query_as::<_, Order>(&format!(
            "INSERT INTO orders (user_id, status, total, shipping_name, shipping_address, shipping_phone)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING {ORDER_COLUMNS}"
        ))
        .bind(user_id)
        .bind(OrderStatus::Pending)
        .bind(total)
        .bind(&shipping.name)
        .bind(&shipping.address)
        .bind(&shipping.phone)
        .fetch_one(&mut *tx)
        .await?;

        for line in lines {
            sqlx::query(
                "INSERT INTO order_items
                     (order_id, product_id, product_name, unit_label, unit_price, quantity, total_price)
                 VALUES ($1, $2, $3, $4, $5, $6, $7)",
            )
            .bind(order.id)
            .bind(line.product_id)
            .bind(&line.product_name)
            .bind(&line.unit_label)
            .bind(line.unit_price())
            .bind(line.quantity)
            .bind(line.line_total())
            .execute(&mut *tx)
            .await?;
        }

        sqlx::query(
            "INSERT INTO payment_transactions
                 (order_id, gateway_order_id, gateway_payment_id, amount, currency, status)
             VALUES ($1, $2, $3, $4, $5, $6)",
        )
        .bind(order.id)
        .bind(&payment.gateway_order_id)
        .bind(&payment.gateway_payment_id)
        .bind(payment.amount)
        .bind(&payment.currency)
        .bind(PaymentStatus::Captured)
        .execute(&mut *tx)
        .await?;

        sqlx::query("DELETE FROM cart_items WHERE user_id = $1")
            .bind(user_id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        Ok(order)
    }

    /// The user's orders, newest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_for_user(&self, user_id: UserId) -> Result<Vec<Order>, RepositoryError> {
        let orders = sqlx::query_as::<_, Order>(&format!(
            "SELECT {ORDER_COLUMNS} FROM orders WHERE user_id = $1 ORDER BY created_at DESC"
        ))
        .bind(user_id)
        .fetch_all(self.pool)
        .await?;

        Ok(orders)
    }

    /// An order with items and payment, scoped to the owning user.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_for_user(
        &self,
        user_id: UserId,
        order_id: OrderId,
    ) -> Result<Option<OrderDetail>, RepositoryError> {
        let order = sqlx::query_as::<_, Order>(&format!(
            "SELECT {ORDER_COLUMNS} FROM orders WHERE id = $1 AND user_id = $2"
        ))
        .bind(order_id)
        .bind(user_id)
        .fetch_optional(self.pool)
        .await?;

        let Some(order) = order else {
            return Ok(None);
        };

        let items = sqlx::query_as::<_, OrderItem>(
            "SELECT id, order_id, product_id, product_name, unit_label,
                    unit_price, quantity, total_price
             FROM order_items
             WHERE order_id = $1
             ORDER BY id",
        )
        .bind(order.id)
        .fetch_all(self.pool)
        .await?;

        let payment = sqlx::query_as::<_, PaymentTransaction>(&format!(
            "SELECT {TRANSACTION_COLUMNS} FROM payment_transactions WHERE order_id = $1"
        ))
        .bind(order.id)
        .fetch_optional(self.pool)
        .await?;

        Ok(Some(OrderDetail {
            order,
            items,
            payment,
        }))
    }

    /// Review/rating gate: does the user have a DELIVERED order containing
    /// the product?
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn has_delivered_item(
        &self,
        user_id: UserId,
        product_id: ProductId,
    ) -> Result<bool, RepositoryError> {
        let found = sqlx::query_scalar::<_, i32>(
            "SELECT 1
             FROM order_items oi
             JOIN orders o ON o.id = oi.order_id
             WHERE o.user_id = $1 AND o.status = $2 AND oi.product_id = $3
             LIMIT 1",
        )
        .bind(user_id)
        .bind(OrderStatus::Delivered)
        .bind(product_id)
        .fetch_optional(self.pool)
        .await?;

        Ok(found.is_some())
    }

    // =========================================================================
    // Idempotent payment transitions (keyed by gateway payment id)
    // =========================================================================
    //
    // Both the webhook path and the synchronous verify path can observe the
    // same gateway events; each transition is a set-operation over every row
    // carrying the external payment id, so replays and races converge.

    /// Mark a payment captured. Returns the number of rows touched.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the update fails.
    pub async fn mark_payment_captured(
        &self,
        gateway_payment_id: &str,
    ) -> Result<u64, RepositoryError> {
        let result = sqlx::query(
            "UPDATE payment_transactions
             SET status = $1, updated_at = now()
             WHERE gateway_payment_id = $2 AND status <> $3",
        )
        .bind(PaymentStatus::Captured)
        .bind(gateway_payment_id)
        .bind(PaymentStatus::Refunded)
        .execute(self.pool)
        .await?;

        Ok(result.rows_affected())
    }

    /// Mark a payment failed. Returns the number of rows touched.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the update fails.
    pub async fn mark_payment_failed(
        &self,
        gateway_payment_id: &str,
    ) -> Result<u64, RepositoryError> {
        let result = sqlx::query(
            "UPDATE payment_transactions
             SET status = $1, updated_at = now()
             WHERE gateway_payment_id = $2",
        )
        .bind(PaymentStatus::Failed)
        .bind(gateway_payment_id)
        .execute(self.pool)
        .await?;

        Ok(result.rows_affected())
    }

    /// Record a refund against a payment. Returns the number of rows touched.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the update fails.
    pub async fn mark_payment_refunded(
        &self,
        gateway_payment_id: &str,
        refund_id: &str,
        refund_amount: Decimal,
    ) -> Result<u64, RepositoryError> {
        let result = sqlx::query(
            "UPDATE payment_transactions
             SET status = $1, refund_id = $2, refund_amount = $3, updated_at = now()
             WHERE gateway_payment_id = $4",
        )
        .bind(PaymentStatus::Refunded)
        .bind(refund_id)
        .bind(refund_amount)
        .bind(gateway_payment_id)
        .execute(self.pool)
        .await?;

        Ok(result.rows_affected())
    }
}
