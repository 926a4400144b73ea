//! Order models as seen by the admin backend.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::Serialize;

use farmhaat_core::{
    OrderId, OrderItemId, OrderStatus, PaymentStatus, PaymentTransactionId, ProductId, UserId,
};

/// A customer order.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Order {
    pub id: OrderId,
    pub user_id: UserId,
    pub status: OrderStatus,
    pub total: Decimal,
    pub shipping_name: String,
    pub shipping_address: String,
    pub shipping_phone: String,
    pub reject_reason: Option<String>,
    pub delivery_date: Option<NaiveDate>,
    pub pickup: bool,
    pub delivered_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// An order joined with its customer's email and name, for list views.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct OrderWithCustomer {
    pub id: OrderId,
    pub user_id: UserId,
    pub customer_email: String,
    pub customer_name: String,
    pub status: OrderStatus,
    pub total: Decimal,
    pub shipping_name: String,
    pub shipping_address: String,
    pub shipping_phone: String,
    pub reject_reason: Option<String>,
    pub delivery_date: Option<NaiveDate>,
    pub pickup: bool,
    pub delivered_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A line item, snapshotted at checkout time.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct OrderItem {
    pub id: OrderItemId,
    pub order_id: OrderId,
    pub product_id: Option<ProductId>,
    pub product_name: String,
    pub unit_label: String,
    pub unit_price: Decimal,
    pub quantity: i32,
    pub total_price: Decimal,
}

/// Local record mirroring gateway payment/refund state.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct PaymentTransaction {
    pub id: PaymentTransactionId,
    pub order_id: OrderId,
    pub gateway_order_id: String,
    pub gateway_payment_id: String,
    pub amount: Decimal,
    pub currency: String,
    pub status: PaymentStatus,
    pub refund_id: Option<String>,
    pub refund_amount: Option<Decimal>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// An order with customer, items, and payment for detail responses.
#[derive(Debug, Clone, Serialize)]
pub struct OrderDetail {
    #[serde(flatten)]
    pub order: OrderWithCustomer,
    pub items: Vec<OrderItem>,
    pub payment: Option<PaymentTransaction>,
}
