use anyhow::Result;
use async_trait::async_trait;
use bigdecimal::BigDecimal;
use chrono::{DateTime, Utc};
use mockall::automock;

use crate::domain::value_objects::{
    admin::{PaymentMethodCounts, StatusCount, TopProduct},
    orders::OrderModel,
};

#[async_trait]
#[automock]
pub trait AdminDashboardRepository {
    async fn count_orders_by_status(&self) -> Result<Vec<StatusCount>>;
    async fn count_orders_since(&self, since: DateTime<Utc>) -> Result<i64>;
    /// Sum of order totals in revenue statuses, optionally limited to orders
    /// created at or after `since`.
    async fn revenue_since(&self, since: Option<DateTime<Utc>>) -> Result<BigDecimal>;
    async fn count_payments_by_method(&self) -> Result<PaymentMethodCounts>;
    async fn count_pending_refunds(&self) -> Result<i64>;
    async fn recent_orders(&self, limit: i64) -> Result<Vec<OrderModel>>;
    async fn top_products(&self, limit: i64) -> Result<Vec<TopProduct>>;
}
