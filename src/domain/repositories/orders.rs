use anyhow::Result;
use async_trait::async_trait;
use mockall::automock;
use thiserror::Error;
use uuid::Uuid;

use crate::domain::{
    entities::{orders::CancelOrderEntity, payments::UpdatePaymentEntity},
    value_objects::{
        enums::order_statuses::OrderStatus,
        orders::{AdminOrderFilter, NewOrderModel, OrderModel},
    },
};

/// Raised by `create_order` when the generated order number already exists.
#[derive(Debug, Error)]
#[error("order number {0} is already taken")]
pub struct OrderNumberTaken(pub String);

#[async_trait]
#[automock]
pub trait OrderRepository {
    /// Inserts the order and its items in one transaction.
    async fn create_order(&self, new_order: NewOrderModel) -> Result<i64>;
    async fn find_order(&self, order_id: i64) -> Result<Option<OrderModel>>;
    /// Newest first.
    async fn list_user_orders(&self, user_id: Uuid) -> Result<Vec<OrderModel>>;
    async fn save_cancellation(
        &self,
        order_id: i64,
        cancel_entity: CancelOrderEntity,
        refund: Option<(i64, UpdatePaymentEntity)>,
    ) -> Result<()>;
    async fn update_status(&self, order_id: i64, status: OrderStatus) -> Result<()>;
    async fn list_orders(&self, filter: AdminOrderFilter) -> Result<Vec<OrderModel>>;
}
