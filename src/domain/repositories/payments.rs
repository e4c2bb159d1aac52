use anyhow::Result;
use async_trait::async_trait;
use mockall::automock;
use thiserror::Error;

use crate::domain::{
    entities::payments::UpdatePaymentEntity,
    value_objects::{
        enums::order_statuses::OrderStatus,
        payments::{AdminPaymentFilter, NewPaymentModel, PaymentModel},
    },
};

#[derive(Debug, Error)]
#[error("order {0} already has a payment")]
pub struct PaymentAlreadyExists(pub i64);

#[async_trait]
#[automock]
pub trait PaymentRepository {
    /// Inserts the payment and moves its order to `order_status` atomically.
    async fn record_payment(
        &self,
        new_payment: NewPaymentModel,
        order_status: OrderStatus,
    ) -> Result<i64>;
    async fn find_payment(&self, payment_id: i64) -> Result<Option<PaymentModel>>;
    async fn update_payment(
        &self,
        payment_id: i64,
        update_entity: UpdatePaymentEntity,
    ) -> Result<()>;
    async fn list_payments(&self, filter: AdminPaymentFilter) -> Result<Vec<PaymentModel>>;
}
