use std::sync::Arc;

use bigdecimal::BigDecimal;
use chrono::{DateTime, Utc};
use thiserror::Error;
use tracing::{error, info, warn};
use uuid::Uuid;

use super::lifecycle_status_code;
use crate::domain::{
    lifecycle::{
        LifecycleError,
        cancellation::{self, can_be_cancelled, ensure_cancellable, ensure_cancelled},
        refunds::{refund_in_progress, refund_timeline},
    },
    repositories::orders::OrderRepository,
    value_objects::{
        orders::{
            CancellationPreviewDto, CancellationResultDto, OrderModel, OrderSummaryDto,
            SpendingSummaryDto,
        },
        payments::RefundStatusDto,
    },
};

#[derive(Debug, Error)]
pub enum OrderError {
    #[error("order not found")]
    OrderNotFound,
    #[error(transparent)]
    Lifecycle(#[from] LifecycleError),
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl OrderError {
    pub fn status_code(&self) -> axum::http::StatusCode {
        use axum::http::StatusCode;
        match self {
            OrderError::OrderNotFound => StatusCode::NOT_FOUND,
            OrderError::Lifecycle(err) => lifecycle_status_code(err),
            OrderError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

pub type UseCaseResult<T> = std::result::Result<T, OrderError>;

pub struct OrderUseCase<O>
where
    O: OrderRepository + Send + Sync + 'static,
{
    order_repository: Arc<O>,
}

impl<O> OrderUseCase<O>
where
    O: OrderRepository + Send + Sync + 'static,
{
    pub fn new(order_repository: Arc<O>) -> Self {
        Self { order_repository }
    }

    pub async fn list_orders(&self, user_id: Uuid) -> UseCaseResult<Vec<OrderSummaryDto>> {
        info!(%user_id, "orders: listing orders for user");
        let orders = self.user_orders(user_id).await?;
        let order_count = orders.len();
        info!(%user_id, order_count, "orders: orders loaded");
        Ok(orders.iter().map(OrderSummaryDto::from).collect())
    }

    /// Staff may open any order, customers only their own.
    pub async fn order_detail(
        &self,
        user_id: Uuid,
        is_staff: bool,
        order_id: i64,
    ) -> UseCaseResult<OrderModel> {
        info!(%user_id, order_id, is_staff, "orders: loading order detail");
        let order = self.find_order(order_id).await?;
        if !is_staff && order.user_id != user_id {
            warn!(%user_id, order_id, "orders: order belongs to another user");
            return Err(OrderError::OrderNotFound);
        }
        Ok(order)
    }

    pub async fn cancellation_preview(
        &self,
        user_id: Uuid,
        order_id: i64,
        now: DateTime<Utc>,
    ) -> UseCaseResult<CancellationPreviewDto> {
        let order = self.owned_order(user_id, order_id).await?;
        let can_be_cancelled = can_be_cancelled(&order, now);
        info!(%user_id, order_id, can_be_cancelled, "orders: cancellation preview");

        Ok(CancellationPreviewDto {
            order_id: order.id,
            order_number: order.order_number.clone(),
            status: order.status,
            can_be_cancelled,
            cancellation_deadline: order.cancellation_deadline(),
        })
    }

    pub async fn cancel_order(
        &self,
        user_id: Uuid,
        order_id: i64,
        reason: &str,
        now: DateTime<Utc>,
    ) -> UseCaseResult<CancellationResultDto> {
        info!(%user_id, order_id, "orders: cancellation requested");
        let order = self.owned_order(user_id, order_id).await?;

        ensure_cancellable(&order, now).inspect_err(|_| {
            warn!(
                %user_id,
                order_id,
                status = %order.status,
                "orders: order is not cancellable"
            )
        })?;

        let cancelled = cancellation::cancel_order(&order, reason, now);
        let refund = match (&cancelled.order.payment, cancelled.refund_initiated) {
            (Some(payment), true) => Some((payment.id, payment.to_update_entity())),
            _ => None,
        };

        self.order_repository
            .save_cancellation(order.id, cancelled.order.to_cancel_entity(), refund)
            .await
            .map_err(|err| {
                error!(%user_id, order_id, db_error = ?err, "orders: failed to save cancellation");
                OrderError::Internal(err)
            })?;

        info!(
            %user_id,
            order_id,
            refund_initiated = cancelled.refund_initiated,
            "orders: order cancelled"
        );

        Ok(CancellationResultDto {
            order_id: cancelled.order.id,
            order_number: cancelled.order.order_number.clone(),
            status: cancelled.order.status,
            cancelled_at: cancelled.order.cancelled_at,
            refund_initiated: cancelled.refund_initiated,
            message: format!(
                "Order {} has been cancelled successfully.",
                cancelled.order.order_number
            ),
        })
    }

    pub async fn cancellation_confirmation(
        &self,
        user_id: Uuid,
        order_id: i64,
    ) -> UseCaseResult<OrderModel> {
        let order = self.owned_order(user_id, order_id).await?;
        ensure_cancelled(&order)?;
        Ok(order)
    }

    pub async fn refund_status(&self, user_id: Uuid, order_id: i64) -> UseCaseResult<RefundStatusDto> {
        let order = self.owned_order(user_id, order_id).await?;
        let payment = refund_in_progress(&order)?;
        info!(
            %user_id,
            order_id,
            refund_status = %payment.refund_status,
            "orders: refund status loaded"
        );

        Ok(RefundStatusDto {
            order_id: order.id,
            order_number: order.order_number.clone(),
            refund_status: payment.refund_status,
            refund_label: payment.refund_status.label(),
            refund_amount: payment.refund_amount.clone(),
            refund_initiated_at: payment.refund_initiated_at,
            refund_completed_at: payment.refund_completed_at,
            refund_expected_date: payment.refund_expected_date,
            timeline: refund_timeline(payment),
        })
    }

    /// Cancelled and unpaid orders do not count towards spending.
    pub async fn spending_summary(&self, user_id: Uuid) -> UseCaseResult<SpendingSummaryDto> {
        let orders = self.user_orders(user_id).await?;
        let total_spent = orders
            .iter()
            .filter(|order| order.status.counts_as_revenue())
            .fold(BigDecimal::from(0), |total, order| total + &order.total_amount);

        Ok(SpendingSummaryDto {
            order_count: orders.len(),
            total_spent,
        })
    }

    async fn user_orders(&self, user_id: Uuid) -> UseCaseResult<Vec<OrderModel>> {
        self.order_repository
            .list_user_orders(user_id)
            .await
            .map_err(|err| {
                error!(%user_id, db_error = ?err, "orders: failed to list orders");
                OrderError::Internal(err)
            })
    }

    async fn find_order(&self, order_id: i64) -> UseCaseResult<OrderModel> {
        self.order_repository
            .find_order(order_id)
            .await
            .map_err(|err| {
                error!(order_id, db_error = ?err, "orders: failed to load order");
                OrderError::Internal(err)
            })?
            .ok_or(OrderError::OrderNotFound)
    }

    async fn owned_order(&self, user_id: Uuid, order_id: i64) -> UseCaseResult<OrderModel> {
        self.order_detail(user_id, false, order_id).await
    }
}
