use std::sync::Arc;

use chrono::{DateTime, Utc};
use thiserror::Error;
use tracing::{error, info, warn};
use uuid::Uuid;

use super::lifecycle_status_code;
use crate::domain::{
    lifecycle::{LifecycleError, checkout::build_order, identifiers::generate_order_number},
    repositories::{
        carts::CartRepository,
        orders::{OrderNumberTaken, OrderRepository},
    },
    value_objects::orders::{OrderSummaryDto, ShippingAddress},
};

/// Order numbers are random, so a collision is retried with a fresh one.
pub const MAX_ORDER_NUMBER_ATTEMPTS: usize = 5;

#[derive(Debug, Error)]
pub enum CheckoutError {
    #[error(transparent)]
    Lifecycle(#[from] LifecycleError),
    #[error("could not allocate a unique order number after {0} attempts")]
    OrderNumberExhausted(usize),
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl CheckoutError {
    pub fn status_code(&self) -> axum::http::StatusCode {
        use axum::http::StatusCode;
        match self {
            CheckoutError::Lifecycle(err) => lifecycle_status_code(err),
            CheckoutError::OrderNumberExhausted(_) | CheckoutError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

pub type UseCaseResult<T> = std::result::Result<T, CheckoutError>;

pub struct CheckoutUseCase<O, C>
where
    O: OrderRepository + Send + Sync + 'static,
    C: CartRepository + Send + Sync + 'static,
{
    order_repository: Arc<O>,
    cart_repository: Arc<C>,
}

impl<O, C> CheckoutUseCase<O, C>
where
    O: OrderRepository + Send + Sync + 'static,
    C: CartRepository + Send + Sync + 'static,
{
    pub fn new(order_repository: Arc<O>, cart_repository: Arc<C>) -> Self {
        Self {
            order_repository,
            cart_repository,
        }
    }

    /// Turns the user's cart into an order awaiting payment. The cart itself
    /// is only cleared once the order is paid for.
    pub async fn place_order(
        &self,
        user_id: Uuid,
        shipping: ShippingAddress,
        now: DateTime<Utc>,
    ) -> UseCaseResult<OrderSummaryDto> {
        info!(%user_id, "checkout: placing order");
        let lines = self
            .cart_repository
            .list_cart_lines(user_id)
            .await
            .map_err(|err| {
                error!(%user_id, db_error = ?err, "checkout: failed to load cart lines");
                CheckoutError::Internal(err)
            })?;

        let mut new_order = build_order(user_id, shipping, &lines, generate_order_number(), now)
            .inspect_err(|err| warn!(%user_id, reason = %err, "checkout: cart rejected"))?;

        for attempt in 1..=MAX_ORDER_NUMBER_ATTEMPTS {
            match self.order_repository.create_order(new_order.clone()).await {
                Ok(order_id) => {
                    info!(
                        %user_id,
                        order_id,
                        order_number = %new_order.order_number,
                        total_amount = %new_order.total_amount,
                        "checkout: order placed"
                    );
                    return Ok(OrderSummaryDto {
                        id: order_id,
                        order_number: new_order.order_number,
                        status: new_order.status,
                        status_label: new_order.status.label(),
                        total_amount: new_order.total_amount,
                        created_at: new_order.created_at,
                    });
                }
                Err(err) if err.downcast_ref::<OrderNumberTaken>().is_some() => {
                    warn!(
                        %user_id,
                        attempt,
                        order_number = %new_order.order_number,
                        "checkout: order number collision, regenerating"
                    );
                    new_order.order_number = generate_order_number();
                }
                Err(err) => {
                    error!(%user_id, db_error = ?err, "checkout: failed to create order");
                    return Err(CheckoutError::Internal(err));
                }
            }
        }

        error!(%user_id, "checkout: exhausted order number attempts");
        Err(CheckoutError::OrderNumberExhausted(
            MAX_ORDER_NUMBER_ATTEMPTS,
        ))
    }
}
