use chrono::{DateTime, Utc};

use super::{LifecycleError, refunds::initiate_refund};
use crate::domain::value_objects::{enums::order_statuses::OrderStatus, orders::OrderModel};

#[derive(Debug, Clone, PartialEq)]
pub struct CancelledOrder {
    pub order: OrderModel,
    pub refund_initiated: bool,
}

/// Cancelled, delivered and shipped orders are closed; everything else may be
/// cancelled until 24 hours after creation. An order still waiting for payment
/// follows the same window.
pub fn can_be_cancelled(order: &OrderModel, now: DateTime<Utc>) -> bool {
    if order.status.is_terminal() {
        return false;
    }

    if order.status == OrderStatus::Shipped {
        return false;
    }

    now < order.cancellation_deadline()
}

pub fn ensure_cancellable(order: &OrderModel, now: DateTime<Utc>) -> Result<(), LifecycleError> {
    if can_be_cancelled(order, now) {
        Ok(())
    } else {
        Err(LifecycleError::NotEligible(format!(
            "order {} cannot be cancelled",
            order.order_number
        )))
    }
}

/// Marks the order cancelled and, for a successful online payment, starts the
/// refund.
///
/// Does not re-check eligibility: callers run [`can_be_cancelled`] first.
pub fn cancel_order(order: &OrderModel, reason: &str, now: DateTime<Utc>) -> CancelledOrder {
    let mut next = order.clone();
    next.status = OrderStatus::Cancelled;
    next.cancelled_at = Some(now);
    next.cancellation_reason = Some(reason.to_string());
    next.is_cancellable = false;

    let mut refund_initiated = false;
    if let Some(payment) = order.payment.as_ref().filter(|p| p.is_successful_online()) {
        if let Ok(refunded) = initiate_refund(payment, now) {
            next.payment = Some(refunded);
            refund_initiated = true;
        }
    }

    CancelledOrder {
        order: next,
        refund_initiated,
    }
}

pub fn ensure_cancelled(order: &OrderModel) -> Result<(), LifecycleError> {
    if order.status == OrderStatus::Cancelled {
        Ok(())
    } else {
        Err(LifecycleError::NotEligible(format!(
            "order {} is not cancelled",
            order.order_number
        )))
    }
}
