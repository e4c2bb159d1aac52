//! Admin overrides of order and payment status.

use chrono::{DateTime, Utc};

use super::{LifecycleError, parse};
use crate::domain::value_objects::{
    enums::payment_statuses::PaymentStatus, orders::OrderModel, payments::PaymentModel,
};

/// Accepts any known payment status. `payment_date` is stamped the first time
/// the payment becomes `Success` and never overwritten afterwards.
pub fn update_payment_status(
    payment: &PaymentModel,
    raw_status: &str,
    now: DateTime<Utc>,
) -> Result<PaymentModel, LifecycleError> {
    let status = parse::payment_status(raw_status)?;

    let mut next = payment.clone();
    next.payment_status = status;
    if status == PaymentStatus::Success && next.payment_date.is_none() {
        next.payment_date = Some(now);
    }
    Ok(next)
}

/// Accepts any known order status from any current status; admins use this to
/// correct orders, so no transition graph is enforced.
pub fn update_order_status(
    order: &OrderModel,
    raw_status: &str,
) -> Result<OrderModel, LifecycleError> {
    let status = parse::order_status(raw_status)?;

    let mut next = order.clone();
    next.status = status;
    Ok(next)
}
