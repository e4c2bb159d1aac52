use bigdecimal::BigDecimal;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::LifecycleError;
use crate::domain::value_objects::{
    enums::order_statuses::OrderStatus,
    orders::{CartLineModel, NewOrderItemModel, NewOrderModel, ShippingAddress},
};

/// Freezes the cart's current prices into a new order awaiting payment.
/// The total is computed once here and never recomputed.
pub fn build_order(
    user_id: Uuid,
    shipping: ShippingAddress,
    lines: &[CartLineModel],
    order_number: String,
    now: DateTime<Utc>,
) -> Result<NewOrderModel, LifecycleError> {
    if lines.is_empty() {
        return Err(LifecycleError::EmptyCart);
    }

    let mut total_amount = BigDecimal::from(0);
    let mut items = Vec::with_capacity(lines.len());
    for line in lines {
        if line.quantity <= 0 {
            return Err(LifecycleError::InvalidQuantity {
                product_id: line.product_id,
            });
        }
        total_amount += &line.unit_price * BigDecimal::from(line.quantity);
        items.push(NewOrderItemModel {
            product_id: line.product_id,
            product_name: line.product_name.clone(),
            quantity: line.quantity,
            price: line.unit_price.clone(),
        });
    }

    Ok(NewOrderModel {
        user_id,
        order_number,
        status: OrderStatus::PaymentPending,
        shipping,
        total_amount,
        created_at: now,
        items,
    })
}
