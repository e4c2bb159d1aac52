use chrono::{DateTime, Utc};

use super::{LifecycleError, identifiers::generate_transaction_id};
use crate::domain::value_objects::{
    enums::{
        order_statuses::OrderStatus, payment_methods::PaymentMethod,
        payment_statuses::PaymentStatus,
    },
    orders::OrderModel,
    payments::NewPaymentModel,
};

/// Outcome of taking payment for an order: the payment row to record and the
/// status the order moves to.
#[derive(Debug, Clone, PartialEq)]
pub struct Settlement {
    pub order_status: OrderStatus,
    pub payment: NewPaymentModel,
}

/// Payment can only be taken once, while the order is still awaiting it.
pub fn ensure_awaiting_payment(order: &OrderModel) -> Result<(), LifecycleError> {
    if order.status != OrderStatus::PaymentPending {
        return Err(LifecycleError::NotEligible(format!(
            "order {} is not eligible for payment",
            order.order_number
        )));
    }
    if order.payment.is_some() {
        return Err(LifecycleError::NotEligible(format!(
            "order {} already has a payment",
            order.order_number
        )));
    }
    Ok(())
}

/// Cash on delivery confirms the order straight away; online methods go
/// through the simulated gateway, which always succeeds and hands back a
/// transaction id.
pub fn settle_payment(
    order: &OrderModel,
    method: PaymentMethod,
    now: DateTime<Utc>,
) -> Result<Settlement, LifecycleError> {
    ensure_awaiting_payment(order)?;

    let (order_status, transaction_id) = match method {
        PaymentMethod::Cod => (OrderStatus::Confirmed, None),
        PaymentMethod::Upi | PaymentMethod::Card | PaymentMethod::NetBanking => {
            (OrderStatus::Paid, Some(generate_transaction_id()))
        }
    };

    Ok(Settlement {
        order_status,
        payment: NewPaymentModel {
            order_id: order.id,
            payment_method: method,
            payment_status: PaymentStatus::Success,
            amount: order.total_amount.clone(),
            transaction_id,
            payment_date: Some(now),
            created_at: now,
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value_objects::orders::ShippingAddress;
    use bigdecimal::BigDecimal;
    use chrono::TimeZone;
    use std::str::FromStr;
    use uuid::Uuid;

    fn awaiting() -> OrderModel {
        OrderModel {
            id: 77,
            user_id: Uuid::new_v4(),
            order_number: "DD7777AAAA".to_string(),
            status: OrderStatus::PaymentPending,
            shipping: ShippingAddress::default(),
            total_amount: BigDecimal::from_str("1299.00").unwrap(),
            created_at: Utc.with_ymd_and_hms(2025, 4, 2, 7, 0, 0).unwrap(),
            cancelled_at: None,
            cancellation_reason: None,
            is_cancellable: true,
            items: vec![],
            payment: None,
        }
    }

    #[test]
    fn cod_confirms_without_transaction_id() {
        let now = Utc.with_ymd_and_hms(2025, 4, 2, 7, 5, 0).unwrap();
        let settlement = settle_payment(&awaiting(), PaymentMethod::Cod, now).unwrap();

        assert_eq!(settlement.order_status, OrderStatus::Confirmed);
        assert_eq!(settlement.payment.payment_status, PaymentStatus::Success);
        assert_eq!(settlement.payment.transaction_id, None);
        assert_eq!(settlement.payment.payment_date, Some(now));
        assert_eq!(
            settlement.payment.amount,
            BigDecimal::from_str("1299.00").unwrap()
        );
    }

    #[test]
    fn online_methods_mark_order_paid_with_reference() {
        let now = Utc.with_ymd_and_hms(2025, 4, 2, 7, 5, 0).unwrap();
        for method in [PaymentMethod::Upi, PaymentMethod::Card, PaymentMethod::NetBanking] {
            let settlement = settle_payment(&awaiting(), method, now).unwrap();
            assert_eq!(settlement.order_status, OrderStatus::Paid);
            assert_eq!(settlement.payment.payment_method, method);
            let reference = settlement.payment.transaction_id.unwrap();
            assert!(reference.starts_with("TXN"));
        }
    }

    #[test]
    fn only_orders_awaiting_payment_are_settled() {
        let mut confirmed = awaiting();
        confirmed.status = OrderStatus::Confirmed;

        let err = settle_payment(&confirmed, PaymentMethod::Card, Utc::now()).unwrap_err();
        assert!(matches!(err, LifecycleError::NotEligible(_)));
    }
}
