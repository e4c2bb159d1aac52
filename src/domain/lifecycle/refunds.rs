use chrono::{DateTime, Duration, Utc};

use super::LifecycleError;
use crate::domain::value_objects::{
    enums::{payment_statuses::PaymentStatus, refund_statuses::RefundStatus},
    orders::OrderModel,
    payments::PaymentModel,
};

/// Flat refund SLA, the same for every online method.
pub const REFUND_SLA_DAYS: i64 = 4;

const REFUND_DATE_FORMAT: &str = "%B %d, %Y";

/// Moves a successful payment's refund sub-state from `Not_Required` to
/// `Pending` for the full amount. The input is never modified, so a second
/// call on the returned payment is rejected and changes nothing.
pub fn initiate_refund(
    payment: &PaymentModel,
    now: DateTime<Utc>,
) -> Result<PaymentModel, LifecycleError> {
    if payment.payment_status != PaymentStatus::Success {
        return Err(LifecycleError::NotEligible(format!(
            "payment is {}, only successful payments can be refunded",
            payment.payment_status
        )));
    }
    if payment.refund_status != RefundStatus::NotRequired {
        return Err(LifecycleError::AlreadyInTargetSubstate(format!(
            "refund already {}",
            payment.refund_status
        )));
    }

    let mut next = payment.clone();
    next.refund_status = RefundStatus::Pending;
    next.refund_amount = Some(payment.amount.clone());
    next.refund_initiated_at = Some(now);
    next.refund_expected_date = Some(now + Duration::days(REFUND_SLA_DAYS));
    Ok(next)
}

pub fn refund_timeline(payment: &PaymentModel) -> String {
    if payment.refund_status == RefundStatus::NotRequired {
        return "No refund required".to_string();
    }

    match payment.refund_expected_date {
        Some(expected) => format!(
            "Expected refund date: {}",
            expected.format(REFUND_DATE_FORMAT)
        ),
        None => "Refund timeline not available".to_string(),
    }
}

/// Refund details are only shown for an order whose payment entered the refund flow.
pub fn refund_in_progress(order: &OrderModel) -> Result<&PaymentModel, LifecycleError> {
    match &order.payment {
        Some(payment) if payment.refund_status != RefundStatus::NotRequired => Ok(payment),
        _ => Err(LifecycleError::NotEligible(
            "no refund information available for this order".to_string(),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value_objects::enums::payment_methods::PaymentMethod;
    use bigdecimal::BigDecimal;
    use chrono::TimeZone;
    use std::str::FromStr;

    fn payment(status: PaymentStatus) -> PaymentModel {
        PaymentModel {
            id: 1,
            order_id: 10,
            payment_method: PaymentMethod::Card,
            payment_status: status,
            amount: BigDecimal::from_str("1000.00").unwrap(),
            transaction_id: Some("TXN12345678".to_string()),
            payment_date: None,
            created_at: Utc.with_ymd_and_hms(2025, 6, 1, 9, 0, 0).unwrap(),
            refund_status: RefundStatus::NotRequired,
            refund_amount: None,
            refund_transaction_id: None,
            refund_initiated_at: None,
            refund_completed_at: None,
            refund_expected_date: None,
        }
    }

    #[test]
    fn successful_payment_enters_pending_refund() {
        let now = Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap();
        let refunded = initiate_refund(&payment(PaymentStatus::Success), now).unwrap();

        assert_eq!(refunded.refund_status, RefundStatus::Pending);
        assert_eq!(refunded.refund_amount, Some(BigDecimal::from_str("1000.00").unwrap()));
        assert_eq!(refunded.refund_initiated_at, Some(now));
        assert_eq!(
            refunded.refund_expected_date,
            Some(Utc.with_ymd_and_hms(2025, 6, 5, 12, 0, 0).unwrap())
        );
        assert_eq!(refunded.payment_status, PaymentStatus::Success);
    }

    #[test]
    fn second_initiation_is_a_no_op() {
        let first_at = Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap();
        let second_at = Utc.with_ymd_and_hms(2025, 6, 2, 12, 0, 0).unwrap();

        let refunded = initiate_refund(&payment(PaymentStatus::Success), first_at).unwrap();
        let err = initiate_refund(&refunded, second_at).unwrap_err();

        assert!(matches!(err, LifecycleError::AlreadyInTargetSubstate(_)));
        assert_eq!(refunded.refund_initiated_at, Some(first_at));
    }

    #[test]
    fn unsuccessful_payments_are_never_refunded() {
        let now = Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap();
        for status in [
            PaymentStatus::Pending,
            PaymentStatus::Failed,
            PaymentStatus::Cancelled,
            PaymentStatus::Refunded,
        ] {
            let err = initiate_refund(&payment(status), now).unwrap_err();
            assert!(matches!(err, LifecycleError::NotEligible(_)));
        }
    }

    #[test]
    fn timeline_describes_refund_progress() {
        let idle = payment(PaymentStatus::Success);
        assert_eq!(refund_timeline(&idle), "No refund required");

        let now = Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap();
        let refunded = initiate_refund(&idle, now).unwrap();
        assert_eq!(refund_timeline(&refunded), "Expected refund date: June 05, 2025");

        let mut undated = refunded;
        undated.refund_expected_date = None;
        assert_eq!(refund_timeline(&undated), "Refund timeline not available");
    }
}
