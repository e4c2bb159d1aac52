//! Conversion of externally supplied strings into the closed status enums.

use super::LifecycleError;
use crate::domain::value_objects::enums::{
    order_statuses::OrderStatus, payment_methods::PaymentMethod, payment_statuses::PaymentStatus,
    refund_statuses::RefundStatus,
};

pub fn order_status(raw: &str) -> Result<OrderStatus, LifecycleError> {
    OrderStatus::parse(raw).ok_or_else(|| LifecycleError::invalid("order_status", raw))
}

pub fn payment_status(raw: &str) -> Result<PaymentStatus, LifecycleError> {
    PaymentStatus::parse(raw)
        .ok_or_else(|| LifecycleError::invalid("payment_status", raw))
}

pub fn payment_method(raw: &str) -> Result<PaymentMethod, LifecycleError> {
    PaymentMethod::parse(raw)
        .ok_or_else(|| LifecycleError::invalid("payment_method", raw))
}

pub fn refund_status(raw: &str) -> Result<RefundStatus, LifecycleError> {
    RefundStatus::parse(raw).ok_or_else(|| LifecycleError::invalid("refund_status", raw))
}

/// Query-string filters treat an empty value as "no filter".
pub fn optional<T>(
    raw: Option<&str>,
    parse: impl Fn(&str) -> Result<T, LifecycleError>,
) -> Result<Option<T>, LifecycleError> {
    match raw {
        None | Some("") => Ok(None),
        Some(value) => parse(value).map(Some),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn padded_values_are_not_members() {
        assert_eq!(
            order_status(" Shipped "),
            Err(LifecycleError::invalid("order_status", " Shipped "))
        );
        assert_eq!(
            payment_status("Success\n"),
            Err(LifecycleError::invalid("payment_status", "Success\n"))
        );
        assert!(payment_method("UPI ").is_err());
        assert!(optional(Some(" Pending"), refund_status).is_err());
        assert!(optional(Some("  "), refund_status).is_err());
    }

    #[test]
    fn unknown_value_names_the_field() {
        let err = payment_status("Bogus").unwrap_err();
        assert_eq!(
            err,
            LifecycleError::InvalidEnumValue {
                field: "payment_status",
                value: "Bogus".to_string(),
            }
        );
        assert!(err.to_string().contains("payment_status"));
    }

    #[test]
    fn empty_filter_means_no_filter() {
        assert_eq!(optional(None, refund_status), Ok(None));
        assert_eq!(optional(Some(""), refund_status), Ok(None));
        assert_eq!(
            optional(Some("Pending"), refund_status),
            Ok(Some(RefundStatus::Pending))
        );
        assert!(optional(Some("Soon"), refund_status).is_err());
    }
}
