use bigdecimal::BigDecimal;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::{
    entities::payments::{InsertPaymentEntity, PaymentEntity, UpdatePaymentEntity},
    lifecycle::LifecycleError,
    value_objects::enums::{
        payment_methods::PaymentMethod, payment_statuses::PaymentStatus,
        refund_statuses::RefundStatus,
    },
};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PaymentModel {
    pub id: i64,
    pub order_id: i64,
    pub payment_method: PaymentMethod,
    pub payment_status: PaymentStatus,
    pub amount: BigDecimal,
    pub transaction_id: Option<String>,
    pub payment_date: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub refund_status: RefundStatus,
    pub refund_amount: Option<BigDecimal>,
    pub refund_transaction_id: Option<String>,
    pub refund_initiated_at: Option<DateTime<Utc>>,
    pub refund_completed_at: Option<DateTime<Utc>>,
    pub refund_expected_date: Option<DateTime<Utc>>,
}

impl PaymentModel {
    pub fn is_successful_online(&self) -> bool {
        self.payment_status == PaymentStatus::Success && self.payment_method.is_online()
    }

    pub fn to_update_entity(&self) -> UpdatePaymentEntity {
        UpdatePaymentEntity {
            payment_status: self.payment_status.to_string(),
            transaction_id: self.transaction_id.clone(),
            payment_date: self.payment_date,
            refund_status: self.refund_status.to_string(),
            refund_amount: self.refund_amount.clone(),
            refund_transaction_id: self.refund_transaction_id.clone(),
            refund_initiated_at: self.refund_initiated_at,
            refund_completed_at: self.refund_completed_at,
            refund_expected_date: self.refund_expected_date,
        }
    }
}

impl TryFrom<PaymentEntity> for PaymentModel {
    type Error = LifecycleError;

    fn try_from(value: PaymentEntity) -> Result<Self, Self::Error> {
        let payment_method = PaymentMethod::parse(&value.payment_method)
            .ok_or_else(|| LifecycleError::invalid("payment_method", &value.payment_method))?;
        let payment_status = PaymentStatus::parse(&value.payment_status)
            .ok_or_else(|| LifecycleError::invalid("payment_status", &value.payment_status))?;
        let refund_status = RefundStatus::parse(&value.refund_status)
            .ok_or_else(|| LifecycleError::invalid("refund_status", &value.refund_status))?;

        Ok(Self {
            id: value.id,
            order_id: value.order_id,
            payment_method,
            payment_status,
            amount: value.amount,
            transaction_id: value.transaction_id,
            payment_date: value.payment_date,
            created_at: value.created_at,
            refund_status,
            refund_amount: value.refund_amount,
            refund_transaction_id: value.refund_transaction_id,
            refund_initiated_at: value.refund_initiated_at,
            refund_completed_at: value.refund_completed_at,
            refund_expected_date: value.refund_expected_date,
        })
    }
}

/// A payment about to be recorded for an order that has none yet.
#[derive(Debug, Clone, PartialEq)]
pub struct NewPaymentModel {
    pub order_id: i64,
    pub payment_method: PaymentMethod,
    pub payment_status: PaymentStatus,
    pub amount: BigDecimal,
    pub transaction_id: Option<String>,
    pub payment_date: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl NewPaymentModel {
    pub fn to_entity(&self) -> InsertPaymentEntity {
        InsertPaymentEntity {
            order_id: self.order_id,
            payment_method: self.payment_method.to_string(),
            payment_status: self.payment_status.to_string(),
            amount: self.amount.clone(),
            transaction_id: self.transaction_id.clone(),
            payment_date: self.payment_date,
            created_at: self.created_at,
            refund_status: RefundStatus::NotRequired.to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct AdminPaymentFilter {
    pub method: Option<PaymentMethod>,
    pub status: Option<PaymentStatus>,
    pub refund: Option<RefundStatus>,
}

#[derive(Debug, Deserialize)]
pub struct ProcessPaymentRequest {
    pub payment_method: String,
}

#[derive(Debug, Serialize)]
pub struct PaymentMethodOption {
    pub code: PaymentMethod,
    pub label: &'static str,
}

#[derive(Debug, Serialize)]
pub struct PaymentOptionsDto {
    pub order_id: i64,
    pub order_number: String,
    pub total_amount: BigDecimal,
    pub methods: Vec<PaymentMethodOption>,
}

#[derive(Debug, Serialize)]
pub struct PaymentReceiptDto {
    pub order_id: i64,
    pub order_number: String,
    pub payment_method: PaymentMethod,
    pub payment_status: PaymentStatus,
    pub amount: BigDecimal,
    pub transaction_id: Option<String>,
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct RefundStatusDto {
    pub order_id: i64,
    pub order_number: String,
    pub refund_status: RefundStatus,
    pub refund_label: &'static str,
    pub refund_amount: Option<BigDecimal>,
    pub refund_initiated_at: Option<DateTime<Utc>>,
    pub refund_completed_at: Option<DateTime<Utc>>,
    pub refund_expected_date: Option<DateTime<Utc>>,
    pub timeline: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use std::str::FromStr;

    fn sample_entity() -> PaymentEntity {
        PaymentEntity {
            id: 7,
            order_id: 3,
            payment_method: "UPI".to_string(),
            payment_status: "Success".to_string(),
            amount: BigDecimal::from_str("499.00").unwrap(),
            transaction_id: Some("TXN0A1B2C3D".to_string()),
            payment_date: Some(Utc.with_ymd_and_hms(2025, 3, 1, 10, 0, 0).unwrap()),
            created_at: Utc.with_ymd_and_hms(2025, 3, 1, 10, 0, 0).unwrap(),
            refund_status: "Not_Required".to_string(),
            refund_amount: None,
            refund_transaction_id: None,
            refund_initiated_at: None,
            refund_completed_at: None,
            refund_expected_date: None,
        }
    }

    #[test]
    fn entity_with_known_values_converts() {
        let model = PaymentModel::try_from(sample_entity()).unwrap();
        assert_eq!(model.payment_method, PaymentMethod::Upi);
        assert_eq!(model.payment_status, PaymentStatus::Success);
        assert_eq!(model.refund_status, RefundStatus::NotRequired);
        assert!(model.is_successful_online());
    }

    #[test]
    fn entity_with_unknown_method_is_rejected() {
        let mut entity = sample_entity();
        entity.payment_method = "PAYPAL".to_string();

        let err = PaymentModel::try_from(entity).unwrap_err();
        assert_eq!(err, LifecycleError::invalid("payment_method", "PAYPAL"));
    }

    #[test]
    fn update_entity_carries_stored_spelling() {
        let model = PaymentModel::try_from(sample_entity()).unwrap();
        let update = model.to_update_entity();
        assert_eq!(update.payment_status, "Success");
        assert_eq!(update.refund_status, "Not_Required");
        assert_eq!(update.transaction_id.as_deref(), Some("TXN0A1B2C3D"));
    }
}
