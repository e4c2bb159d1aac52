use bigdecimal::BigDecimal;
use chrono::{DateTime, Utc};
use diesel::prelude::*;

use crate::{domain::entities::orders::OrderEntity, infrastructure::postgres::schema::payments};

#[derive(Debug, Clone, Identifiable, Selectable, Queryable, Associations)]
#[diesel(belongs_to(OrderEntity, foreign_key = order_id))]
#[diesel(table_name = payments)]
pub struct PaymentEntity {
    pub id: i64,
    pub order_id: i64,
    pub payment_method: String,
    pub payment_status: String,
    pub amount: BigDecimal,
    pub transaction_id: Option<String>,
    pub payment_date: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub refund_status: String,
    pub refund_amount: Option<BigDecimal>,
    pub refund_transaction_id: Option<String>,
    pub refund_initiated_at: Option<DateTime<Utc>>,
    pub refund_completed_at: Option<DateTime<Utc>>,
    pub refund_expected_date: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Insertable)]
#[diesel(table_name = payments)]
pub struct InsertPaymentEntity {
    pub order_id: i64,
    pub payment_method: String,
    pub payment_status: String,
    pub amount: BigDecimal,
    pub transaction_id: Option<String>,
    pub payment_date: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub refund_status: String,
}

/// Full mutable state of a payment row; `None` is written as NULL.
#[derive(Debug, Clone, PartialEq, AsChangeset)]
#[diesel(table_name = payments, treat_none_as_null = true)]
pub struct UpdatePaymentEntity {
    pub payment_status: String,
    pub transaction_id: Option<String>,
    pub payment_date: Option<DateTime<Utc>>,
    pub refund_status: String,
    pub refund_amount: Option<BigDecimal>,
    pub refund_transaction_id: Option<String>,
    pub refund_initiated_at: Option<DateTime<Utc>>,
    pub refund_completed_at: Option<DateTime<Utc>>,
    pub refund_expected_date: Option<DateTime<Utc>>,
}
