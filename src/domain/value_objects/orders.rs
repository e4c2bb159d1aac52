use bigdecimal::BigDecimal;
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::{
    entities::{
        cart_lines::CartLineEntity,
        order_items::{InsertOrderItemEntity, OrderItemEntity},
        orders::{CancelOrderEntity, InsertOrderEntity, OrderEntity},
        payments::PaymentEntity,
    },
    lifecycle::LifecycleError,
    value_objects::{enums::order_statuses::OrderStatus, payments::PaymentModel},
};

/// Length of the window, counted from creation, in which a customer may cancel.
pub const CANCELLATION_WINDOW_HOURS: i64 = 24;

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ShippingAddress {
    pub name: String,
    pub phone: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub pincode: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OrderItemModel {
    pub id: i64,
    pub product_id: i64,
    pub product_name: String,
    pub quantity: i32,
    /// Unit price at the moment the order was placed.
    pub price: BigDecimal,
}

impl OrderItemModel {
    pub fn total_price(&self) -> BigDecimal {
        &self.price * BigDecimal::from(self.quantity)
    }
}

impl From<OrderItemEntity> for OrderItemModel {
    fn from(value: OrderItemEntity) -> Self {
        Self {
            id: value.id,
            product_id: value.product_id,
            product_name: value.product_name,
            quantity: value.quantity,
            price: value.price,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OrderModel {
    pub id: i64,
    pub user_id: Uuid,
    pub order_number: String,
    pub status: OrderStatus,
    pub shipping: ShippingAddress,
    pub total_amount: BigDecimal,
    pub created_at: DateTime<Utc>,
    pub cancelled_at: Option<DateTime<Utc>>,
    pub cancellation_reason: Option<String>,
    pub is_cancellable: bool,
    pub items: Vec<OrderItemModel>,
    /// Absent until the buyer picks a payment method.
    pub payment: Option<PaymentModel>,
}

impl OrderModel {
    pub fn from_entities(
        order: OrderEntity,
        items: Vec<OrderItemEntity>,
        payment: Option<PaymentEntity>,
    ) -> Result<Self, LifecycleError> {
        let status = OrderStatus::parse(&order.status)
            .ok_or_else(|| LifecycleError::invalid("order_status", &order.status))?;
        let payment = payment.map(PaymentModel::try_from).transpose()?;

        Ok(Self {
            id: order.id,
            user_id: order.user_id,
            order_number: order.order_number,
            status,
            shipping: ShippingAddress {
                name: order.shipping_name,
                phone: order.shipping_phone,
                address: order.shipping_address,
                city: order.shipping_city,
                state: order.shipping_state,
                pincode: order.shipping_pincode,
            },
            total_amount: order.total_amount,
            created_at: order.created_at,
            cancelled_at: order.cancelled_at,
            cancellation_reason: order.cancellation_reason,
            is_cancellable: order.is_cancellable,
            items: items.into_iter().map(OrderItemModel::from).collect(),
            payment,
        })
    }

    /// `created_at + 24h`, whatever the current status.
    pub fn cancellation_deadline(&self) -> DateTime<Utc> {
        self.created_at + Duration::hours(CANCELLATION_WINDOW_HOURS)
    }

    pub fn to_cancel_entity(&self) -> CancelOrderEntity {
        CancelOrderEntity {
            status: self.status.to_string(),
            cancelled_at: self.cancelled_at,
            cancellation_reason: self.cancellation_reason.clone(),
            is_cancellable: self.is_cancellable,
        }
    }
}

/// A cart line priced with the product's current final price.
#[derive(Debug, Clone, PartialEq)]
pub struct CartLineModel {
    pub product_id: i64,
    pub product_name: String,
    pub quantity: i32,
    pub unit_price: BigDecimal,
}

impl From<CartLineEntity> for CartLineModel {
    fn from(value: CartLineEntity) -> Self {
        Self {
            product_id: value.product_id,
            product_name: value.product_name,
            quantity: value.quantity,
            unit_price: value.discount_price.unwrap_or(value.price),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewOrderItemModel {
    pub product_id: i64,
    pub product_name: String,
    pub quantity: i32,
    pub price: BigDecimal,
}

/// An order ready to be inserted together with its items.
#[derive(Debug, Clone, PartialEq)]
pub struct NewOrderModel {
    pub user_id: Uuid,
    pub order_number: String,
    pub status: OrderStatus,
    pub shipping: ShippingAddress,
    pub total_amount: BigDecimal,
    pub created_at: DateTime<Utc>,
    pub items: Vec<NewOrderItemModel>,
}

impl NewOrderModel {
    pub fn to_entity(&self) -> InsertOrderEntity {
        InsertOrderEntity {
            user_id: self.user_id,
            order_number: self.order_number.clone(),
            status: self.status.to_string(),
            shipping_name: self.shipping.name.clone(),
            shipping_phone: self.shipping.phone.clone(),
            shipping_address: self.shipping.address.clone(),
            shipping_city: self.shipping.city.clone(),
            shipping_state: self.shipping.state.clone(),
            shipping_pincode: self.shipping.pincode.clone(),
            total_amount: self.total_amount.clone(),
            created_at: self.created_at,
            is_cancellable: true,
        }
    }

    pub fn to_item_entities(&self, order_id: i64) -> Vec<InsertOrderItemEntity> {
        self.items
            .iter()
            .map(|item| InsertOrderItemEntity {
                order_id,
                product_id: item.product_id,
                product_name: item.product_name.clone(),
                quantity: item.quantity,
                price: item.price.clone(),
            })
            .collect()
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct AdminOrderFilter {
    pub status: Option<OrderStatus>,
    pub search: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CheckoutRequest {
    pub shipping: ShippingAddress,
}

#[derive(Debug, Default, Deserialize)]
pub struct CancelOrderRequest {
    #[serde(default)]
    pub cancellation_reason: String,
}

#[derive(Debug, Deserialize)]
pub struct UpdateStatusRequest {
    pub status: String,
}

#[derive(Debug, Serialize, PartialEq)]
pub struct OrderSummaryDto {
    pub id: i64,
    pub order_number: String,
    pub status: OrderStatus,
    pub status_label: &'static str,
    pub total_amount: BigDecimal,
    pub created_at: DateTime<Utc>,
}

impl From<&OrderModel> for OrderSummaryDto {
    fn from(value: &OrderModel) -> Self {
        Self {
            id: value.id,
            order_number: value.order_number.clone(),
            status: value.status,
            status_label: value.status.label(),
            total_amount: value.total_amount.clone(),
            created_at: value.created_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct CancellationPreviewDto {
    pub order_id: i64,
    pub order_number: String,
    pub status: OrderStatus,
    pub can_be_cancelled: bool,
    pub cancellation_deadline: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
pub struct CancellationResultDto {
    pub order_id: i64,
    pub order_number: String,
    pub status: OrderStatus,
    pub cancelled_at: Option<DateTime<Utc>>,
    pub refund_initiated: bool,
    pub message: String,
}

#[derive(Debug, Serialize, PartialEq)]
pub struct SpendingSummaryDto {
    pub order_count: usize,
    pub total_spent: BigDecimal,
}
