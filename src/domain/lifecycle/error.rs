use thiserror::Error;

/// Rejections produced by the order/payment rules. None of them mutate state.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LifecycleError {
    #[error("invalid {field}: {value:?} is not a recognised value")]
    InvalidEnumValue { field: &'static str, value: String },
    #[error("not eligible: {0}")]
    NotEligible(String),
    #[error("no action taken: {0}")]
    AlreadyInTargetSubstate(String),
    #[error("cart is empty")]
    EmptyCart,
    #[error("quantity must be positive for product {product_id}")]
    InvalidQuantity { product_id: i64 },
}

impl LifecycleError {
    pub fn invalid(field: &'static str, value: impl Into<String>) -> Self {
        LifecycleError::InvalidEnumValue {
            field,
            value: value.into(),
        }
    }
}
