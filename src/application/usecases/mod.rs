pub mod admin;
pub mod checkout;
pub mod orders;
pub mod payments;

use axum::http::StatusCode;

use crate::domain::lifecycle::LifecycleError;

/// Rejections from the lifecycle rules are the caller's fault, never the
/// server's.
pub(crate) fn lifecycle_status_code(err: &LifecycleError) -> StatusCode {
    match err {
        LifecycleError::InvalidEnumValue { .. }
        | LifecycleError::EmptyCart
        | LifecycleError::InvalidQuantity { .. } => StatusCode::BAD_REQUEST,
        LifecycleError::NotEligible(_) | LifecycleError::AlreadyInTargetSubstate(_) => {
            StatusCode::CONFLICT
        }
    }
}
