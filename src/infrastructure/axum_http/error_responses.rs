use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

use crate::application::usecases::{
    admin::AdminError, checkout::CheckoutError, orders::OrderError, payments::PaymentError,
};

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub code: u16,
    pub message: String,
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden")]
    Forbidden,

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    Conflict(String),

    #[error("Internal server error")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    /// Use case errors pick their own status; the message is only shown for
    /// client errors.
    fn from_usecase(status: StatusCode, err: &dyn std::error::Error) -> Self {
        match status {
            StatusCode::NOT_FOUND => AppError::NotFound(err.to_string()),
            StatusCode::BAD_REQUEST => AppError::BadRequest(err.to_string()),
            StatusCode::CONFLICT => AppError::Conflict(err.to_string()),
            StatusCode::UNAUTHORIZED => AppError::Unauthorized(err.to_string()),
            StatusCode::FORBIDDEN => AppError::Forbidden,
            _ => AppError::Internal(anyhow::anyhow!(err.to_string())),
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::Forbidden => StatusCode::FORBIDDEN,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<CheckoutError> for AppError {
    fn from(err: CheckoutError) -> Self {
        AppError::from_usecase(err.status_code(), &err)
    }
}

impl From<OrderError> for AppError {
    fn from(err: OrderError) -> Self {
        AppError::from_usecase(err.status_code(), &err)
    }
}

impl From<PaymentError> for AppError {
    fn from(err: PaymentError) -> Self {
        AppError::from_usecase(err.status_code(), &err)
    }
}

impl From<AdminError> for AppError {
    fn from(err: AdminError) -> Self {
        AppError::from_usecase(err.status_code(), &err)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        // Internal detail never reaches the client; Display already hides it.
        let body = Json(ErrorResponse {
            code: status.as_u16(),
            message: self.to_string(),
        });

        (status, body).into_response()
    }
}
