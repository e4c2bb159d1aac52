use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Path, State},
    response::IntoResponse,
    routing::get,
};
use chrono::Utc;
use tracing::info;

use crate::{
    application::usecases::orders::OrderUseCase,
    domain::{repositories::orders::OrderRepository, value_objects::orders::CancelOrderRequest},
    infrastructure::{
        axum_http::{auth::AuthUser, error_responses::AppError},
        postgres::{postgres_connection::PgPoolSquad, repositories::orders::OrderPostgres},
    },
};

pub fn routes(db_pool: Arc<PgPoolSquad>) -> Router {
    let order_repository = OrderPostgres::new(Arc::clone(&db_pool));
    let order_usecase = OrderUseCase::new(Arc::new(order_repository));

    Router::new()
        .route("/", get(list_orders))
        .route("/summary", get(spending_summary))
        .route("/:order_id", get(order_detail))
        .route("/:order_id/cancel", get(cancellation_preview).post(cancel_order))
        .route("/:order_id/cancellation", get(cancellation_confirmation))
        .route("/:order_id/refund", get(refund_status))
        .with_state(Arc::new(order_usecase))
}

pub async fn list_orders<O>(
    State(order_usecase): State<Arc<OrderUseCase<O>>>,
    AuthUser { user_id, .. }: AuthUser,
) -> impl IntoResponse
where
    O: OrderRepository + Send + Sync + 'static,
{
    match order_usecase.list_orders(user_id).await {
        Ok(orders) => Json(orders).into_response(),
        Err(err) => AppError::from(err).into_response(),
    }
}

pub async fn spending_summary<O>(
    State(order_usecase): State<Arc<OrderUseCase<O>>>,
    AuthUser { user_id, .. }: AuthUser,
) -> impl IntoResponse
where
    O: OrderRepository + Send + Sync + 'static,
{
    match order_usecase.spending_summary(user_id).await {
        Ok(summary) => Json(summary).into_response(),
        Err(err) => AppError::from(err).into_response(),
    }
}

pub async fn order_detail<O>(
    State(order_usecase): State<Arc<OrderUseCase<O>>>,
    auth: AuthUser,
    Path(order_id): Path<i64>,
) -> impl IntoResponse
where
    O: OrderRepository + Send + Sync + 'static,
{
    match order_usecase
        .order_detail(auth.user_id, auth.is_staff(), order_id)
        .await
    {
        Ok(order) => Json(order).into_response(),
        Err(err) => AppError::from(err).into_response(),
    }
}

pub async fn cancellation_preview<O>(
    State(order_usecase): State<Arc<OrderUseCase<O>>>,
    AuthUser { user_id, .. }: AuthUser,
    Path(order_id): Path<i64>,
) -> impl IntoResponse
where
    O: OrderRepository + Send + Sync + 'static,
{
    match order_usecase
        .cancellation_preview(user_id, order_id, Utc::now())
        .await
    {
        Ok(preview) => Json(preview).into_response(),
        Err(err) => AppError::from(err).into_response(),
    }
}

/// The body is optional; a missing reason is stored as an empty string.
pub async fn cancel_order<O>(
    State(order_usecase): State<Arc<OrderUseCase<O>>>,
    AuthUser { user_id, .. }: AuthUser,
    Path(order_id): Path<i64>,
    request: Option<Json<CancelOrderRequest>>,
) -> impl IntoResponse
where
    O: OrderRepository + Send + Sync + 'static,
{
    info!(%user_id, order_id, "orders: cancel request received");
    let reason = request
        .map(|Json(request)| request.cancellation_reason)
        .unwrap_or_default();

    match order_usecase
        .cancel_order(user_id, order_id, &reason, Utc::now())
        .await
    {
        Ok(result) => Json(result).into_response(),
        Err(err) => AppError::from(err).into_response(),
    }
}

pub async fn cancellation_confirmation<O>(
    State(order_usecase): State<Arc<OrderUseCase<O>>>,
    AuthUser { user_id, .. }: AuthUser,
    Path(order_id): Path<i64>,
) -> impl IntoResponse
where
    O: OrderRepository + Send + Sync + 'static,
{
    match order_usecase
        .cancellation_confirmation(user_id, order_id)
        .await
    {
        Ok(order) => Json(order).into_response(),
        Err(err) => AppError::from(err).into_response(),
    }
}

pub async fn refund_status<O>(
    State(order_usecase): State<Arc<OrderUseCase<O>>>,
    AuthUser { user_id, .. }: AuthUser,
    Path(order_id): Path<i64>,
) -> impl IntoResponse
where
    O: OrderRepository + Send + Sync + 'static,
{
    match order_usecase.refund_status(user_id, order_id).await {
        Ok(refund) => Json(refund).into_response(),
        Err(err) => AppError::from(err).into_response(),
    }
}
