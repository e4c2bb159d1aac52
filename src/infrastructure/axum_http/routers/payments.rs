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
    application::usecases::payments::PaymentUseCase,
    domain::{
        repositories::{
            carts::CartRepository, orders::OrderRepository, payments::PaymentRepository,
        },
        value_objects::payments::ProcessPaymentRequest,
    },
    infrastructure::{
        axum_http::{auth::AuthUser, error_responses::AppError},
        postgres::{
            postgres_connection::PgPoolSquad,
            repositories::{carts::CartPostgres, orders::OrderPostgres, payments::PaymentPostgres},
        },
    },
};

pub fn routes(db_pool: Arc<PgPoolSquad>) -> Router {
    let order_repository = OrderPostgres::new(Arc::clone(&db_pool));
    let payment_repository = PaymentPostgres::new(Arc::clone(&db_pool));
    let cart_repository = CartPostgres::new(Arc::clone(&db_pool));
    let payment_usecase = PaymentUseCase::new(
        Arc::new(order_repository),
        Arc::new(payment_repository),
        Arc::new(cart_repository),
    );

    Router::new()
        .route("/:order_id", get(payment_options).post(process_payment))
        .with_state(Arc::new(payment_usecase))
}

pub async fn payment_options<O, P, C>(
    State(payment_usecase): State<Arc<PaymentUseCase<O, P, C>>>,
    AuthUser { user_id, .. }: AuthUser,
    Path(order_id): Path<i64>,
) -> impl IntoResponse
where
    O: OrderRepository + Send + Sync + 'static,
    P: PaymentRepository + Send + Sync + 'static,
    C: CartRepository + Send + Sync + 'static,
{
    match payment_usecase.payment_options(user_id, order_id).await {
        Ok(options) => Json(options).into_response(),
        Err(err) => AppError::from(err).into_response(),
    }
}

pub async fn process_payment<O, P, C>(
    State(payment_usecase): State<Arc<PaymentUseCase<O, P, C>>>,
    AuthUser { user_id, .. }: AuthUser,
    Path(order_id): Path<i64>,
    Json(request): Json<ProcessPaymentRequest>,
) -> impl IntoResponse
where
    O: OrderRepository + Send + Sync + 'static,
    P: PaymentRepository + Send + Sync + 'static,
    C: CartRepository + Send + Sync + 'static,
{
    info!(%user_id, order_id, "payments: request received");
    match payment_usecase
        .process_payment(user_id, order_id, &request.payment_method, Utc::now())
        .await
    {
        Ok(receipt) => Json(receipt).into_response(),
        Err(err) => AppError::from(err).into_response(),
    }
}
