use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    response::IntoResponse,
    routing::{get, post},
};
use chrono::Utc;
use tracing::info;

use crate::{
    application::usecases::admin::AdminUseCase,
    domain::{
        repositories::{
            admin_dashboard::AdminDashboardRepository, orders::OrderRepository,
            payments::PaymentRepository,
        },
        value_objects::{
            admin::{AdminOrdersQuery, AdminPaymentsQuery},
            orders::UpdateStatusRequest,
        },
    },
    infrastructure::{
        axum_http::{auth::AdminUser, error_responses::AppError},
        postgres::{
            postgres_connection::PgPoolSquad,
            repositories::{
                admin_dashboard::AdminDashboardPostgres, orders::OrderPostgres,
                payments::PaymentPostgres,
            },
        },
    },
};

pub fn routes(db_pool: Arc<PgPoolSquad>) -> Router {
    let admin_usecase = AdminUseCase::new(
        Arc::new(OrderPostgres::new(Arc::clone(&db_pool))),
        Arc::new(PaymentPostgres::new(Arc::clone(&db_pool))),
        Arc::new(AdminDashboardPostgres::new(Arc::clone(&db_pool))),
    );

    Router::new()
        .route("/dashboard", get(dashboard))
        .route("/orders", get(list_orders))
        .route("/orders/:order_id/status", post(update_order_status))
        .route("/payments", get(list_payments))
        .route("/payments/:payment_id/status", post(update_payment_status))
        .with_state(Arc::new(admin_usecase))
}

pub async fn dashboard<O, P, D>(
    State(admin_usecase): State<Arc<AdminUseCase<O, P, D>>>,
    AdminUser(admin): AdminUser,
) -> impl IntoResponse
where
    O: OrderRepository + Send + Sync + 'static,
    P: PaymentRepository + Send + Sync + 'static,
    D: AdminDashboardRepository + Send + Sync + 'static,
{
    info!(user_id = %admin.user_id, "admin: dashboard requested");
    match admin_usecase.dashboard(Utc::now()).await {
        Ok(dashboard) => Json(dashboard).into_response(),
        Err(err) => AppError::from(err).into_response(),
    }
}

pub async fn list_orders<O, P, D>(
    State(admin_usecase): State<Arc<AdminUseCase<O, P, D>>>,
    _admin: AdminUser,
    Query(query): Query<AdminOrdersQuery>,
) -> impl IntoResponse
where
    O: OrderRepository + Send + Sync + 'static,
    P: PaymentRepository + Send + Sync + 'static,
    D: AdminDashboardRepository + Send + Sync + 'static,
{
    match admin_usecase.list_orders(query).await {
        Ok(orders) => Json(orders).into_response(),
        Err(err) => AppError::from(err).into_response(),
    }
}

pub async fn list_payments<O, P, D>(
    State(admin_usecase): State<Arc<AdminUseCase<O, P, D>>>,
    _admin: AdminUser,
    Query(query): Query<AdminPaymentsQuery>,
) -> impl IntoResponse
where
    O: OrderRepository + Send + Sync + 'static,
    P: PaymentRepository + Send + Sync + 'static,
    D: AdminDashboardRepository + Send + Sync + 'static,
{
    match admin_usecase.list_payments(query).await {
        Ok(payments) => Json(payments).into_response(),
        Err(err) => AppError::from(err).into_response(),
    }
}

pub async fn update_order_status<O, P, D>(
    State(admin_usecase): State<Arc<AdminUseCase<O, P, D>>>,
    AdminUser(admin): AdminUser,
    Path(order_id): Path<i64>,
    Json(request): Json<UpdateStatusRequest>,
) -> impl IntoResponse
where
    O: OrderRepository + Send + Sync + 'static,
    P: PaymentRepository + Send + Sync + 'static,
    D: AdminDashboardRepository + Send + Sync + 'static,
{
    info!(user_id = %admin.user_id, order_id, "admin: order status update requested");
    match admin_usecase
        .update_order_status(order_id, &request.status)
        .await
    {
        Ok(updated) => Json(updated).into_response(),
        Err(err) => AppError::from(err).into_response(),
    }
}

pub async fn update_payment_status<O, P, D>(
    State(admin_usecase): State<Arc<AdminUseCase<O, P, D>>>,
    AdminUser(admin): AdminUser,
    Path(payment_id): Path<i64>,
    Json(request): Json<UpdateStatusRequest>,
) -> impl IntoResponse
where
    O: OrderRepository + Send + Sync + 'static,
    P: PaymentRepository + Send + Sync + 'static,
    D: AdminDashboardRepository + Send + Sync + 'static,
{
    info!(user_id = %admin.user_id, payment_id, "admin: payment status update requested");
    match admin_usecase
        .update_payment_status(payment_id, &request.status, Utc::now())
        .await
    {
        Ok(updated) => Json(updated).into_response(),
        Err(err) => AppError::from(err).into_response(),
    }
}
