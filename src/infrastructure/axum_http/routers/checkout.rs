use std::sync::Arc;

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::post,
};
use chrono::Utc;
use tracing::info;

use crate::{
    application::usecases::checkout::CheckoutUseCase,
    domain::{
        repositories::{carts::CartRepository, orders::OrderRepository},
        value_objects::orders::CheckoutRequest,
    },
    infrastructure::{
        axum_http::{auth::AuthUser, error_responses::AppError},
        postgres::{
            postgres_connection::PgPoolSquad,
            repositories::{carts::CartPostgres, orders::OrderPostgres},
        },
    },
};

pub fn routes(db_pool: Arc<PgPoolSquad>) -> Router {
    let order_repository = OrderPostgres::new(Arc::clone(&db_pool));
    let cart_repository = CartPostgres::new(Arc::clone(&db_pool));
    let checkout_usecase =
        CheckoutUseCase::new(Arc::new(order_repository), Arc::new(cart_repository));

    Router::new()
        .route("/", post(place_order))
        .with_state(Arc::new(checkout_usecase))
}

pub async fn place_order<O, C>(
    State(checkout_usecase): State<Arc<CheckoutUseCase<O, C>>>,
    AuthUser { user_id, .. }: AuthUser,
    Json(request): Json<CheckoutRequest>,
) -> impl IntoResponse
where
    O: OrderRepository + Send + Sync + 'static,
    C: CartRepository + Send + Sync + 'static,
{
    info!(%user_id, "checkout: request received");
    match checkout_usecase
        .place_order(user_id, request.shipping, Utc::now())
        .await
    {
        Ok(order) => (StatusCode::CREATED, Json(order)).into_response(),
        Err(err) => AppError::from(err).into_response(),
    }
}
