use std::sync::Arc;

use chrono::{DateTime, Utc};
use thiserror::Error;
use tracing::{error, info, warn};
use uuid::Uuid;

use super::lifecycle_status_code;
use crate::domain::{
    lifecycle::{
        LifecycleError, parse,
        settlement::{ensure_awaiting_payment, settle_payment},
    },
    repositories::{
        carts::CartRepository,
        orders::OrderRepository,
        payments::{PaymentAlreadyExists, PaymentRepository},
    },
    value_objects::{
        enums::payment_methods::PaymentMethod,
        orders::OrderModel,
        payments::{PaymentMethodOption, PaymentOptionsDto, PaymentReceiptDto},
    },
};

#[derive(Debug, Error)]
pub enum PaymentError {
    #[error("order not found")]
    OrderNotFound,
    #[error("order {0} has already been paid for")]
    AlreadyPaid(i64),
    #[error(transparent)]
    Lifecycle(#[from] LifecycleError),
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl PaymentError {
    pub fn status_code(&self) -> axum::http::StatusCode {
        use axum::http::StatusCode;
        match self {
            PaymentError::OrderNotFound => StatusCode::NOT_FOUND,
            PaymentError::AlreadyPaid(_) => StatusCode::CONFLICT,
            PaymentError::Lifecycle(err) => lifecycle_status_code(err),
            PaymentError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

pub type UseCaseResult<T> = std::result::Result<T, PaymentError>;

pub struct PaymentUseCase<O, P, C>
where
    O: OrderRepository + Send + Sync + 'static,
    P: PaymentRepository + Send + Sync + 'static,
    C: CartRepository + Send + Sync + 'static,
{
    order_repository: Arc<O>,
    payment_repository: Arc<P>,
    cart_repository: Arc<C>,
}

impl<O, P, C> PaymentUseCase<O, P, C>
where
    O: OrderRepository + Send + Sync + 'static,
    P: PaymentRepository + Send + Sync + 'static,
    C: CartRepository + Send + Sync + 'static,
{
    pub fn new(order_repository: Arc<O>, payment_repository: Arc<P>, cart_repository: Arc<C>) -> Self {
        Self {
            order_repository,
            payment_repository,
            cart_repository,
        }
    }

    pub async fn payment_options(
        &self,
        user_id: Uuid,
        order_id: i64,
    ) -> UseCaseResult<PaymentOptionsDto> {
        let order = self.owned_order(user_id, order_id).await?;
        ensure_awaiting_payment(&order).inspect_err(|_| {
            warn!(%user_id, order_id, status = %order.status, "payments: order not eligible for payment")
        })?;

        Ok(PaymentOptionsDto {
            order_id: order.id,
            order_number: order.order_number,
            total_amount: order.total_amount,
            methods: PaymentMethod::ALL
                .into_iter()
                .map(|method| PaymentMethodOption {
                    code: method,
                    label: method.label(),
                })
                .collect(),
        })
    }

    /// Takes payment through the simulated gateway, records it together with
    /// the order's new status, then empties the user's cart.
    pub async fn process_payment(
        &self,
        user_id: Uuid,
        order_id: i64,
        raw_method: &str,
        now: DateTime<Utc>,
    ) -> UseCaseResult<PaymentReceiptDto> {
        info!(%user_id, order_id, payment_method = raw_method, "payments: processing payment");
        let method = parse::payment_method(raw_method)?;
        let order = self.owned_order(user_id, order_id).await?;

        let settlement = settle_payment(&order, method, now).inspect_err(|_| {
            warn!(%user_id, order_id, status = %order.status, "payments: order not eligible for payment")
        })?;

        self.payment_repository
            .record_payment(settlement.payment.clone(), settlement.order_status)
            .await
            .map_err(|err| {
                if err.downcast_ref::<PaymentAlreadyExists>().is_some() {
                    warn!(%user_id, order_id, "payments: payment already recorded");
                    PaymentError::AlreadyPaid(order_id)
                } else {
                    error!(%user_id, order_id, db_error = ?err, "payments: failed to record payment");
                    PaymentError::Internal(err)
                }
            })?;

        if let Err(err) = self.cart_repository.clear_cart(user_id).await {
            warn!(%user_id, db_error = ?err, "payments: failed to clear cart after payment");
        }

        let message = match &settlement.payment.transaction_id {
            Some(transaction_id) => format!("Payment successful! Transaction ID: {transaction_id}"),
            None => format!(
                "Order confirmed! You will pay ₹{} on delivery.",
                order.total_amount
            ),
        };
        info!(
            %user_id,
            order_id,
            payment_method = %method,
            order_status = %settlement.order_status,
            "payments: payment recorded"
        );

        Ok(PaymentReceiptDto {
            order_id: order.id,
            order_number: order.order_number,
            payment_method: method,
            payment_status: settlement.payment.payment_status,
            amount: settlement.payment.amount,
            transaction_id: settlement.payment.transaction_id,
            message,
        })
    }

    async fn owned_order(&self, user_id: Uuid, order_id: i64) -> UseCaseResult<OrderModel> {
        let order = self
            .order_repository
            .find_order(order_id)
            .await
            .map_err(|err| {
                error!(order_id, db_error = ?err, "payments: failed to load order");
                PaymentError::Internal(err)
            })?;

        match order {
            Some(order) if order.user_id == user_id => Ok(order),
            _ => Err(PaymentError::OrderNotFound),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{
        repositories::{
            carts::MockCartRepository, orders::MockOrderRepository,
            payments::MockPaymentRepository,
        },
        value_objects::{
            enums::{order_statuses::OrderStatus, payment_statuses::PaymentStatus},
            orders::ShippingAddress,
        },
    };
    use bigdecimal::BigDecimal;
    use chrono::TimeZone;
    use mockall::predicate::eq;
    use std::str::FromStr;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 8, 20, 15, 0, 0).unwrap()
    }

    fn awaiting_order(user_id: Uuid) -> OrderModel {
        OrderModel {
            id: 31,
            user_id,
            order_number: "DD31313131".to_string(),
            status: OrderStatus::PaymentPending,
            shipping: ShippingAddress::default(),
            total_amount: BigDecimal::from_str("850.00").unwrap(),
            created_at: now(),
            cancelled_at: None,
            cancellation_reason: None,
            is_cancellable: true,
            items: vec![],
            payment: None,
        }
    }

    fn order_repo_with(order: OrderModel) -> MockOrderRepository {
        let mut order_repo = MockOrderRepository::new();
        order_repo.expect_find_order().returning(move |_| {
            let order = order.clone();
            Box::pin(async move { Ok(Some(order)) })
        });
        order_repo
    }

    #[tokio::test]
    async fn cod_confirms_order_and_clears_cart() {
        let user_id = Uuid::new_v4();
        let order_repo = order_repo_with(awaiting_order(user_id));
        let mut payment_repo = MockPaymentRepository::new();
        let mut cart_repo = MockCartRepository::new();

        payment_repo
            .expect_record_payment()
            .withf(|payment, order_status| {
                payment.payment_method == PaymentMethod::Cod
                    && payment.transaction_id.is_none()
                    && *order_status == OrderStatus::Confirmed
            })
            .times(1)
            .returning(|_, _| Box::pin(async { Ok(1) }));
        cart_repo
            .expect_clear_cart()
            .with(eq(user_id))
            .times(1)
            .returning(|_| Box::pin(async { Ok(()) }));

        let usecase = PaymentUseCase::new(
            Arc::new(order_repo),
            Arc::new(payment_repo),
            Arc::new(cart_repo),
        );
        let receipt = usecase.process_payment(user_id, 31, "COD", now()).await.unwrap();

        assert_eq!(receipt.payment_status, PaymentStatus::Success);
        assert_eq!(receipt.message, "Order confirmed! You will pay ₹850.00 on delivery.");
    }

    #[tokio::test]
    async fn upi_marks_order_paid_with_transaction_id() {
        let user_id = Uuid::new_v4();
        let order_repo = order_repo_with(awaiting_order(user_id));
        let mut payment_repo = MockPaymentRepository::new();
        let mut cart_repo = MockCartRepository::new();

        payment_repo
            .expect_record_payment()
            .withf(|payment, order_status| {
                payment.transaction_id.is_some() && *order_status == OrderStatus::Paid
            })
            .times(1)
            .returning(|_, _| Box::pin(async { Ok(2) }));
        cart_repo
            .expect_clear_cart()
            .returning(|_| Box::pin(async { Ok(()) }));

        let usecase = PaymentUseCase::new(
            Arc::new(order_repo),
            Arc::new(payment_repo),
            Arc::new(cart_repo),
        );
        let receipt = usecase.process_payment(user_id, 31, "UPI", now()).await.unwrap();

        let transaction_id = receipt.transaction_id.unwrap();
        assert!(transaction_id.starts_with("TXN"));
        assert_eq!(
            receipt.message,
            format!("Payment successful! Transaction ID: {transaction_id}")
        );
    }

    #[tokio::test]
    async fn cart_clear_failure_keeps_the_payment() {
        let user_id = Uuid::new_v4();
        let mut payment_repo = MockPaymentRepository::new();
        let mut cart_repo = MockCartRepository::new();

        payment_repo
            .expect_record_payment()
            .times(1)
            .returning(|_, _| Box::pin(async { Ok(3) }));
        cart_repo
            .expect_clear_cart()
            .times(1)
            .returning(|_| Box::pin(async { Err(anyhow::anyhow!("connection reset")) }));

        let usecase = PaymentUseCase::new(
            Arc::new(order_repo_with(awaiting_order(user_id))),
            Arc::new(payment_repo),
            Arc::new(cart_repo),
        );
        let receipt = usecase.process_payment(user_id, 31, "CARD", now()).await.unwrap();

        assert_eq!(receipt.payment_status, PaymentStatus::Success);
        assert!(receipt.transaction_id.is_some());
    }

    #[tokio::test]
    async fn unknown_method_is_rejected_without_lookup() {
        let mut order_repo = MockOrderRepository::new();
        order_repo.expect_find_order().never();
        let mut payment_repo = MockPaymentRepository::new();
        payment_repo.expect_record_payment().never();

        let usecase = PaymentUseCase::new(
            Arc::new(order_repo),
            Arc::new(payment_repo),
            Arc::new(MockCartRepository::new()),
        );
        let err = usecase
            .process_payment(Uuid::new_v4(), 31, "PAYPAL", now())
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            PaymentError::Lifecycle(LifecycleError::InvalidEnumValue { .. })
        ));
    }

    #[tokio::test]
    async fn paid_order_offers_no_payment_options() {
        let user_id = Uuid::new_v4();
        let mut order = awaiting_order(user_id);
        order.status = OrderStatus::Paid;

        let usecase = PaymentUseCase::new(
            Arc::new(order_repo_with(order)),
            Arc::new(MockPaymentRepository::new()),
            Arc::new(MockCartRepository::new()),
        );
        let err = usecase.payment_options(user_id, 31).await.unwrap_err();

        assert!(matches!(err, PaymentError::Lifecycle(LifecycleError::NotEligible(_))));
    }

    #[tokio::test]
    async fn options_list_every_method() {
        let user_id = Uuid::new_v4();
        let usecase = PaymentUseCase::new(
            Arc::new(order_repo_with(awaiting_order(user_id))),
            Arc::new(MockPaymentRepository::new()),
            Arc::new(MockCartRepository::new()),
        );
        let options = usecase.payment_options(user_id, 31).await.unwrap();

        assert_eq!(options.methods.len(), 4);
        assert_eq!(options.methods[0].code, PaymentMethod::Cod);
    }

    #[tokio::test]
    async fn duplicate_payment_maps_to_conflict() {
        let user_id = Uuid::new_v4();
        let mut payment_repo = MockPaymentRepository::new();
        payment_repo
            .expect_record_payment()
            .returning(|_, _| Box::pin(async { Err(anyhow::Error::new(PaymentAlreadyExists(31))) }));
        let mut cart_repo = MockCartRepository::new();
        cart_repo.expect_clear_cart().never();

        let usecase = PaymentUseCase::new(
            Arc::new(order_repo_with(awaiting_order(user_id))),
            Arc::new(payment_repo),
            Arc::new(cart_repo),
        );
        let err = usecase
            .process_payment(user_id, 31, "CARD", now())
            .await
            .unwrap_err();

        assert!(matches!(err, PaymentError::AlreadyPaid(31)));
        assert_eq!(err.status_code(), axum::http::StatusCode::CONFLICT);
    }
}
