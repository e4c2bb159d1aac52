use std::sync::Arc;

use chrono::{DateTime, Utc};
use thiserror::Error;
use tracing::{error, info, warn};

use super::lifecycle_status_code;
use crate::domain::{
    lifecycle::{
        LifecycleError, parse,
        status_updates::{update_order_status, update_payment_status},
    },
    repositories::{
        admin_dashboard::AdminDashboardRepository, orders::OrderRepository,
        payments::PaymentRepository,
    },
    value_objects::{
        admin::{
            AdminOrdersQuery, AdminPaymentsQuery, DashboardDto, RECENT_ORDER_DAYS,
            RECENT_ORDER_LIMIT, REVENUE_WINDOW_DAYS, StatusCount, StatusUpdatedDto,
            TOP_PRODUCT_LIMIT, window_start,
        },
        enums::order_statuses::OrderStatus,
        orders::{AdminOrderFilter, OrderSummaryDto},
        payments::{AdminPaymentFilter, PaymentModel},
    },
};

#[derive(Debug, Error)]
pub enum AdminError {
    #[error("order not found")]
    OrderNotFound,
    #[error("payment not found")]
    PaymentNotFound,
    #[error(transparent)]
    Lifecycle(#[from] LifecycleError),
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl AdminError {
    pub fn status_code(&self) -> axum::http::StatusCode {
        use axum::http::StatusCode;
        match self {
            AdminError::OrderNotFound | AdminError::PaymentNotFound => StatusCode::NOT_FOUND,
            AdminError::Lifecycle(err) => lifecycle_status_code(err),
            AdminError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

pub type UseCaseResult<T> = std::result::Result<T, AdminError>;

pub struct AdminUseCase<O, P, D>
where
    O: OrderRepository + Send + Sync + 'static,
    P: PaymentRepository + Send + Sync + 'static,
    D: AdminDashboardRepository + Send + Sync + 'static,
{
    order_repository: Arc<O>,
    payment_repository: Arc<P>,
    dashboard_repository: Arc<D>,
}

fn internal(context: &'static str) -> impl Fn(anyhow::Error) -> AdminError {
    move |err| {
        error!(db_error = ?err, "admin: failed to {context}");
        AdminError::Internal(err)
    }
}

impl<O, P, D> AdminUseCase<O, P, D>
where
    O: OrderRepository + Send + Sync + 'static,
    P: PaymentRepository + Send + Sync + 'static,
    D: AdminDashboardRepository + Send + Sync + 'static,
{
    pub fn new(order_repository: Arc<O>, payment_repository: Arc<P>, dashboard_repository: Arc<D>) -> Self {
        Self {
            order_repository,
            payment_repository,
            dashboard_repository,
        }
    }

    pub async fn dashboard(&self, now: DateTime<Utc>) -> UseCaseResult<DashboardDto> {
        info!("admin: building dashboard");
        let repo = &self.dashboard_repository;

        let counted = repo
            .count_orders_by_status()
            .await
            .map_err(internal("count orders by status"))?;
        // Statuses without orders are reported as zero.
        let orders_by_status: Vec<StatusCount> = OrderStatus::ALL
            .into_iter()
            .map(|status| StatusCount {
                status,
                count: counted
                    .iter()
                    .filter(|c| c.status == status)
                    .map(|c| c.count)
                    .sum(),
            })
            .collect();
        let total_orders: i64 = orders_by_status.iter().map(|c| c.count).sum();

        let recent_orders_count = repo
            .count_orders_since(window_start(now, RECENT_ORDER_DAYS))
            .await
            .map_err(internal("count recent orders"))?;
        let total_revenue = repo
            .revenue_since(None)
            .await
            .map_err(internal("sum total revenue"))?;
        let monthly_revenue = repo
            .revenue_since(Some(window_start(now, REVENUE_WINDOW_DAYS)))
            .await
            .map_err(internal("sum monthly revenue"))?;
        let payment_methods = repo
            .count_payments_by_method()
            .await
            .map_err(internal("count payments by method"))?;
        let pending_refunds = repo
            .count_pending_refunds()
            .await
            .map_err(internal("count pending refunds"))?;
        let recent_orders = repo
            .recent_orders(RECENT_ORDER_LIMIT)
            .await
            .map_err(internal("load recent orders"))?;
        let top_products = repo
            .top_products(TOP_PRODUCT_LIMIT)
            .await
            .map_err(internal("load top products"))?;

        info!(total_orders, pending_refunds, "admin: dashboard ready");
        Ok(DashboardDto {
            total_orders,
            orders_by_status,
            recent_orders_count,
            total_revenue,
            monthly_revenue,
            payment_methods,
            pending_refunds,
            recent_orders: recent_orders.iter().map(OrderSummaryDto::from).collect(),
            top_products,
        })
    }

    pub async fn list_orders(&self, query: AdminOrdersQuery) -> UseCaseResult<Vec<OrderSummaryDto>> {
        let filter = AdminOrderFilter {
            status: parse::optional(query.status.as_deref(), parse::order_status)?,
            search: query
                .search
                .map(|search| search.trim().to_string())
                .filter(|search| !search.is_empty()),
        };
        info!(status = ?filter.status, search = ?filter.search, "admin: listing orders");

        let orders = self
            .order_repository
            .list_orders(filter)
            .await
            .map_err(internal("list orders"))?;
        Ok(orders.iter().map(OrderSummaryDto::from).collect())
    }

    pub async fn list_payments(&self, query: AdminPaymentsQuery) -> UseCaseResult<Vec<PaymentModel>> {
        let filter = AdminPaymentFilter {
            method: parse::optional(query.method.as_deref(), parse::payment_method)?,
            status: parse::optional(query.status.as_deref(), parse::payment_status)?,
            refund: parse::optional(query.refund.as_deref(), parse::refund_status)?,
        };
        info!(
            method = ?filter.method,
            status = ?filter.status,
            refund = ?filter.refund,
            "admin: listing payments"
        );

        let payments = self
            .payment_repository
            .list_payments(filter)
            .await
            .map_err(internal("list payments"))?;
        Ok(payments)
    }

    pub async fn update_order_status(
        &self,
        order_id: i64,
        raw_status: &str,
    ) -> UseCaseResult<StatusUpdatedDto> {
        let order = self
            .order_repository
            .find_order(order_id)
            .await
            .map_err(internal("load order"))?
            .ok_or(AdminError::OrderNotFound)?;

        let updated = update_order_status(&order, raw_status).inspect_err(|err| {
            warn!(order_id, reason = %err, "admin: invalid order status submitted")
        })?;

        self.order_repository
            .update_status(order_id, updated.status)
            .await
            .map_err(internal("update order status"))?;

        info!(order_id, from = %order.status, to = %updated.status, "admin: order status updated");
        Ok(StatusUpdatedDto {
            id: order_id,
            status: updated.status.to_string(),
            message: format!(
                "Order {} status updated to {}",
                updated.order_number, updated.status
            ),
        })
    }

    pub async fn update_payment_status(
        &self,
        payment_id: i64,
        raw_status: &str,
        now: DateTime<Utc>,
    ) -> UseCaseResult<StatusUpdatedDto> {
        let payment = self
            .payment_repository
            .find_payment(payment_id)
            .await
            .map_err(internal("load payment"))?
            .ok_or(AdminError::PaymentNotFound)?;

        let updated = update_payment_status(&payment, raw_status, now).inspect_err(|err| {
            warn!(payment_id, reason = %err, "admin: invalid payment status submitted")
        })?;

        self.payment_repository
            .update_payment(payment_id, updated.to_update_entity())
            .await
            .map_err(internal("update payment status"))?;

        info!(
            payment_id,
            from = %payment.payment_status,
            to = %updated.payment_status,
            "admin: payment status updated"
        );
        Ok(StatusUpdatedDto {
            id: payment_id,
            status: updated.payment_status.to_string(),
            message: format!("Payment status updated to {}", updated.payment_status),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{
        repositories::{
            admin_dashboard::MockAdminDashboardRepository, orders::MockOrderRepository,
            payments::MockPaymentRepository,
        },
        value_objects::{
            admin::{PaymentMethodCounts, TopProduct},
            enums::{
                payment_methods::PaymentMethod, payment_statuses::PaymentStatus,
                refund_statuses::RefundStatus,
            },
            orders::{OrderModel, ShippingAddress},
        },
    };
    use bigdecimal::BigDecimal;
    use chrono::TimeZone;
    use mockall::predicate::eq;
    use std::str::FromStr;
    use uuid::Uuid;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 9, 30, 18, 0, 0).unwrap()
    }

    fn pending_payment() -> PaymentModel {
        PaymentModel {
            id: 9,
            order_id: 4,
            payment_method: PaymentMethod::NetBanking,
            payment_status: PaymentStatus::Pending,
            amount: BigDecimal::from_str("2400.00").unwrap(),
            transaction_id: None,
            payment_date: None,
            created_at: now(),
            refund_status: RefundStatus::NotRequired,
            refund_amount: None,
            refund_transaction_id: None,
            refund_initiated_at: None,
            refund_completed_at: None,
            refund_expected_date: None,
        }
    }

    fn usecase(
        order_repo: MockOrderRepository,
        payment_repo: MockPaymentRepository,
        dashboard_repo: MockAdminDashboardRepository,
    ) -> AdminUseCase<MockOrderRepository, MockPaymentRepository, MockAdminDashboardRepository> {
        AdminUseCase::new(
            Arc::new(order_repo),
            Arc::new(payment_repo),
            Arc::new(dashboard_repo),
        )
    }

    #[tokio::test]
    async fn bogus_payment_status_changes_nothing() {
        let mut payment_repo = MockPaymentRepository::new();
        payment_repo
            .expect_find_payment()
            .with(eq(9))
            .returning(|_| Box::pin(async { Ok(Some(pending_payment())) }));
        payment_repo.expect_update_payment().never();

        let err = usecase(
            MockOrderRepository::new(),
            payment_repo,
            MockAdminDashboardRepository::new(),
        )
        .update_payment_status(9, "Bogus", now())
        .await
        .unwrap_err();

        assert!(matches!(
            err,
            AdminError::Lifecycle(LifecycleError::InvalidEnumValue { .. })
        ));
        assert_eq!(err.status_code(), axum::http::StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn success_stamps_payment_date() {
        let mut payment_repo = MockPaymentRepository::new();
        payment_repo
            .expect_find_payment()
            .returning(|_| Box::pin(async { Ok(Some(pending_payment())) }));
        payment_repo
            .expect_update_payment()
            .withf(|payment_id, update| {
                *payment_id == 9
                    && update.payment_status == "Success"
                    && update.payment_date == Some(now())
            })
            .times(1)
            .returning(|_, _| Box::pin(async { Ok(()) }));

        let updated = usecase(
            MockOrderRepository::new(),
            payment_repo,
            MockAdminDashboardRepository::new(),
        )
        .update_payment_status(9, "Success", now())
        .await
        .unwrap();

        assert_eq!(updated.message, "Payment status updated to Success");
    }

    fn shipped_order() -> OrderModel {
        OrderModel {
            id: 4,
            user_id: Uuid::nil(),
            order_number: "DD44444444".to_string(),
            status: OrderStatus::Shipped,
            shipping: ShippingAddress::default(),
            total_amount: BigDecimal::from_str("2400.00").unwrap(),
            created_at: now(),
            cancelled_at: None,
            cancellation_reason: None,
            is_cancellable: true,
            items: vec![],
            payment: None,
        }
    }

    #[tokio::test]
    async fn bogus_order_status_changes_nothing() {
        let mut order_repo = MockOrderRepository::new();
        order_repo
            .expect_find_order()
            .with(eq(4))
            .returning(|_| Box::pin(async { Ok(Some(shipped_order())) }));
        order_repo.expect_update_status().never();

        let usecase = usecase(
            order_repo,
            MockPaymentRepository::new(),
            MockAdminDashboardRepository::new(),
        );
        for raw in ["Lost", " Delivered", "delivered"] {
            let err = usecase.update_order_status(4, raw).await.unwrap_err();
            assert!(matches!(
                err,
                AdminError::Lifecycle(LifecycleError::InvalidEnumValue { .. })
            ));
        }
    }

    #[tokio::test]
    async fn missing_order_is_not_found() {
        let mut order_repo = MockOrderRepository::new();
        order_repo
            .expect_find_order()
            .returning(|_| Box::pin(async { Ok(None) }));
        order_repo.expect_update_status().never();

        let err = usecase(
            order_repo,
            MockPaymentRepository::new(),
            MockAdminDashboardRepository::new(),
        )
        .update_order_status(404, "Shipped")
        .await
        .unwrap_err();

        assert!(matches!(err, AdminError::OrderNotFound));
    }

    #[tokio::test]
    async fn unknown_filter_value_is_rejected() {
        let mut order_repo = MockOrderRepository::new();
        order_repo.expect_list_orders().never();

        let err = usecase(
            order_repo,
            MockPaymentRepository::new(),
            MockAdminDashboardRepository::new(),
        )
        .list_orders(AdminOrdersQuery {
            status: Some("Lost".to_string()),
            search: None,
        })
        .await
        .unwrap_err();

        assert!(matches!(err, AdminError::Lifecycle(_)));
    }

    #[tokio::test]
    async fn empty_filters_mean_everything() {
        let mut payment_repo = MockPaymentRepository::new();
        payment_repo
            .expect_list_payments()
            .with(eq(AdminPaymentFilter::default()))
            .times(1)
            .returning(|_| Box::pin(async { Ok(vec![pending_payment()]) }));

        let payments = usecase(
            MockOrderRepository::new(),
            payment_repo,
            MockAdminDashboardRepository::new(),
        )
        .list_payments(AdminPaymentsQuery {
            method: Some(String::new()),
            status: None,
            refund: Some(String::new()),
        })
        .await
        .unwrap();

        assert_eq!(payments.len(), 1);
    }

    #[tokio::test]
    async fn dashboard_fills_missing_statuses_with_zero() {
        let mut dashboard_repo = MockAdminDashboardRepository::new();
        dashboard_repo.expect_count_orders_by_status().returning(|| {
            Box::pin(async {
                Ok(vec![
                    StatusCount {
                        status: OrderStatus::Delivered,
                        count: 3,
                    },
                    StatusCount {
                        status: OrderStatus::Cancelled,
                        count: 1,
                    },
                ])
            })
        });
        dashboard_repo
            .expect_count_orders_since()
            .with(eq(Utc.with_ymd_and_hms(2025, 9, 23, 0, 0, 0).unwrap()))
            .returning(|_| Box::pin(async { Ok(2) }));
        dashboard_repo
            .expect_revenue_since()
            .with(eq(None))
            .returning(|_| Box::pin(async { Ok(BigDecimal::from_str("4200.00").unwrap()) }));
        dashboard_repo
            .expect_revenue_since()
            .with(eq(Some(Utc.with_ymd_and_hms(2025, 8, 31, 0, 0, 0).unwrap())))
            .returning(|_| Box::pin(async { Ok(BigDecimal::from_str("1500.00").unwrap()) }));
        dashboard_repo.expect_count_payments_by_method().returning(|| {
            Box::pin(async { Ok(PaymentMethodCounts { cod: 1, online: 3 }) })
        });
        dashboard_repo
            .expect_count_pending_refunds()
            .returning(|| Box::pin(async { Ok(1) }));
        dashboard_repo
            .expect_recent_orders()
            .with(eq(10))
            .returning(|_| Box::pin(async { Ok(vec![]) }));
        dashboard_repo
            .expect_top_products()
            .with(eq(5))
            .returning(|_| {
                Box::pin(async {
                    Ok(vec![TopProduct {
                        product_id: 1,
                        product_name: "Argan Oil Serum".to_string(),
                        quantity_sold: 12,
                    }])
                })
            });

        let dashboard = usecase(
            MockOrderRepository::new(),
            MockPaymentRepository::new(),
            dashboard_repo,
        )
        .dashboard(now())
        .await
        .unwrap();

        assert_eq!(dashboard.total_orders, 4);
        assert_eq!(dashboard.orders_by_status.len(), OrderStatus::ALL.len());
        let shipped = dashboard
            .orders_by_status
            .iter()
            .find(|c| c.status == OrderStatus::Shipped)
            .unwrap();
        assert_eq!(shipped.count, 0);
        assert_eq!(dashboard.total_revenue, BigDecimal::from_str("4200.00").unwrap());
        assert_eq!(dashboard.monthly_revenue, BigDecimal::from_str("1500.00").unwrap());
        assert_eq!(dashboard.top_products.len(), 1);
    }
}
