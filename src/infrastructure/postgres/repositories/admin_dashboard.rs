use anyhow::Result;
use async_trait::async_trait;
use bigdecimal::BigDecimal;
use chrono::{DateTime, Utc};
use diesel::{
    RunQueryDsl,
    dsl::{count_star, sum},
    prelude::*,
};
use std::sync::Arc;

use super::orders::with_items_and_payment;
use crate::{
    domain::{
        entities::orders::OrderEntity,
        lifecycle::LifecycleError,
        repositories::admin_dashboard::AdminDashboardRepository,
        value_objects::{
            admin::{PaymentMethodCounts, StatusCount, TopProduct},
            enums::{
                order_statuses::OrderStatus, payment_methods::PaymentMethod,
                refund_statuses::RefundStatus,
            },
            orders::OrderModel,
        },
    },
    infrastructure::postgres::{
        postgres_connection::PgPoolSquad,
        schema::{order_items, orders, payments},
    },
};

pub struct AdminDashboardPostgres {
    db_pool: Arc<PgPoolSquad>,
}

impl AdminDashboardPostgres {
    pub fn new(db_pool: Arc<PgPoolSquad>) -> Self {
        Self { db_pool }
    }
}

fn revenue_statuses() -> Vec<String> {
    OrderStatus::REVENUE
        .iter()
        .map(|status| status.to_string())
        .collect()
}

#[async_trait]
impl AdminDashboardRepository for AdminDashboardPostgres {
    async fn count_orders_by_status(&self) -> Result<Vec<StatusCount>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let rows = orders::table
            .group_by(orders::status)
            .select((orders::status, count_star()))
            .load::<(String, i64)>(&mut conn)?;

        let mut results = Vec::with_capacity(rows.len());
        for (status, count) in rows {
            let status = OrderStatus::parse(&status)
                .ok_or_else(|| LifecycleError::invalid("order_status", status.as_str()))?;
            results.push(StatusCount { status, count });
        }

        Ok(results)
    }

    async fn count_orders_since(&self, since: DateTime<Utc>) -> Result<i64> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let count = orders::table
            .filter(orders::created_at.ge(since))
            .count()
            .get_result::<i64>(&mut conn)?;

        Ok(count)
    }

    async fn revenue_since(&self, since: Option<DateTime<Utc>>) -> Result<BigDecimal> {
        let mut conn = Arc::clone(&self.db_pool).get()?;
        let mut query = orders::table
            .filter(orders::status.eq_any(revenue_statuses()))
            .select(sum(orders::total_amount))
            .into_boxed();

        if let Some(since) = since {
            query = query.filter(orders::created_at.ge(since));
        }

        let total = query.get_result::<Option<BigDecimal>>(&mut conn)?;

        Ok(total.unwrap_or_else(|| BigDecimal::from(0)))
    }

    async fn count_payments_by_method(&self) -> Result<PaymentMethodCounts> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let rows = payments::table
            .group_by(payments::payment_method)
            .select((payments::payment_method, count_star()))
            .load::<(String, i64)>(&mut conn)?;

        let mut counts = PaymentMethodCounts::default();
        for (method, count) in rows {
            match PaymentMethod::parse(&method) {
                Some(PaymentMethod::Cod) => counts.cod += count,
                Some(_) => counts.online += count,
                None => return Err(LifecycleError::invalid("payment_method", method).into()),
            }
        }

        Ok(counts)
    }

    async fn count_pending_refunds(&self) -> Result<i64> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let count = payments::table
            .filter(payments::refund_status.eq(RefundStatus::Pending.to_string()))
            .count()
            .get_result::<i64>(&mut conn)?;

        Ok(count)
    }

    async fn recent_orders(&self, limit: i64) -> Result<Vec<OrderModel>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let order_entities = orders::table
            .order(orders::created_at.desc())
            .limit(limit)
            .select(OrderEntity::as_select())
            .load::<OrderEntity>(&mut conn)?;

        with_items_and_payment(&mut conn, order_entities)
    }

    async fn top_products(&self, limit: i64) -> Result<Vec<TopProduct>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let rows = order_items::table
            .group_by((order_items::product_id, order_items::product_name))
            .select((
                order_items::product_id,
                order_items::product_name,
                sum(order_items::quantity),
            ))
            .order(sum(order_items::quantity).desc())
            .limit(limit)
            .load::<(i64, String, Option<i64>)>(&mut conn)?;

        Ok(rows
            .into_iter()
            .map(|(product_id, product_name, quantity_sold)| TopProduct {
                product_id,
                product_name,
                quantity_sold: quantity_sold.unwrap_or_default(),
            })
            .collect())
    }
}
