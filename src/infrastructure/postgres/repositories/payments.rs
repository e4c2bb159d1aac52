use anyhow::Result;
use async_trait::async_trait;
use diesel::{
    RunQueryDsl, insert_into,
    prelude::*,
    result::{DatabaseErrorKind, Error as DieselError},
    update,
};
use std::sync::Arc;

use crate::{
    domain::{
        entities::payments::{PaymentEntity, UpdatePaymentEntity},
        repositories::payments::{PaymentAlreadyExists, PaymentRepository},
        value_objects::{
            enums::order_statuses::OrderStatus,
            payments::{AdminPaymentFilter, NewPaymentModel, PaymentModel},
        },
    },
    infrastructure::postgres::{
        postgres_connection::PgPoolSquad,
        schema::{orders, payments},
    },
};

pub struct PaymentPostgres {
    db_pool: Arc<PgPoolSquad>,
}

impl PaymentPostgres {
    pub fn new(db_pool: Arc<PgPoolSquad>) -> Self {
        Self { db_pool }
    }
}

#[async_trait]
impl PaymentRepository for PaymentPostgres {
    async fn record_payment(
        &self,
        new_payment: NewPaymentModel,
        order_status: OrderStatus,
    ) -> Result<i64> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let payment_entity = new_payment.to_entity();
        let result = conn.transaction::<i64, DieselError, _>(|tx| {
            let payment_id = insert_into(payments::table)
                .values(&payment_entity)
                .returning(payments::id)
                .get_result::<i64>(tx)?;

            update(orders::table.find(new_payment.order_id))
                .set(orders::status.eq(order_status.to_string()))
                .execute(tx)?;

            Ok(payment_id)
        });

        match result {
            Ok(payment_id) => Ok(payment_id),
            Err(DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _)) => {
                Err(PaymentAlreadyExists(new_payment.order_id).into())
            }
            Err(err) => Err(err.into()),
        }
    }

    async fn find_payment(&self, payment_id: i64) -> Result<Option<PaymentModel>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let payment = payments::table
            .find(payment_id)
            .select(PaymentEntity::as_select())
            .first::<PaymentEntity>(&mut conn)
            .optional()?;

        Ok(payment.map(PaymentModel::try_from).transpose()?)
    }

    async fn update_payment(
        &self,
        payment_id: i64,
        update_entity: UpdatePaymentEntity,
    ) -> Result<()> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        update(payments::table.find(payment_id))
            .set(&update_entity)
            .execute(&mut conn)?;

        Ok(())
    }

    async fn list_payments(&self, filter: AdminPaymentFilter) -> Result<Vec<PaymentModel>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;
        let mut query = payments::table
            .select(PaymentEntity::as_select())
            .order(payments::created_at.desc())
            .into_boxed();

        if let Some(method) = filter.method {
            query = query.filter(payments::payment_method.eq(method.to_string()));
        }

        if let Some(status) = filter.status {
            query = query.filter(payments::payment_status.eq(status.to_string()));
        }

        if let Some(refund) = filter.refund {
            query = query.filter(payments::refund_status.eq(refund.to_string()));
        }

        let results = query
            .load::<PaymentEntity>(&mut conn)?
            .into_iter()
            .map(PaymentModel::try_from)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(results)
    }
}
