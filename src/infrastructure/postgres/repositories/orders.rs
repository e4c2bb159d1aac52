use anyhow::Result;
use async_trait::async_trait;
use diesel::{
    PgConnection, RunQueryDsl, insert_into,
    prelude::*,
    result::{DatabaseErrorKind, Error as DieselError},
    update,
};
use std::sync::Arc;
use uuid::Uuid;

use crate::{
    domain::{
        entities::{
            order_items::OrderItemEntity,
            orders::{CancelOrderEntity, OrderEntity},
            payments::{PaymentEntity, UpdatePaymentEntity},
        },
        repositories::orders::{OrderNumberTaken, OrderRepository},
        value_objects::{
            enums::order_statuses::OrderStatus,
            orders::{AdminOrderFilter, NewOrderModel, OrderModel},
        },
    },
    infrastructure::postgres::{
        postgres_connection::PgPoolSquad,
        schema::{order_items, orders, payments},
    },
};

pub struct OrderPostgres {
    db_pool: Arc<PgPoolSquad>,
}

impl OrderPostgres {
    pub fn new(db_pool: Arc<PgPoolSquad>) -> Self {
        Self { db_pool }
    }
}

/// Loads the items and payment of each order in two queries.
pub(crate) fn with_items_and_payment(
    conn: &mut PgConnection,
    order_entities: Vec<OrderEntity>,
) -> Result<Vec<OrderModel>> {
    let items = OrderItemEntity::belonging_to(&order_entities)
        .select(OrderItemEntity::as_select())
        .order(order_items::id.asc())
        .load::<OrderItemEntity>(conn)?
        .grouped_by(&order_entities);
    let payments = PaymentEntity::belonging_to(&order_entities)
        .select(PaymentEntity::as_select())
        .load::<PaymentEntity>(conn)?
        .grouped_by(&order_entities);

    let mut results = Vec::with_capacity(order_entities.len());
    for ((order, items), payments) in order_entities.into_iter().zip(items).zip(payments) {
        let payment = payments.into_iter().next();
        results.push(OrderModel::from_entities(order, items, payment)?);
    }

    Ok(results)
}

#[async_trait]
impl OrderRepository for OrderPostgres {
    async fn create_order(&self, new_order: NewOrderModel) -> Result<i64> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let order_entity = new_order.to_entity();
        let result = conn.transaction::<i64, DieselError, _>(|tx| {
            let order_id = insert_into(orders::table)
                .values(&order_entity)
                .returning(orders::id)
                .get_result::<i64>(tx)?;

            insert_into(order_items::table)
                .values(&new_order.to_item_entities(order_id))
                .execute(tx)?;

            Ok(order_id)
        });

        match result {
            Ok(order_id) => Ok(order_id),
            // order_number is the only unique column written here
            Err(DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _)) => {
                Err(OrderNumberTaken(new_order.order_number).into())
            }
            Err(err) => Err(err.into()),
        }
    }

    async fn find_order(&self, order_id: i64) -> Result<Option<OrderModel>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let order = orders::table
            .find(order_id)
            .select(OrderEntity::as_select())
            .first::<OrderEntity>(&mut conn)
            .optional()?;

        match order {
            Some(order) => Ok(with_items_and_payment(&mut conn, vec![order])?.pop()),
            None => Ok(None),
        }
    }

    async fn list_user_orders(&self, user_id: Uuid) -> Result<Vec<OrderModel>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let order_entities = orders::table
            .filter(orders::user_id.eq(user_id))
            .order(orders::created_at.desc())
            .select(OrderEntity::as_select())
            .load::<OrderEntity>(&mut conn)?;

        with_items_and_payment(&mut conn, order_entities)
    }

    async fn save_cancellation(
        &self,
        order_id: i64,
        cancel_entity: CancelOrderEntity,
        refund: Option<(i64, UpdatePaymentEntity)>,
    ) -> Result<()> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        conn.transaction::<(), DieselError, _>(|tx| {
            update(orders::table.find(order_id))
                .set(&cancel_entity)
                .execute(tx)?;

            if let Some((payment_id, update_entity)) = &refund {
                update(payments::table.find(*payment_id))
                    .set(update_entity)
                    .execute(tx)?;
            }

            Ok(())
        })?;

        Ok(())
    }

    async fn update_status(&self, order_id: i64, status: OrderStatus) -> Result<()> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        update(orders::table.find(order_id))
            .set(orders::status.eq(status.to_string()))
            .execute(&mut conn)?;

        Ok(())
    }

    async fn list_orders(&self, filter: AdminOrderFilter) -> Result<Vec<OrderModel>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;
        let mut query = orders::table
            .select(OrderEntity::as_select())
            .order(orders::created_at.desc())
            .into_boxed();

        if let Some(status) = filter.status {
            query = query.filter(orders::status.eq(status.to_string()));
        }

        if let Some(search) = filter.search {
            let pattern = format!("%{}%", search);
            query = query.filter(
                orders::order_number
                    .ilike(pattern.clone())
                    .or(orders::shipping_name.ilike(pattern)),
            );
        }

        let order_entities = query.load::<OrderEntity>(&mut conn)?;

        with_items_and_payment(&mut conn, order_entities)
    }
}
