use anyhow::Result;
use async_trait::async_trait;
use diesel::{RunQueryDsl, delete, prelude::*};
use std::sync::Arc;
use uuid::Uuid;

use crate::{
    domain::{
        entities::cart_lines::CartLineEntity, repositories::carts::CartRepository,
        value_objects::orders::CartLineModel,
    },
    infrastructure::postgres::{
        postgres_connection::PgPoolSquad,
        schema::{cart_items, carts, products},
    },
};

pub struct CartPostgres {
    db_pool: Arc<PgPoolSquad>,
}

impl CartPostgres {
    pub fn new(db_pool: Arc<PgPoolSquad>) -> Self {
        Self { db_pool }
    }
}

#[async_trait]
impl CartRepository for CartPostgres {
    async fn list_cart_lines(&self, user_id: Uuid) -> Result<Vec<CartLineModel>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let results = cart_items::table
            .inner_join(carts::table)
            .inner_join(products::table)
            .filter(carts::user_id.eq(user_id))
            .order(cart_items::id.asc())
            .select((
                products::id,
                products::name,
                cart_items::quantity,
                products::price,
                products::discount_price,
            ))
            .load::<CartLineEntity>(&mut conn)?;

        Ok(results.into_iter().map(CartLineModel::from).collect())
    }

    async fn clear_cart(&self, user_id: Uuid) -> Result<()> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let user_carts = carts::table
            .filter(carts::user_id.eq(user_id))
            .select(carts::id);
        delete(cart_items::table.filter(cart_items::cart_id.eq_any(user_carts)))
            .execute(&mut conn)?;

        Ok(())
    }
}
