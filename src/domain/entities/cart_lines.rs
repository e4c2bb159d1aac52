use bigdecimal::BigDecimal;
use diesel::prelude::*;

/// One cart row joined with the product it points at.
#[derive(Debug, Clone, PartialEq, Queryable)]
pub struct CartLineEntity {
    pub product_id: i64,
    pub product_name: String,
    pub quantity: i32,
    pub price: BigDecimal,
    pub discount_price: Option<BigDecimal>,
}
