use uuid::Uuid;

pub const ORDER_NUMBER_PREFIX: &str = "DD";
pub const TRANSACTION_ID_PREFIX: &str = "TXN";

const RANDOM_PART_LEN: usize = 8;

/// Brand tag followed by the first eight hex digits of a random v4 UUID.
///
/// Not guaranteed unique: a collision is rejected by the `order_number`
/// unique constraint and the caller draws a new number.
pub fn generate_order_number() -> String {
    tagged_random_id(ORDER_NUMBER_PREFIX)
}

/// Reference attached to a simulated online payment.
pub fn generate_transaction_id() -> String {
    tagged_random_id(TRANSACTION_ID_PREFIX)
}

fn tagged_random_id(prefix: &str) -> String {
    let random = Uuid::new_v4().simple().to_string();
    format!("{}{}", prefix, random[..RANDOM_PART_LEN].to_uppercase())
}
