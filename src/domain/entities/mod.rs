pub mod cart_lines;
pub mod order_items;
pub mod orders;
pub mod payments;
