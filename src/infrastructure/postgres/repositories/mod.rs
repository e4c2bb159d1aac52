pub mod admin_dashboard;
pub mod carts;
pub mod orders;
pub mod payments;
