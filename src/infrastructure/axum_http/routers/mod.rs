pub mod admin;
pub mod checkout;
pub mod orders;
pub mod payments;
