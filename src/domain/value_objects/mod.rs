pub mod admin;
pub mod enums;
pub mod orders;
pub mod payments;
