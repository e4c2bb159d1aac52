pub mod entities;
pub mod lifecycle;
pub mod repositories;
pub mod value_objects;
