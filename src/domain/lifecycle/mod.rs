//! Order and payment lifecycle rules.
//!
//! Every function here is pure: it takes the current state (and the current
//! time, where relevant) and returns the next state or a [`LifecycleError`].
//! Loading and persisting the affected rows is left to the caller.

mod error;

pub mod cancellation;
pub mod checkout;
pub mod identifiers;
pub mod parse;
pub mod refunds;
pub mod settlement;
pub mod status_updates;

pub use error::LifecycleError;
