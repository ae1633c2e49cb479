//! Domain types.
//!
//! These types hold account and order state; persistence lives in
//! [`crate::store`] and behavior in [`crate::services`].

pub mod account;
pub mod order;

pub use account::Account;
pub use order::{Order, Receipt};
