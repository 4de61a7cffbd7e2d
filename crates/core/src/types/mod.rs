//! Shared domain types.
//!
//! # Modules
//!
//! - [`id`] - Type-safe newtype IDs (`OrderId`, `OrderItemId`)
//! - [`order`] - `Order` and `OrderItem` domain types

pub mod id;
pub mod order;

pub use id::*;
pub use order::*;
