//! Meli Picking Core - Shared types and aggregation library.
//!
//! This crate provides the types and pure logic shared by the Meli Picking
//! components:
//!
//! - `server` - Seller-facing web application (auth, order sync, export)
//!
//! # Architecture
//!
//! The core crate contains only types and pure functions - no I/O, no
//! database access, no HTTP clients. The picking-list join lives here so it
//! can be exercised without a running database.
//!
//! # Modules
//!
//! - [`types`] - Newtype IDs and the `Order`/`OrderItem` domain types
//! - [`picking`] - In-memory order/item join and summary figures

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod picking;
pub mod types;

pub use picking::*;
pub use types::*;
