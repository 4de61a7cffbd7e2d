//! Session-backed models for the picking server.

pub mod session;

pub use session::{AuthSession, keys as session_keys};
