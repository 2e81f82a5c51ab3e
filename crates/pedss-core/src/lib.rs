//! pedss-core
//!
//! Pure domain types and store key conventions for the PEDSS scoring app.
//! No I/O dependency — this is the shared vocabulary of the system.

pub mod error;
pub mod models;
pub mod store_keys;
