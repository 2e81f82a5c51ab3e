//! pedss-storage
//!
//! Durable on-device state. A small key-value store of JSON documents on
//! the local filesystem, and the assessment repository, settings store, and
//! profile store built on top of it.
//!
//! Single-user, single-device: one logical writer at a time, every
//! operation request-response. No locking or transactions.

pub mod error;
pub mod repository;
pub mod settings;
pub mod state;
pub mod store;

pub use error::StorageError;
pub use repository::AssessmentRepository;
pub use settings::{ProfileStore, SettingsStore};
pub use store::Store;
