//! Infrastructure layer: record stores and configuration.

pub mod config;
pub mod store;

pub use config::{AppConfig, ConfigError};
pub use store::{BlogStore, InMemoryStore, PostgresStore, Store, StoreError, UserStore};
