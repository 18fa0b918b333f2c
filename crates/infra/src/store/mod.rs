//! Record store boundary.
//!
//! The API only talks to the [`Store`] trait; backends are chosen at startup.

pub mod in_memory;
pub mod postgres;
pub mod r#trait;

pub use in_memory::InMemoryStore;
pub use postgres::PostgresStore;
pub use r#trait::{BlogStore, Store, StoreError, UserStore};
