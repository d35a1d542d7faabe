//! # tidydo-adapter-storage-sqlite-sqlx
//!
//! `SQLite` persistence adapter using [sqlx](https://docs.rs/sqlx).
//!
//! ## Responsibilities
//! - Implement the `KeyValueStore` and `TodoRepository` ports defined in `tidydo-app`
//! - Manage `SQLite` connection pool lifecycle
//! - Run database migrations (sqlx embedded migrations)
//! - Map between domain types and database rows
//!
//! ## Dependency rule
//! Depends on `tidydo-app` (for port traits) and `tidydo-domain` (for domain types).
//! The `app` and `domain` crates must never reference this adapter.

pub mod error;
pub mod key_value_store;
pub mod pool;
pub mod todo_repo;

pub use key_value_store::SqliteKeyValueStore;
pub use pool::{Config, Database};
pub use todo_repo::SqliteTodoRepository;
