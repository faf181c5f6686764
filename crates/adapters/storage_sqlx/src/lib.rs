//! # mudstore-adapter-storage-sqlx
//!
//! SQL persistence adapter using [sqlx](https://docs.rs/sqlx), speaking
//! either `SQLite` or Postgres through the `Any` driver.
//!
//! ## Responsibilities
//! - Implement the storage port traits defined in `mudstore-app::ports::storage`
//! - Manage the connection pool lifecycle and create the schema
//! - Render dialect-specific SQL for filtered, paginated listings
//! - Map between domain types and database rows, including the three-column
//!   form of a location
//! - Translate backend errors into classified domain errors
//!
//! ## Dependency rule
//! Depends on `mudstore-app` (for port traits) and `mudstore-domain` (for domain types).
//! The `app` and `domain` crates must never reference this adapter.

pub mod error;
mod item_storage;
mod link_storage;
mod location;
mod player_storage;
pub mod pool;
pub mod query;
mod room_storage;
mod row;
mod user_storage;

#[cfg(test)]
mod fixtures;

pub use error::StorageError;
pub use item_storage::SqlxItemStorage;
pub use link_storage::SqlxLinkStorage;
pub use player_storage::SqlxPlayerStorage;
pub use pool::{Config, Database};
pub use query::{Dialect, QueryBuilder};
pub use room_storage::SqlxRoomStorage;
pub use user_storage::SqlxUserStorage;
