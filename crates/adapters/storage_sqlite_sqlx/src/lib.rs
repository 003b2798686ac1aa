//! # wvadmin-adapter-storage-sqlite-sqlx
//!
//! `SQLite` persistence adapter using [sqlx](https://docs.rs/sqlx).
//!
//! ## Responsibilities
//! - Implement `ConfigStore` over the `config` table shared with the daemons
//! - Implement `ArchiveStatistics` over the archive and NOAA databases
//! - Manage `SQLite` connection pool lifecycle
//! - Run database migrations (using sqlx embedded migrations)
//!
//! ## Dependency rule
//! Depends on `wvadmin-app` (for port traits) and `wvadmin-domain` (for domain types).
//! The `app` and `domain` crates must never reference this adapter.

mod archive_stats;
mod config_store;
mod error;
mod pool;

pub use archive_stats::SqliteArchiveStatistics;
pub use config_store::SqliteConfigStore;
pub use error::StorageError;
pub use pool::{Config, Database};
