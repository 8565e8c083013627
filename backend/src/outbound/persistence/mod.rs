//! PostgreSQL persistence adapters using Diesel ORM.
//!
//! The directory translates between Diesel rows and domain users; row structs
//! and the schema stay private to this module. Connections come from a `bb8`
//! pool through `diesel-async`.
//!
//! ```ignore
//! use carvalue::outbound::persistence::{DbPool, DieselUserDirectory, PoolConfig};
//!
//! let pool = DbPool::new(PoolConfig::new("postgres://localhost/carvalue")).await?;
//! let directory = DieselUserDirectory::new(pool);
//! ```

mod diesel_error_mapping;
mod diesel_user_directory;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_user_directory::DieselUserDirectory;
pub use migrations::run_migrations;
pub use pool::{DbPool, PoolConfig, PoolError};
