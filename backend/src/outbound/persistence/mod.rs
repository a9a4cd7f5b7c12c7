//! PostgreSQL persistence adapters built on Diesel.

mod error_mapping;
pub mod migrations;
mod models;
pub mod pool;
pub mod schema;
mod society_store;
mod user_store;

pub use migrations::{run_pending_migrations, MigrationError};
pub use pool::{PoolError, StorePool};
pub use society_store::DieselSocietyStore;
pub use user_store::DieselUserStore;
