//! Embedded schema migrations, applied at startup.

use diesel::pg::PgConnection;
use diesel::Connection;
use diesel_migrations::{embed_migrations, EmbeddedMigrations, MigrationHarness};

/// All migrations compiled into the binary.
pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// Errors raised while applying migrations.
#[derive(Debug, thiserror::Error)]
pub enum MigrationError {
    /// Could not open a connection for the migration run.
    #[error("migration connection failed: {message}")]
    Connect { message: String },
    /// A migration failed to apply.
    #[error("migration failed to apply: {message}")]
    Apply { message: String },
}

/// Apply any pending migrations over a short-lived blocking connection.
///
/// Call from a blocking context (`tokio::task::spawn_blocking`) during
/// startup; the async pool is only built afterwards.
pub fn run_pending_migrations(database_url: &str) -> Result<(), MigrationError> {
    let mut conn = PgConnection::establish(database_url).map_err(|err| MigrationError::Connect {
        message: err.to_string(),
    })?;
    conn.run_pending_migrations(MIGRATIONS)
        .map(|_| ())
        .map_err(|err| MigrationError::Apply {
            message: err.to_string(),
        })
}
