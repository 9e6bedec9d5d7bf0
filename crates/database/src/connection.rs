use crate::error::DbError;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePool, SqlitePoolOptions};
use std::str::FromStr;
use std::time::Duration;

/// Establishes a connection pool to the SQLite document store.
///
/// File databases are created on first use and run in WAL mode, so readers
/// are not blocked by the single writer. An in-memory database lives only
/// as long as its connection, so for `:memory:` URLs the pool is pinned to a
/// single connection that is never recycled.
pub async fn connect(database_url: &str, max_connections: u32) -> Result<SqlitePool, DbError> {
    if max_connections == 0 {
        return Err(DbError::ConnectionConfigError(
            "max_connections must be at least 1".to_string(),
        ));
    }

    let options = SqliteConnectOptions::from_str(database_url)
        .map_err(|e| DbError::ConnectionConfigError(e.to_string()))?
        .create_if_missing(true)
        .busy_timeout(Duration::from_secs(5));

    let pool_options = SqlitePoolOptions::new().acquire_timeout(Duration::from_secs(5));
    let (options, pool_options) = if is_in_memory(database_url) {
        let pool_options = pool_options
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None::<Duration>)
            .max_lifetime(None::<Duration>);
        (options, pool_options)
    } else {
        (
            options.journal_mode(SqliteJournalMode::Wal),
            pool_options.max_connections(max_connections),
        )
    };

    let pool = pool_options.connect_with(options).await?;
    tracing::debug!(url = %database_url, "Database pool established.");

    Ok(pool)
}

/// Applies the embedded migrations, bringing the schema up to date.
pub async fn run_migrations(pool: &SqlitePool) -> Result<(), DbError> {
    sqlx::migrate!("./migrations").run(pool).await?;
    Ok(())
}

fn is_in_memory(database_url: &str) -> bool {
    database_url.contains(":memory:") || database_url.contains("mode=memory")
}
