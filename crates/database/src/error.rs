use thiserror::Error;

#[derive(Error, Debug)]
pub enum DbError {
    #[error("Invalid database connection settings: {0}")]
    ConnectionConfigError(String),

    #[error("Database query failed: {0}")]
    QueryError(#[from] sqlx::Error),

    #[error("Database migration failed: {0}")]
    MigrationError(#[from] sqlx::migrate::MigrateError),

    #[error("A document with type '{0}' already exists.")]
    UniqueViolation(String),

    #[error("The requested data was not found in the database.")]
    NotFound,
}

impl DbError {
    /// Classifies a failed write, surfacing collisions on the `type` column.
    pub(crate) fn from_write(err: sqlx::Error, doc_type: &str) -> Self {
        match &err {
            sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
                DbError::UniqueViolation(doc_type.to_string())
            }
            _ => DbError::QueryError(err),
        }
    }
}
