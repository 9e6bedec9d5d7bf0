//! # Docboard Database Crate
//!
//! This crate is the persistence layer for the document list. It owns the
//! storage record, the schema migrations and every SQL statement.
//!
//! ## Public API
//!
//! - `connect`: builds the SQLite connection pool.
//! - `run_migrations`: applies the embedded migrations.
//! - `DbRepository`: hands out request-scoped `DocumentSession`s, each wrapping
//!   one transaction. Nothing is persisted until `DocumentSession::commit`;
//!   a dropped session rolls back.
//! - `seed_if_empty`: inserts the starter documents into an empty store.
//! - `DbError`: the error type returned by this crate.

// Declare the modules that constitute this crate.
pub mod connection;
pub mod error;
pub mod repository;
pub mod seed;

// Re-export the key components to create a clean, public-facing API.
pub use connection::{connect, run_migrations};
pub use error::DbError;
pub use repository::{DbDocument, DbRepository, DocumentSession};
pub use seed::{SEED_DOCUMENTS, seed_if_empty};
