pub mod document;
pub mod error;

// Re-export the core types to provide a clean public API.
pub use document::{Document, DocumentCreate};
pub use error::CoreError;
