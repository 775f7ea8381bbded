//! # Blog Infrastructure
//!
//! Concrete implementations of the record store ports defined in `blog-core`.
//!
//! ## Feature Flags
//!
//! - `full` (default) - All features enabled
//! - `minimal` - No external dependencies, in-memory only
//! - `postgres` - PostgreSQL record store via SeaORM

pub mod database;
pub mod store;

// Re-exports - In-Memory
pub use store::{InMemoryAuthorRepository, InMemoryBlogPostRepository, TimeoutRepository};

// Re-exports - PostgreSQL
#[cfg(feature = "postgres")]
pub use database::{DatabaseConnections, PostgresAuthorRepository, PostgresBlogPostRepository};
