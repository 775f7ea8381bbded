//! # Blog Core
//!
//! The domain layer of the blog API.
//! Blog post and author records, the request validator, and the record store
//! ports. Pure logic with zero infrastructure dependencies.

pub mod domain;
pub mod error;
pub mod ports;
pub mod validation;

pub use error::{DomainError, RepoError};
pub use validation::ValidationError;
