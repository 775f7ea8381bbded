//! Record store implementations - in-memory store and the timeout decorator.

mod memory;
mod timeout;

pub use memory::{InMemoryAuthorRepository, InMemoryBlogPostRepository};
pub use timeout::TimeoutRepository;
