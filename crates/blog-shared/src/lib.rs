//! # Blog Shared
//!
//! Wire types shared by the server and its clients: request bodies and the
//! error body.

pub mod dto;
pub mod response;

pub use response::ErrorResponse;
