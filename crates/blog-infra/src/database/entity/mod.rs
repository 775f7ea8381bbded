//! SeaORM entities for the `authors`, `blog_posts` and `comments` tables.

pub mod author;
pub mod blog_post;
pub mod comment;
