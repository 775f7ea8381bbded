//! Domain entities - the core business objects.

mod author;

mod post;

pub use author::{Author, AuthorName, AuthorView, NewAuthor};
pub use post::{BlogPost, BlogPostPatch, BlogPostView, Comment, NewBlogPost, PostAuthor};
