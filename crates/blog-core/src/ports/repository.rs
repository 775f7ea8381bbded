use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{Author, BlogPost, BlogPostPatch, Comment, NewAuthor, NewBlogPost};
use crate::error::RepoError;

/// How a read treats author references.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadMode {
    /// Replace every `PostAuthor::Ref` with the referenced author record.
    Resolved,
    /// Return references as stored.
    Unresolved,
}

/// Blog post record store.
///
/// Every operation is a single store round trip and is atomic for the one
/// document it touches.
#[async_trait]
pub trait BlogPostRepository: Send + Sync {
    /// Insert a new post. The store assigns `id` and `created` and returns
    /// the record with its author populated.
    async fn create(&self, fields: NewBlogPost) -> Result<BlogPost, RepoError>;

    /// All posts in creation order.
    async fn find_all(&self, mode: ReadMode) -> Result<Vec<BlogPost>, RepoError>;

    /// Find a post by its id.
    async fn find_by_id(&self, id: Uuid, mode: ReadMode) -> Result<Option<BlogPost>, RepoError>;

    /// Overwrite only the fields set in `patch`. Returns `false` when no post has `id`.
    async fn update_by_id(&self, id: Uuid, patch: BlogPostPatch) -> Result<bool, RepoError>;

    /// Remove a post and its comments. Returns `false` when no post had `id`.
    async fn delete_by_id(&self, id: Uuid) -> Result<bool, RepoError>;

    /// Append a comment to a post. Returns `false` when no post has `id`.
    async fn add_comment(&self, id: Uuid, comment: Comment) -> Result<bool, RepoError>;
}

/// Author record store.
#[async_trait]
pub trait AuthorRepository: Send + Sync {
    /// Insert a new author. A duplicate `user_name` fails with [`RepoError::Constraint`].
    async fn create(&self, fields: NewAuthor) -> Result<Author, RepoError>;

    /// All authors, ordered by `user_name`.
    async fn find_all(&self) -> Result<Vec<Author>, RepoError>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Author>, RepoError>;
}
