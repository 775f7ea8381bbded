//! Deadline decorator for record stores.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use uuid::Uuid;

use blog_core::domain::{Author, BlogPost, BlogPostPatch, Comment, NewAuthor, NewBlogPost};
use blog_core::error::RepoError;
use blog_core::ports::{AuthorRepository, BlogPostRepository, ReadMode};

/// Wraps a store so that no call outlives `timeout`.
///
/// An elapsed call fails with [`RepoError::Timeout`]; the inner future is
/// dropped, which aborts the in-flight store operation.
pub struct TimeoutRepository<R: ?Sized> {
    inner: Arc<R>,
    timeout: Duration,
}

impl<R: ?Sized> TimeoutRepository<R> {
    pub fn new(inner: Arc<R>, timeout: Duration) -> Self {
        Self { inner, timeout }
    }

    async fn bounded<T, F>(&self, operation: &'static str, fut: F) -> Result<T, RepoError>
    where
        F: Future<Output = Result<T, RepoError>>,
    {
        match tokio::time::timeout(self.timeout, fut).await {
            Ok(result) => result,
            Err(_) => {
                tracing::error!(
                    operation,
                    timeout_ms = self.timeout.as_millis() as u64,
                    "Store operation timed out"
                );
                Err(RepoError::Timeout {
                    operation,
                    after: self.timeout,
                })
            }
        }
    }
}

#[async_trait]
impl<R: BlogPostRepository + ?Sized> BlogPostRepository for TimeoutRepository<R> {
    async fn create(&self, fields: NewBlogPost) -> Result<BlogPost, RepoError> {
        self.bounded("create", self.inner.create(fields)).await
    }

    async fn find_all(&self, mode: ReadMode) -> Result<Vec<BlogPost>, RepoError> {
        self.bounded("find_all", self.inner.find_all(mode)).await
    }

    async fn find_by_id(&self, id: Uuid, mode: ReadMode) -> Result<Option<BlogPost>, RepoError> {
        self.bounded("find_by_id", self.inner.find_by_id(id, mode)).await
    }

    async fn update_by_id(&self, id: Uuid, patch: BlogPostPatch) -> Result<bool, RepoError> {
        self.bounded("update_by_id", self.inner.update_by_id(id, patch)).await
    }

    async fn delete_by_id(&self, id: Uuid) -> Result<bool, RepoError> {
        self.bounded("delete_by_id", self.inner.delete_by_id(id)).await
    }

    async fn add_comment(&self, id: Uuid, comment: Comment) -> Result<bool, RepoError> {
        self.bounded("add_comment", self.inner.add_comment(id, comment)).await
    }
}

#[async_trait]
impl<R: AuthorRepository + ?Sized> AuthorRepository for TimeoutRepository<R> {
    async fn create(&self, fields: NewAuthor) -> Result<Author, RepoError> {
        self.bounded("create_author", self.inner.create(fields)).await
    }

    async fn find_all(&self) -> Result<Vec<Author>, RepoError> {
        self.bounded("find_all_authors", self.inner.find_all()).await
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Author>, RepoError> {
        self.bounded("find_author_by_id", self.inner.find_by_id(id)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::InMemoryAuthorRepository;

    /// Author store whose reads never finish in time.
    struct StalledAuthors;

    #[async_trait]
    impl AuthorRepository for StalledAuthors {
        async fn create(&self, _fields: NewAuthor) -> Result<Author, RepoError> {
            Err(RepoError::Query("not used".into()))
        }

        async fn find_all(&self) -> Result<Vec<Author>, RepoError> {
            tokio::time::sleep(Duration::from_secs(5)).await;
            Ok(Vec::new())
        }

        async fn find_by_id(&self, _id: Uuid) -> Result<Option<Author>, RepoError> {
            Ok(None)
        }
    }

    #[tokio::test]
    async fn test_elapsed_call_becomes_timeout_error() {
        let repo: TimeoutRepository<dyn AuthorRepository> =
            TimeoutRepository::new(Arc::new(StalledAuthors), Duration::from_millis(20));

        let err = repo.find_all().await.unwrap_err();
        assert!(matches!(
            err,
            RepoError::Timeout {
                operation: "find_all_authors",
                ..
            }
        ));
    }

    #[tokio::test]
    async fn test_fast_call_passes_through() {
        let repo = TimeoutRepository::new(
            Arc::new(InMemoryAuthorRepository::new()),
            Duration::from_secs(1),
        );

        let created = repo
            .create(NewAuthor {
                first_name: "Desmond".into(),
                last_name: "Tutu".into(),
                user_name: "dtutu".into(),
            })
            .await
            .unwrap();

        let found = repo.find_by_id(created.id).await.unwrap();
        assert_eq!(found, Some(created));
    }
}
