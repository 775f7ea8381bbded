//! In-memory record store - used when no database is configured.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use blog_core::domain::{
    Author, BlogPost, BlogPostPatch, Comment, NewAuthor, NewBlogPost, PostAuthor,
};
use blog_core::error::RepoError;
use blog_core::ports::{AuthorRepository, BlogPostRepository, ReadMode};

/// In-memory author store.
///
/// Note: Data is lost on process restart.
pub struct InMemoryAuthorRepository {
    authors: RwLock<Vec<Author>>,
}

impl InMemoryAuthorRepository {
    pub fn new() -> Self {
        Self {
            authors: RwLock::new(Vec::new()),
        }
    }
}

impl Default for InMemoryAuthorRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AuthorRepository for InMemoryAuthorRepository {
    async fn create(&self, fields: NewAuthor) -> Result<Author, RepoError> {
        // Uniqueness check and insert under one write lock
        let mut authors = self.authors.write().await;

        if authors.iter().any(|a| a.user_name == fields.user_name) {
            return Err(RepoError::Constraint(format!(
                "author user name `{}` already exists",
                fields.user_name
            )));
        }

        let author = Author {
            id: Uuid::new_v4(),
            first_name: fields.first_name,
            last_name: fields.last_name,
            user_name: fields.user_name,
        };
        authors.push(author.clone());

        Ok(author)
    }

    async fn find_all(&self) -> Result<Vec<Author>, RepoError> {
        let mut authors = self.authors.read().await.clone();
        authors.sort_by(|a, b| a.user_name.cmp(&b.user_name));
        Ok(authors)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Author>, RepoError> {
        let authors = self.authors.read().await;
        Ok(authors.iter().find(|a| a.id == id).cloned())
    }
}

/// In-memory blog post store, kept in creation order.
///
/// Author references resolve against the shared author store. Posts only
/// ever hold `PostAuthor::Name` or `PostAuthor::Ref` at rest.
pub struct InMemoryBlogPostRepository {
    posts: RwLock<Vec<BlogPost>>,
    authors: Arc<InMemoryAuthorRepository>,
}

impl InMemoryBlogPostRepository {
    pub fn new(authors: Arc<InMemoryAuthorRepository>) -> Self {
        Self {
            posts: RwLock::new(Vec::new()),
            authors,
        }
    }

    async fn lookup_author(&self, id: Uuid) -> Result<Author, RepoError> {
        self.authors
            .find_by_id(id)
            .await?
            .ok_or_else(|| RepoError::Constraint(format!("author {id} does not exist")))
    }

    async fn resolve(&self, mut posts: Vec<BlogPost>) -> Vec<BlogPost> {
        let authors = self.authors.authors.read().await;

        for post in &mut posts {
            if let PostAuthor::Ref(author_id) = post.author {
                match authors.iter().find(|a| a.id == author_id) {
                    Some(author) => post.author = PostAuthor::Populated(author.clone()),
                    None => tracing::warn!(
                        post_id = %post.id,
                        author_id = %author_id,
                        "Blog post references a missing author"
                    ),
                }
            }
        }

        posts
    }

    async fn read(&self, posts: Vec<BlogPost>, mode: ReadMode) -> Vec<BlogPost> {
        match mode {
            ReadMode::Resolved => self.resolve(posts).await,
            ReadMode::Unresolved => posts,
        }
    }
}

/// Drop a populated author back to its reference before storing.
fn at_rest(author: PostAuthor) -> PostAuthor {
    match author {
        PostAuthor::Populated(author) => PostAuthor::Ref(author.id),
        other => other,
    }
}

#[async_trait]
impl BlogPostRepository for InMemoryBlogPostRepository {
    async fn create(&self, fields: NewBlogPost) -> Result<BlogPost, RepoError> {
        let populated = match fields.author.author_id() {
            Some(author_id) => Some(self.lookup_author(author_id).await?),
            None => None,
        };

        let mut post = BlogPost::create(Uuid::new_v4(), Utc::now(), fields);
        post.author = at_rest(post.author);
        self.posts.write().await.push(post.clone());

        if let Some(author) = populated {
            post.author = PostAuthor::Populated(author);
        }
        Ok(post)
    }

    async fn find_all(&self, mode: ReadMode) -> Result<Vec<BlogPost>, RepoError> {
        let posts = self.posts.read().await.clone();
        Ok(self.read(posts, mode).await)
    }

    async fn find_by_id(&self, id: Uuid, mode: ReadMode) -> Result<Option<BlogPost>, RepoError> {
        let found = {
            let posts = self.posts.read().await;
            posts.iter().find(|p| p.id == id).cloned()
        };

        match found {
            Some(post) => Ok(self.read(vec![post], mode).await.pop()),
            None => Ok(None),
        }
    }

    async fn update_by_id(&self, id: Uuid, mut patch: BlogPostPatch) -> Result<bool, RepoError> {
        if let Some(author_id) = patch.author.as_ref().and_then(PostAuthor::author_id) {
            self.lookup_author(author_id).await?;
        }
        patch.author = patch.author.map(at_rest);

        // Lookup and merge under a single write lock
        let mut posts = self.posts.write().await;
        match posts.iter_mut().find(|p| p.id == id) {
            Some(post) => {
                post.apply(patch);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete_by_id(&self, id: Uuid) -> Result<bool, RepoError> {
        let mut posts = self.posts.write().await;
        let before = posts.len();
        posts.retain(|p| p.id != id);
        Ok(posts.len() != before)
    }

    async fn add_comment(&self, id: Uuid, comment: Comment) -> Result<bool, RepoError> {
        let mut posts = self.posts.write().await;
        match posts.iter_mut().find(|p| p.id == id) {
            Some(post) => {
                post.comments.push(comment);
                Ok(true)
            }
            None => Ok(false),
        }
    }
}
