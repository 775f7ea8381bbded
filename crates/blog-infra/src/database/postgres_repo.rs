//! PostgreSQL repository implementations.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{SubsecRound, Utc};
use sea_orm::sea_query::Expr;
use sea_orm::{
    ColumnTrait, DbConn, DbErr, EntityTrait, QueryFilter, QueryOrder, Set, SqlErr,
};
use uuid::Uuid;

use blog_core::domain::{
    Author, BlogPost, BlogPostPatch, Comment, NewAuthor, NewBlogPost, PostAuthor,
};
use blog_core::error::RepoError;
use blog_core::ports::{AuthorRepository, BlogPostRepository, ReadMode};

use super::entity::author::{self, Entity as AuthorEntity};
use super::entity::blog_post::{self, Entity as BlogPostEntity};
use super::entity::comment::{self, Entity as CommentEntity};

fn map_db_err(err: DbErr) -> RepoError {
    if let Some(
        SqlErr::UniqueConstraintViolation(detail) | SqlErr::ForeignKeyConstraintViolation(detail),
    ) = err.sql_err()
    {
        return RepoError::Constraint(detail);
    }

    match err {
        DbErr::Conn(_) | DbErr::ConnectionAcquire(_) => RepoError::Connection(err.to_string()),
        other => RepoError::Query(other.to_string()),
    }
}

/// Postgres keeps microseconds; truncate so the returned record matches later reads.
fn now() -> chrono::DateTime<Utc> {
    Utc::now().trunc_subsecs(6)
}

/// PostgreSQL author repository.
pub struct PostgresAuthorRepository {
    db: DbConn,
}

impl PostgresAuthorRepository {
    pub fn new(db: DbConn) -> Self {
        Self { db }
    }
}

#[async_trait]
impl AuthorRepository for PostgresAuthorRepository {
    async fn create(&self, fields: NewAuthor) -> Result<Author, RepoError> {
        let author = Author {
            id: Uuid::new_v4(),
            first_name: fields.first_name,
            last_name: fields.last_name,
            user_name: fields.user_name,
        };

        AuthorEntity::insert(author::ActiveModel::from(author.clone()))
            .exec_without_returning(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(author)
    }

    async fn find_all(&self) -> Result<Vec<Author>, RepoError> {
        let result = AuthorEntity::find()
            .order_by_asc(author::Column::UserName)
            .all(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(result.into_iter().map(Into::into).collect())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Author>, RepoError> {
        let result = AuthorEntity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(result.map(Into::into))
    }
}

/// PostgreSQL blog post repository.
pub struct PostgresBlogPostRepository {
    db: DbConn,
}

impl PostgresBlogPostRepository {
    pub fn new(db: DbConn) -> Self {
        Self { db }
    }

    /// Attach comments and, for resolved reads, the referenced authors.
    ///
    /// Issues at most two extra queries regardless of how many posts are loaded.
    async fn hydrate(
        &self,
        models: Vec<blog_post::Model>,
        mode: ReadMode,
    ) -> Result<Vec<BlogPost>, RepoError> {
        if models.is_empty() {
            return Ok(Vec::new());
        }

        let post_ids: Vec<Uuid> = models.iter().map(|m| m.id).collect();
        let mut comments: HashMap<Uuid, Vec<Comment>> = HashMap::new();
        for row in CommentEntity::find()
            .filter(comment::Column::PostId.is_in(post_ids))
            .order_by_asc(comment::Column::CreatedAt)
            .order_by_asc(comment::Column::Id)
            .all(&self.db)
            .await
            .map_err(map_db_err)?
        {
            comments.entry(row.post_id).or_default().push(row.into());
        }

        let author_ids: Vec<Uuid> = models.iter().filter_map(|m| m.author_id).collect();
        let authors: HashMap<Uuid, Author> = if mode == ReadMode::Resolved && !author_ids.is_empty()
        {
            AuthorEntity::find()
                .filter(author::Column::Id.is_in(author_ids))
                .all(&self.db)
                .await
                .map_err(map_db_err)?
                .into_iter()
                .map(|m| (m.id, Author::from(m)))
                .collect()
        } else {
            HashMap::new()
        };

        Ok(models
            .into_iter()
            .map(|model| {
                let post_comments = comments.remove(&model.id).unwrap_or_default();
                let mut post = model.into_domain(post_comments);
                if let PostAuthor::Ref(author_id) = post.author
                    && let Some(author) = authors.get(&author_id)
                {
                    post.author = PostAuthor::Populated(author.clone());
                }
                post
            })
            .collect())
    }
}

#[async_trait]
impl BlogPostRepository for PostgresBlogPostRepository {
    async fn create(&self, fields: NewBlogPost) -> Result<BlogPost, RepoError> {
        let mut post = BlogPost::create(Uuid::new_v4(), now(), fields);

        if let Some(author_id) = post.author.author_id() {
            let author = AuthorEntity::find_by_id(author_id)
                .one(&self.db)
                .await
                .map_err(map_db_err)?
                .ok_or_else(|| RepoError::Constraint(format!("author {author_id} does not exist")))?;
            post.author = PostAuthor::Populated(author.into());
        }

        BlogPostEntity::insert(blog_post::ActiveModel::from(&post))
            .exec_without_returning(&self.db)
            .await
            .map_err(map_db_err)?;

        tracing::debug!(post_id = %post.id, "Inserted blog post");
        Ok(post)
    }

    async fn find_all(&self, mode: ReadMode) -> Result<Vec<BlogPost>, RepoError> {
        let models = BlogPostEntity::find()
            .order_by_asc(blog_post::Column::Created)
            .order_by_asc(blog_post::Column::Id)
            .all(&self.db)
            .await
            .map_err(map_db_err)?;

        self.hydrate(models, mode).await
    }

    async fn find_by_id(&self, id: Uuid, mode: ReadMode) -> Result<Option<BlogPost>, RepoError> {
        let model = BlogPostEntity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(map_db_err)?;

        match model {
            Some(model) => Ok(self.hydrate(vec![model], mode).await?.pop()),
            None => Ok(None),
        }
    }

    async fn update_by_id(&self, id: Uuid, patch: BlogPostPatch) -> Result<bool, RepoError> {
        if patch.is_empty() {
            let existing = BlogPostEntity::find_by_id(id)
                .one(&self.db)
                .await
                .map_err(map_db_err)?;
            return Ok(existing.is_some());
        }

        // One UPDATE ... SET touching only the patched columns
        let mut update = BlogPostEntity::update_many().filter(blog_post::Column::Id.eq(id));
        if let Some(title) = patch.title {
            update = update.col_expr(blog_post::Column::Title, Expr::value(title));
        }
        if let Some(content) = patch.content {
            update = update.col_expr(blog_post::Column::Content, Expr::value(content));
        }
        if let Some(author) = patch.author {
            let (first_name, last_name, author_id) = blog_post::author_columns(&author);
            update = update
                .col_expr(blog_post::Column::AuthorFirstName, Expr::value(first_name))
                .col_expr(blog_post::Column::AuthorLastName, Expr::value(last_name))
                .col_expr(blog_post::Column::AuthorId, Expr::value(author_id));
        }

        let result = update.exec(&self.db).await.map_err(map_db_err)?;
        Ok(result.rows_affected > 0)
    }

    async fn delete_by_id(&self, id: Uuid) -> Result<bool, RepoError> {
        let result = BlogPostEntity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(result.rows_affected > 0)
    }

    async fn add_comment(&self, id: Uuid, comment: Comment) -> Result<bool, RepoError> {
        let row = comment::ActiveModel {
            id: Set(Uuid::new_v4()),
            post_id: Set(id),
            content: Set(comment.content),
            created_at: Set(now().into()),
        };

        // The post_id foreign key is the existence check
        match CommentEntity::insert(row)
            .exec_without_returning(&self.db)
            .await
        {
            Ok(_) => Ok(true),
            Err(err) if matches!(err.sql_err(), Some(SqlErr::ForeignKeyConstraintViolation(_))) => {
                Ok(false)
            }
            Err(err) => Err(map_db_err(err)),
        }
    }
}
