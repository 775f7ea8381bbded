//! Blog post handlers.
//!
//! Each handler runs validate, then one store call, then serialize. Failures
//! return early with an error status.

use actix_web::{HttpResponse, web};
use serde_json::Value;
use uuid::Uuid;

use blog_core::domain::{AuthorName, BlogPost, BlogPostPatch, Comment, NewBlogPost, PostAuthor};
use blog_core::ports::ReadMode;
use blog_core::validation::{self, decode};
use blog_shared::dto::{
    AuthorInput, CreateBlogPostRequest, CreateCommentRequest, UpdateBlogPostRequest,
};

use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

fn post_author(input: AuthorInput) -> PostAuthor {
    match input {
        AuthorInput::Name(display) => PostAuthor::Name(AuthorName::from_display(&display)),
        AuthorInput::Structured {
            first_name,
            last_name,
        } => PostAuthor::Name(AuthorName::new(first_name, last_name)),
        AuthorInput::Reference { id } => PostAuthor::Ref(id),
    }
}

fn not_found(raw_id: &str) -> AppError {
    AppError::NotFound(format!("Blog post `{raw_id}` not found"))
}

/// GET {basePath}
pub async fn list(state: web::Data<AppState>) -> AppResult<HttpResponse> {
    let posts = state.posts.find_all(ReadMode::Resolved).await?;
    let body = posts
        .iter()
        .map(BlogPost::serialize)
        .collect::<Result<Vec<_>, _>>()?;

    Ok(HttpResponse::Ok().json(body))
}

/// GET {basePath}/{id}
pub async fn get(state: web::Data<AppState>, path: web::Path<String>) -> AppResult<HttpResponse> {
    let raw_id = path.into_inner();

    // An id that is not a UUID cannot name a stored post
    let post = match Uuid::parse_str(&raw_id) {
        Ok(id) => state.posts.find_by_id(id, ReadMode::Resolved).await?,
        Err(_) => None,
    };
    let post = post.ok_or_else(|| not_found(&raw_id))?;

    Ok(HttpResponse::Ok().json(post.serialize()?))
}

/// POST {basePath}
pub async fn create(
    state: web::Data<AppState>,
    body: web::Json<Value>,
) -> AppResult<HttpResponse> {
    let body = body.into_inner();
    validation::validate_create(&body)?;
    let req: CreateBlogPostRequest = decode(body)?;

    let post = state
        .posts
        .create(NewBlogPost {
            title: req.title,
            content: req.content,
            author: post_author(req.author),
        })
        .await?;

    tracing::info!(post_id = %post.id, "Created blog post");
    Ok(HttpResponse::Created().json(post.serialize()?))
}

/// PUT {basePath}/{id}
pub async fn update(
    state: web::Data<AppState>,
    path: web::Path<String>,
    body: web::Json<Value>,
) -> AppResult<HttpResponse> {
    let raw_id = path.into_inner();
    let body = body.into_inner();
    validation::validate_update(&raw_id, &body)?;
    let req: UpdateBlogPostRequest = decode(body)?;

    let id = Uuid::parse_str(&raw_id).map_err(|_| not_found(&raw_id))?;
    let patch = BlogPostPatch {
        title: req.title,
        content: req.content,
        author: req.author.map(post_author),
    };

    tracing::info!(post_id = %id, "Updating blog post");
    if !state.posts.update_by_id(id, patch).await? {
        return Err(not_found(&raw_id));
    }

    Ok(HttpResponse::NoContent().finish())
}

/// DELETE {basePath}/{id}
///
/// Succeeds whether or not the post existed.
pub async fn delete(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> AppResult<HttpResponse> {
    let raw_id = path.into_inner();

    let deleted = match Uuid::parse_str(&raw_id) {
        Ok(id) => state.posts.delete_by_id(id).await?,
        Err(_) => false,
    };

    tracing::info!(post_id = %raw_id, deleted, "Deleted blog post");
    Ok(HttpResponse::NoContent().finish())
}

/// POST {basePath}/{id}/comments
pub async fn add_comment(
    state: web::Data<AppState>,
    path: web::Path<String>,
    body: web::Json<Value>,
) -> AppResult<HttpResponse> {
    let raw_id = path.into_inner();
    let body = body.into_inner();
    validation::validate_comment(&body)?;
    let req: CreateCommentRequest = decode(body)?;

    let id = Uuid::parse_str(&raw_id).map_err(|_| not_found(&raw_id))?;
    let comment = Comment {
        content: req.content,
    };

    if !state.posts.add_comment(id, comment.clone()).await? {
        return Err(not_found(&raw_id));
    }

    tracing::info!(post_id = %id, "Added comment");
    Ok(HttpResponse::Created().json(comment))
}
