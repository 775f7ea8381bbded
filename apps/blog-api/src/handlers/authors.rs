use actix_web::{HttpResponse, web};
use serde_json::Value;
use uuid::Uuid;

use blog_core::domain::{Author, NewAuthor};
use blog_core::validation::{self, decode};
use blog_shared::dto::CreateAuthorRequest;

use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

pub async fn list(state: web::Data<AppState>) -> AppResult<HttpResponse> {
    let authors = state.authors.find_all().await?;
    let body: Vec<_> = authors.iter().map(Author::serialize).collect();
    Ok(HttpResponse::Ok().json(body))
}

pub async fn get(state: web::Data<AppState>, path: web::Path<String>) -> AppResult<HttpResponse> {
    let raw_id = path.into_inner();

    let author = match Uuid::parse_str(&raw_id) {
        Ok(id) => state.authors.find_by_id(id).await?,
        Err(_) => None,
    };
    let author =
        author.ok_or_else(|| AppError::NotFound(format!("Author `{raw_id}` not found")))?;

    Ok(HttpResponse::Ok().json(author.serialize()))
}

pub async fn create(
    state: web::Data<AppState>,
    body: web::Json<Value>,
) -> AppResult<HttpResponse> {
    let body = body.into_inner();
    validation::validate_author(&body)?;
    let req: CreateAuthorRequest = decode(body)?;

    let author = state
        .authors
        .create(NewAuthor {
            first_name: req.first_name,
            last_name: req.last_name,
            user_name: req.user_name,
        })
        .await?;

    tracing::info!(author_id = %author.id, user_name = %author.user_name, "Created author");
    Ok(HttpResponse::Created().json(author.serialize()))
}
