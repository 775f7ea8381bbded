//! HTTP handlers and route configuration.

mod authors;
mod blog_posts;
mod health;

use actix_web::web;

use crate::config::RoutePaths;
use crate::middleware::error::AppError;

/// Configure all application routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig, paths: &RoutePaths) {
    cfg.app_data(json_config())
        .route("/health", web::get().to(health::health_check))
        // Blog posts
        .service(
            web::scope(&paths.posts)
                .route("", web::get().to(blog_posts::list))
                .route("", web::post().to(blog_posts::create))
                .route("/{id}", web::get().to(blog_posts::get))
                .route("/{id}", web::put().to(blog_posts::update))
                .route("/{id}", web::delete().to(blog_posts::delete))
                .route("/{id}/comments", web::post().to(blog_posts::add_comment)),
        )
        // Authors
        .service(
            web::scope(&paths.authors)
                .route("", web::get().to(authors::list))
                .route("", web::post().to(authors::create))
                .route("/{id}", web::get().to(authors::get)),
        );
}

/// Unparsable JSON bodies get the same problem-details shape as every other 400.
fn json_config() -> web::JsonConfig {
    web::JsonConfig::default()
        .error_handler(|err, _req| AppError::BadRequest(err.to_string()).into())
}
