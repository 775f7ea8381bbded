//! # Blog API Server
//!
//! The main entry point for the Actix-web HTTP server.

use actix_web::{App, HttpServer, web};
use anyhow::Context;
use tracing_actix_web::TracingLogger;

mod config;
mod handlers;
mod middleware;
mod seed;
mod state;
mod telemetry;

use config::AppConfig;
use state::{AppState, StoreBackend};
use telemetry::TelemetryConfig;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    telemetry::init_telemetry(&TelemetryConfig::from_env());

    let config = AppConfig::from_env();

    tracing::info!(
        "Starting Blog API Server on {}:{} (posts at {}, authors at {})",
        config.host,
        config.port,
        config.routes.posts,
        config.routes.authors
    );

    let state = AppState::new(&config).await;

    if state.backend == StoreBackend::Memory && config.seed_sample_posts {
        let seeded = seed::seed_sample_posts(state.posts.as_ref())
            .await
            .context("failed to seed sample posts")?;
        tracing::info!(seeded, "Seeded in-memory store");
    }

    let routes = config.routes.clone();

    HttpServer::new(move || {
        let routes = routes.clone();
        App::new()
            .wrap(TracingLogger::default())
            .app_data(web::Data::new(state.clone()))
            .configure(move |cfg| handlers::configure_routes(cfg, &routes))
    })
    .bind((config.host.as_str(), config.port))
    .with_context(|| format!("failed to bind {}:{}", config.host, config.port))?
    .run()
    .await
    .context("HTTP server terminated with an error")
}
