//! Application state - shared across all handlers.

use std::sync::Arc;
use std::time::Duration;

use blog_core::ports::{AuthorRepository, BlogPostRepository};
use blog_infra::{InMemoryAuthorRepository, InMemoryBlogPostRepository, TimeoutRepository};

#[cfg(feature = "postgres")]
use blog_infra::{DatabaseConnections, PostgresAuthorRepository, PostgresBlogPostRepository};

use crate::config::AppConfig;

/// Which record store backs the API.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreBackend {
    Memory,
    #[cfg(feature = "postgres")]
    Postgres,
}

impl StoreBackend {
    pub fn as_str(self) -> &'static str {
        match self {
            StoreBackend::Memory => "memory",
            #[cfg(feature = "postgres")]
            StoreBackend::Postgres => "postgres",
        }
    }
}

/// Shared application state.
///
/// Both stores are wrapped in a [`TimeoutRepository`], so every handler call
/// is bounded.
#[derive(Clone)]
pub struct AppState {
    pub posts: Arc<dyn BlogPostRepository>,
    pub authors: Arc<dyn AuthorRepository>,
    pub backend: StoreBackend,
    #[cfg(feature = "postgres")]
    pub db: Option<Arc<DatabaseConnections>>,
}

impl AppState {
    /// State over caller-supplied stores.
    pub fn with_repositories(
        posts: Arc<dyn BlogPostRepository>,
        authors: Arc<dyn AuthorRepository>,
        backend: StoreBackend,
        store_timeout: Duration,
    ) -> Self {
        Self {
            posts: Arc::new(TimeoutRepository::new(posts, store_timeout)),
            authors: Arc::new(TimeoutRepository::new(authors, store_timeout)),
            backend,
            #[cfg(feature = "postgres")]
            db: None,
        }
    }

    /// State over fresh, empty in-memory stores.
    pub fn in_memory(store_timeout: Duration) -> Self {
        let authors = Arc::new(InMemoryAuthorRepository::new());
        let posts = Arc::new(InMemoryBlogPostRepository::new(authors.clone()));
        Self::with_repositories(posts, authors, StoreBackend::Memory, store_timeout)
    }

    /// Build the application state with appropriate implementations.
    #[cfg(feature = "postgres")]
    pub async fn new(config: &AppConfig) -> Self {
        use migration::{Migrator, MigratorTrait};

        let Some(db_config) = config.database.as_ref() else {
            tracing::warn!("DATABASE_URL not set. Running without database (in-memory mode).");
            return Self::in_memory(config.store_timeout);
        };

        let connections = match DatabaseConnections::init(db_config).await {
            Ok(connections) => connections,
            Err(e) => {
                tracing::error!(
                    "Failed to connect to database: {}. Using in-memory fallback.",
                    e
                );
                return Self::in_memory(config.store_timeout);
            }
        };

        if config.run_migrations {
            if let Err(e) = Migrator::up(&connections.main, None).await {
                tracing::error!(
                    "Failed to apply migrations: {}. Using in-memory fallback.",
                    e
                );
                return Self::in_memory(config.store_timeout);
            }
            tracing::info!("Database migrations applied");
        }

        let posts = Arc::new(PostgresBlogPostRepository::new(connections.main.clone()));
        let authors = Arc::new(PostgresAuthorRepository::new(connections.main.clone()));

        let mut state = Self::with_repositories(
            posts,
            authors,
            StoreBackend::Postgres,
            config.store_timeout,
        );
        state.db = Some(Arc::new(connections));

        tracing::info!("Application state initialized");
        state
    }

    #[cfg(not(feature = "postgres"))]
    pub async fn new(config: &AppConfig) -> Self {
        tracing::info!("Running without postgres feature - using in-memory store");
        Self::in_memory(config.store_timeout)
    }

    /// Check that the backing store is reachable.
    #[cfg(feature = "postgres")]
    pub async fn check_store(&self) -> Result<(), String> {
        match &self.db {
            Some(db) => db.ping().await.map_err(|e| e.to_string()),
            None => Ok(()),
        }
    }

    #[cfg(not(feature = "postgres"))]
    pub async fn check_store(&self) -> Result<(), String> {
        Ok(())
    }
}
