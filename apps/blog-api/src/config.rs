//! Application configuration loaded from environment variables.

use std::env;
use std::str::FromStr;
use std::time::Duration;

use blog_infra::database::DatabaseConfig;

const DEFAULT_POSTS_PATH: &str = "/blogs";
const DEFAULT_AUTHORS_PATH: &str = "/authors";

/// Mount points of the two resources.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoutePaths {
    pub posts: String,
    pub authors: String,
}

impl Default for RoutePaths {
    fn default() -> Self {
        Self {
            posts: DEFAULT_POSTS_PATH.to_string(),
            authors: DEFAULT_AUTHORS_PATH.to_string(),
        }
    }
}

/// Application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub routes: RoutePaths,
    /// Upper bound on every record store call.
    pub store_timeout: Duration,
    /// Seed the in-memory store with sample posts at startup.
    pub seed_sample_posts: bool,
    /// Apply pending migrations after connecting to the database.
    #[cfg(feature = "postgres")]
    pub run_migrations: bool,
    pub database: Option<DatabaseConfig>,
}

impl AppConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        Self::from_vars(|key| env::var(key).ok())
    }

    /// Load configuration from an arbitrary variable source.
    pub fn from_vars(var: impl Fn(&str) -> Option<String>) -> Self {
        let database = var("DATABASE_URL").map(|url| DatabaseConfig {
            url,
            max_connections: parse_or(&var, "DB_MAX_CONNECTIONS", 20),
            min_connections: parse_or(&var, "DB_MIN_CONNECTIONS", 2),
            connect_timeout: Duration::from_secs(parse_or(&var, "DB_CONNECT_TIMEOUT_SECS", 10)),
        });

        Self {
            host: var("HOST").unwrap_or_else(|| "127.0.0.1".to_string()),
            port: parse_or(&var, "PORT", 8080),
            routes: RoutePaths {
                posts: normalize_path(var("BASE_PATH").as_deref(), DEFAULT_POSTS_PATH),
                authors: normalize_path(var("AUTHORS_PATH").as_deref(), DEFAULT_AUTHORS_PATH),
            },
            store_timeout: Duration::from_millis(parse_or(&var, "STORE_TIMEOUT_MS", 5000)),
            seed_sample_posts: flag(&var, "SEED_SAMPLE_POSTS", true),
            #[cfg(feature = "postgres")]
            run_migrations: flag(&var, "RUN_MIGRATIONS", true),
            database,
        }
    }
}

fn parse_or<T: FromStr>(var: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> T {
    var(key).and_then(|s| s.parse().ok()).unwrap_or(default)
}

fn flag(var: &impl Fn(&str) -> Option<String>, key: &str, default: bool) -> bool {
    var(key)
        .map(|v| v != "false" && v != "0")
        .unwrap_or(default)
}

/// One leading `/`, no trailing `/`. Blank input falls back to `default`.
fn normalize_path(raw: Option<&str>, default: &str) -> String {
    let trimmed = raw.unwrap_or_default().trim().trim_matches('/');
    if trimmed.is_empty() {
        default.to_string()
    } else {
        format!("/{trimmed}")
    }
}
