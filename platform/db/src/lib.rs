//! Database primitives: the shared connection handle and its settings.

use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use serde::Deserialize;
use thiserror::Error;
use tracing::info;

/// Shared connection handle. sea-orm pools connections internally, so one
/// value is cloned across the whole request path.
pub type DbPool = DatabaseConnection;

#[derive(Debug, Error)]
pub enum DbError {
    #[error("failed to connect to the database")]
    Connect(#[from] sea_orm::DbErr),
}

pub type DbResult<T> = Result<T, DbError>;

/// Local file store used when no `DATABASE_URL` is configured.
const FALLBACK_URL: &str = "sqlite://employees.db?mode=rwc";

/// Environment-driven database settings.
#[derive(Clone, Debug, Deserialize)]
pub struct DatabaseSettings {
    #[serde(default = "fallback_url")]
    url: String,
}

fn fallback_url() -> String {
    FALLBACK_URL.to_string()
}

impl DatabaseSettings {
    pub fn new(url: impl Into<String>) -> Self {
        Self { url: url.into() }
    }

    /// Reads `DATABASE_URL`, falling back to the bundled SQLite file.
    pub fn from_env() -> Self {
        Self {
            url: std::env::var("DATABASE_URL").unwrap_or_else(|_| fallback_url()),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

pub async fn connect(settings: &DatabaseSettings) -> DbResult<DbPool> {
    let mut options = ConnectOptions::new(settings.url().to_string());
    options.sqlx_logging(false);
    let pool = Database::connect(options).await?;
    info!("database connection established");
    Ok(pool)
}
