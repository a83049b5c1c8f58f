//! Database primitives shared by the employee services.

use std::time::Duration;

use sea_orm::{
    ConnectOptions, ConnectionTrait, Database, DatabaseConnection, DbErr, Statement,
};
use serde::Deserialize;
use thiserror::Error;

pub mod employees;

pub use employees::{Employee, EmployeeRepository, SeaEmployeeRepository};

/// Shared connection pool alias.
pub type DbPool = DatabaseConnection;

#[derive(Debug, Error)]
pub enum DbError {
    #[error("database url missing")]
    MissingUrl,
    #[error("invalid value for {key}: {value}")]
    InvalidSetting { key: &'static str, value: String },
    #[error("employee {0} not found")]
    NotFound(i32),
    #[error(transparent)]
    Query(#[from] DbErr),
}

pub type DbResult<T> = Result<T, DbError>;

const URL_KEY: &str = "DATABASE_URL";
const MAX_CONNECTIONS_KEY: &str = "DATABASE_MAX_CONNECTIONS";
const LOG_STATEMENTS_KEY: &str = "DATABASE_LOG_STATEMENTS";

/// Connection settings, read once at startup.
#[derive(Clone, Debug, Deserialize)]
pub struct DatabaseSettings {
    pub url: String,
    #[serde(default)]
    pub max_connections: Option<u32>,
    #[serde(default)]
    pub log_statements: bool,
}

impl DatabaseSettings {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            max_connections: None,
            log_statements: false,
        }
    }

    pub fn from_env() -> DbResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build settings from an arbitrary key lookup (environment, `.env`, tests).
    pub fn from_lookup<F>(lookup: F) -> DbResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let url = lookup(URL_KEY)
            .filter(|value| !value.trim().is_empty())
            .ok_or(DbError::MissingUrl)?;

        let max_connections = match lookup(MAX_CONNECTIONS_KEY) {
            Some(raw) => Some(raw.trim().parse::<u32>().map_err(|_| {
                DbError::InvalidSetting {
                    key: MAX_CONNECTIONS_KEY,
                    value: raw.clone(),
                }
            })?),
            None => None,
        };

        let log_statements = lookup(LOG_STATEMENTS_KEY)
            .map(|val| matches!(val.to_lowercase().as_str(), "1" | "true" | "yes"))
            .unwrap_or(false);

        Ok(Self {
            url,
            max_connections,
            log_statements,
        })
    }
}

pub async fn connect(settings: &DatabaseSettings) -> DbResult<DbPool> {
    let mut options = ConnectOptions::new(settings.url.clone());
    options
        .connect_timeout(Duration::from_secs(10))
        .sqlx_logging(settings.log_statements);
    if let Some(max) = settings.max_connections {
        options.max_connections(max);
    }
    let pool = Database::connect(options).await?;
    tracing::debug!(backend = ?pool.get_database_backend(), "database pool ready");
    Ok(pool)
}

/// Round-trip a trivial statement; used by health checks.
pub async fn ping(pool: &DbPool) -> bool {
    let backend = pool.get_database_backend();
    pool.execute(Statement::from_string(backend, "SELECT 1".to_string()))
        .await
        .is_ok()
}
