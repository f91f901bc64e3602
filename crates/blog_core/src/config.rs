//! Runtime configuration for hosts embedding the core.
//!
//! # Responsibility
//! - Describe where the database lives and how logging is set up.
//! - Bootstrap logging and the migrated connection from that description.
//!
//! # Invariants
//! - No `db_path` means an isolated in-memory database.
//! - No `log_dir` means logging stays uninitialized.

use crate::db::{open_db, open_db_in_memory, DbError};
use crate::logging::{default_log_level, init_logging, LoggingError};
use rusqlite::Connection;
use serde::Deserialize;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;

pub const ENV_DB_PATH: &str = "BLOG_DB_PATH";
pub const ENV_LOG_LEVEL: &str = "BLOG_LOG_LEVEL";
pub const ENV_LOG_DIR: &str = "BLOG_LOG_DIR";

/// Bootstrap settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CoreConfig {
    #[serde(default)]
    pub db_path: Option<PathBuf>,
    #[serde(default = "default_level")]
    pub log_level: String,
    /// Absolute directory for rolling log files.
    #[serde(default)]
    pub log_dir: Option<String>,
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            db_path: None,
            log_level: default_level(),
            log_dir: None,
        }
    }
}

/// Bootstrap failure.
#[derive(Debug)]
pub enum ConfigError {
    Logging(LoggingError),
    Db(DbError),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Logging(err) => write!(f, "{err}"),
            Self::Db(err) => write!(f, "{err}"),
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Logging(err) => Some(err),
            Self::Db(err) => Some(err),
        }
    }
}

impl From<LoggingError> for ConfigError {
    fn from(value: LoggingError) -> Self {
        Self::Logging(value)
    }
}

impl From<DbError> for ConfigError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl CoreConfig {
    /// Reads `BLOG_DB_PATH`, `BLOG_LOG_LEVEL` and `BLOG_LOG_DIR`.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds a config from any key lookup; blank values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let read = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());
        Self {
            db_path: read(ENV_DB_PATH).map(PathBuf::from),
            log_level: read(ENV_LOG_LEVEL).unwrap_or_else(default_level),
            log_dir: read(ENV_LOG_DIR),
        }
    }

    /// Starts logging (when configured) and opens the migrated database.
    pub fn open(&self) -> Result<Connection, ConfigError> {
        if let Some(log_dir) = self.log_dir.as_deref() {
            init_logging(self.log_level.as_str(), log_dir)?;
        }

        let conn = match self.db_path.as_ref() {
            Some(path) => open_db(path)?,
            None => open_db_in_memory()?,
        };
        Ok(conn)
    }
}

fn default_level() -> String {
    default_log_level().to_string()
}

#[cfg(test)]
mod tests {
    use super::{CoreConfig, ENV_DB_PATH, ENV_LOG_DIR, ENV_LOG_LEVEL};
    use std::collections::HashMap;
    use std::path::PathBuf;

    #[test]
    fn from_lookup_reads_keys_and_ignores_blank_values() {
        let env = HashMap::from([
            (ENV_DB_PATH, "/tmp/blog.sqlite3"),
            (ENV_LOG_LEVEL, "warn"),
            (ENV_LOG_DIR, "  "),
        ]);
        let config = CoreConfig::from_lookup(|key| env.get(key).map(|v| v.to_string()));

        assert_eq!(config.db_path, Some(PathBuf::from("/tmp/blog.sqlite3")));
        assert_eq!(config.log_level, "warn");
        assert_eq!(config.log_dir, None);
    }

    #[test]
    fn deserialize_fills_defaults() {
        let config: CoreConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, CoreConfig::default());
    }

    #[test]
    fn open_without_paths_yields_in_memory_database() {
        let conn = CoreConfig::default().open().unwrap();
        let tables: i64 = conn
            .query_row(
                "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = 'articles';",
                [],
                |row| row.get(0),
            )
            .unwrap();
        assert_eq!(tables, 1);
    }
}
