//! Configuration file structure
//!
//! ```json
//! {
//!   "server": {"host": "0.0.0.0", "port": 5000, "cors_origins": []},
//!   "page_size": 10,
//!   "database": {"host": "localhost", "port": 5432, "dbname": "trivia", "user": "postgres"}
//! }
//! ```
//!
//! Every field is optional. A missing file means all defaults. After the
//! file is read, `DATABASE_URL` and the server's `TRIVIA_*` variables
//! override it.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::http_server::HttpServerConfig;
use crate::query::QUESTIONS_PER_PAGE;
use crate::store::DatabaseConfig;

use super::errors::{CliError, CliResult};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: HttpServerConfig,

    /// Items per page on paginated endpoints (default 10)
    #[serde(default = "default_page_size")]
    pub page_size: usize,

    #[serde(default)]
    pub database: DatabaseConfig,
}

fn default_page_size() -> usize {
    QUESTIONS_PER_PAGE
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: HttpServerConfig::default(),
            page_size: default_page_size(),
            database: DatabaseConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration from file and the process environment
    pub fn load(path: &Path) -> CliResult<Self> {
        Self::load_with(path, |key| std::env::var(key).ok())
    }

    /// Load configuration, resolving overrides through `lookup`
    pub fn load_with<F>(path: &Path, lookup: F) -> CliResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = if path.exists() {
            let content = fs::read_to_string(path)
                .map_err(|e| CliError::config_error(format!("Failed to read config: {}", e)))?;
            serde_json::from_str(&content)?
        } else {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            Config::default()
        };

        config.apply_overrides(lookup)?;
        config.validate()?;
        Ok(config)
    }

    fn apply_overrides<F>(&mut self, lookup: F) -> CliResult<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup("DATABASE_URL").filter(|v| !v.is_empty()) {
            self.database.url = Some(url);
        }
        self.server.apply_env(lookup).map_err(CliError::config_error)
    }

    fn validate(&self) -> CliResult<()> {
        if self.page_size == 0 {
            return Err(CliError::config_error("page_size must be > 0"));
        }
        if self.server.port == 0 {
            return Err(CliError::config_error("server.port must be > 0"));
        }
        if self.database.max_connections == 0 {
            return Err(CliError::config_error("database.max_connections must be > 0"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use tempfile::TempDir;

    use super::*;

    fn no_env(_: &str) -> Option<String> {
        None
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let tmp = TempDir::new().unwrap();
        let config = Config::load_with(&tmp.path().join("absent.json"), no_env).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.page_size, 10);
    }

    #[test]
    fn test_partial_file() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("trivia.json");
        fs::write(
            &path,
            r#"{"server": {"port": 8080}, "database": {"dbname": "trivia_test"}}"#,
        )
        .unwrap();

        let config = Config::load_with(&path, no_env).unwrap();
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.database.dbname, "trivia_test");
        assert_eq!(config.database.port, 5432);
    }

    #[test]
    fn test_env_overrides() {
        let tmp = TempDir::new().unwrap();
        let env: HashMap<&str, &str> = [
            ("DATABASE_URL", "postgres://u@db/trivia"),
            ("TRIVIA_PORT", "7000"),
        ]
        .into_iter()
        .collect();

        let config = Config::load_with(&tmp.path().join("absent.json"), |k| {
            env.get(k).map(|v| v.to_string())
        })
        .unwrap();
        assert_eq!(config.database.url.as_deref(), Some("postgres://u@db/trivia"));
        assert_eq!(config.server.port, 7000);
    }

    #[test]
    fn test_invalid_values_rejected() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("trivia.json");

        fs::write(&path, r#"{"page_size": 0}"#).unwrap();
        assert!(matches!(
            Config::load_with(&path, no_env),
            Err(CliError::Config(_))
        ));

        fs::write(&path, "not json").unwrap();
        assert!(matches!(
            Config::load_with(&path, no_env),
            Err(CliError::Config(_))
        ));

        let bad_port = |k: &str| (k == "TRIVIA_PORT").then(|| "http".to_string());
        assert!(Config::load_with(&tmp.path().join("absent.json"), bad_port).is_err());
    }
}
