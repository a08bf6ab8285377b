//! HTTP Server Configuration
//!
//! Where the trivia API listens and which browser origins may call it. The
//! config file provides the base values; `TRIVIA_HOST`, `TRIVIA_PORT` and
//! `TRIVIA_CORS_ORIGINS` (comma-separated) override them.

use std::io;
use std::net::SocketAddr;

use serde::{Deserialize, Serialize};

/// HTTP server configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HttpServerConfig {
    /// Host to bind to (default: "0.0.0.0")
    #[serde(default = "default_host")]
    pub host: String,

    /// Port to bind to (default: 5000)
    #[serde(default = "default_port")]
    pub port: u16,

    /// Origins allowed by CORS. Empty allows any origin, which the trivia
    /// frontend relies on during development.
    #[serde(default)]
    pub cors_origins: Vec<String>,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    5000
}

impl Default for HttpServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            cors_origins: Vec::new(),
        }
    }
}

impl HttpServerConfig {
    pub fn with_port(port: u16) -> Self {
        Self {
            port,
            ..Default::default()
        }
    }

    /// Overlay `TRIVIA_*` variables resolved through `lookup`.
    ///
    /// Empty values are ignored. Returns a message naming the variable when
    /// a value cannot be parsed.
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<(), String>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(host) = var("TRIVIA_HOST") {
            self.host = host.trim().to_string();
        }
        if let Some(port) = var("TRIVIA_PORT") {
            self.port = port
                .trim()
                .parse()
                .map_err(|_| format!("Invalid TRIVIA_PORT: {}", port))?;
        }
        if let Some(origins) = var("TRIVIA_CORS_ORIGINS") {
            self.cors_origins = origins
                .split(',')
                .map(str::trim)
                .filter(|o| !o.is_empty())
                .map(str::to_string)
                .collect();
        }
        Ok(())
    }

    pub fn allows_any_origin(&self) -> bool {
        self.cors_origins.is_empty()
    }

    /// `host:port` as configured
    pub fn socket_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Parsed bind address; the host must be an IP literal
    pub fn bind_addr(&self) -> io::Result<SocketAddr> {
        self.socket_addr().parse().map_err(|e| {
            io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("invalid bind address {}: {}", self.socket_addr(), e),
            )
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_allow_any_origin() {
        let config = HttpServerConfig::default();
        assert_eq!(config.socket_addr(), "0.0.0.0:5000");
        assert!(config.allows_any_origin());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: HttpServerConfig = serde_json::from_str(r#"{"port": 9000}"#).unwrap();
        assert_eq!(config.port, 9000);
        assert_eq!(config.host, "0.0.0.0");
    }

    #[test]
    fn test_env_overlay() {
        let mut config = HttpServerConfig::default();
        config
            .apply_env(|key| match key {
                "TRIVIA_HOST" => Some("127.0.0.1".to_string()),
                "TRIVIA_CORS_ORIGINS" => {
                    Some("http://localhost:3000, http://127.0.0.1:3000,".to_string())
                }
                _ => None,
            })
            .unwrap();

        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.port, 5000);
        assert_eq!(
            config.cors_origins,
            vec!["http://localhost:3000", "http://127.0.0.1:3000"]
        );
        assert!(!config.allows_any_origin());
    }

    #[test]
    fn test_env_rejects_bad_port() {
        let mut config = HttpServerConfig::default();
        let err = config
            .apply_env(|key| (key == "TRIVIA_PORT").then(|| "http".to_string()))
            .unwrap_err();
        assert!(err.contains("TRIVIA_PORT"));
        assert_eq!(config.port, 5000);
    }

    #[test]
    fn test_bind_addr() {
        let addr = HttpServerConfig::with_port(8080).bind_addr().unwrap();
        assert_eq!(addr.port(), 8080);

        let config = HttpServerConfig {
            host: "localhost".to_string(),
            ..Default::default()
        };
        assert_eq!(
            config.bind_addr().unwrap_err().kind(),
            io::ErrorKind::InvalidInput
        );
    }
}
