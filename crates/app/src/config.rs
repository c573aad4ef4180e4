use std::net::SocketAddr;
use std::path::Path;

use thiserror::Error;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub http_addr: SocketAddr,
    pub database_url: Option<String>,
    pub db_max_connections: u32,
    pub cors_allow_origins: Vec<String>,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid socket address: {0}")]
    InvalidSocket(String),
    #[error("invalid integer for {0}: {1}")]
    InvalidNumber(&'static str, String),
    #[error("invalid value for {0}: {1}")]
    InvalidValue(&'static str, String),
    #[error("failed to load .env: {0}")]
    Dotenv(#[from] dotenvy::Error),
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        let http_addr_raw = read_string("COMMENTS_HTTP_ADDR", "127.0.0.1:8080");
        let http_addr = http_addr_raw
            .parse()
            .map_err(|_| ConfigError::InvalidSocket(http_addr_raw.clone()))?;
        let database_url = read_optional_string("COMMENTS_DATABASE_URL");
        let db_max_connections = read_u32("COMMENTS_DB_MAX_CONNECTIONS", 5)?;
        if db_max_connections == 0 {
            return Err(ConfigError::InvalidValue(
                "COMMENTS_DB_MAX_CONNECTIONS",
                db_max_connections.to_string(),
            ));
        }
        let cors_allow_origins =
            parse_origin_list(&read_string("COMMENTS_CORS_ALLOW_ORIGINS", ""));

        Ok(Self {
            http_addr,
            database_url,
            db_max_connections,
            cors_allow_origins,
        })
    }
}

pub fn load_dotenv() -> Result<(), ConfigError> {
    load_dotenv_from(Path::new(".env"))
}

/// Keys already present in the environment win over the file.
fn load_dotenv_from(path: &Path) -> Result<(), ConfigError> {
    match dotenvy::from_path(path) {
        Err(err) if err.not_found() => Ok(()),
        other => Ok(other?),
    }
}

fn read_string(key: &'static str, default: &'static str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

fn read_u32(key: &'static str, default: u32) -> Result<u32, ConfigError> {
    let raw = std::env::var(key).unwrap_or_else(|_| default.to_string());
    raw.trim()
        .parse()
        .map_err(|_| ConfigError::InvalidNumber(key, raw))
}

fn parse_origin_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|origin| !origin.is_empty())
        .map(str::to_string)
        .collect()
}

fn read_optional_string(key: &'static str) -> Option<String> {
    let value = std::env::var(key).unwrap_or_default();
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use super::{load_dotenv_from, parse_origin_list};

    #[test]
    fn parse_origin_list_splits_and_trims() {
        assert_eq!(
            parse_origin_list(" https://a.example , ,https://b.example"),
            vec!["https://a.example".to_string(), "https://b.example".to_string()]
        );
        assert!(parse_origin_list("").is_empty());
    }

    #[test]
    fn missing_dotenv_file_is_ignored() {
        assert!(load_dotenv_from(Path::new("./no-such-dir/.env")).is_ok());
    }
}
