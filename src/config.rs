//! Configuration module
//!
//! Loads configuration from environment variables.

use std::env;
use std::str::FromStr;

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Server host
    pub host: String,

    /// Server port
    pub port: u16,

    /// Environment (development, production)
    pub environment: String,

    /// Accepted API keys, stored as SHA-256 digests
    pub api_keys: Vec<ApiKeyEntry>,

    /// Rate limit: requests per minute per API key
    pub rate_limit_per_minute: u32,

    /// Maximum digit lines in one batch request
    pub max_batch_size: usize,

    /// Log output format
    pub log_format: LogFormat,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        let host = env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string());

        let port = parse_or("PORT", 3000)?;

        let environment = env::var("ENVIRONMENT").unwrap_or_else(|_| "development".to_string());

        let api_keys = env::var("API_KEY_HASHES")
            .map_err(|_| ConfigError::MissingEnv("API_KEY_HASHES"))
            .and_then(|raw| parse_api_keys(&raw))?;

        let rate_limit_per_minute = parse_or("RATE_LIMIT_PER_MINUTE", 100)?;

        let max_batch_size = parse_or("MAX_BATCH_SIZE", 100)?;

        let log_format = parse_or("LOG_FORMAT", LogFormat::Pretty)?;

        Ok(Self {
            host,
            port,
            environment,
            api_keys,
            rate_limit_per_minute,
            max_batch_size,
            log_format,
        })
    }

    /// Check if running in production
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }
}

fn parse_or<T: FromStr>(name: &'static str, default: T) -> Result<T, ConfigError> {
    match env::var(name) {
        Ok(raw) => raw.trim().parse().map_err(|_| ConfigError::InvalidValue(name)),
        Err(_) => Ok(default),
    }
}

/// An accepted API key: a label for logs and the hex SHA-256 of the key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiKeyEntry {
    pub name: String,
    pub key_hash: String,
}

/// Parse `API_KEY_HASHES`: comma-separated `name:hexdigest` or bare
/// `hexdigest` entries. Bare entries are labelled with their first 8 hex
/// characters.
pub fn parse_api_keys(raw: &str) -> Result<Vec<ApiKeyEntry>, ConfigError> {
    let entries = raw
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|entry| {
            let (name, hash) = match entry.split_once(':') {
                Some((name, hash)) => (name.trim().to_string(), hash.trim()),
                None => (entry.chars().take(8).collect(), entry),
            };

            let is_sha256_hex = hash.len() == 64 && hash.bytes().all(|b| b.is_ascii_hexdigit());
            if name.is_empty() || !is_sha256_hex {
                return Err(ConfigError::InvalidValue("API_KEY_HASHES"));
            }

            Ok(ApiKeyEntry {
                name,
                key_hash: hash.to_ascii_lowercase(),
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    if entries.is_empty() {
        return Err(ConfigError::InvalidValue("API_KEY_HASHES"));
    }

    Ok(entries)
}

/// Log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Pretty,
    Json,
}

impl FromStr for LogFormat {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "pretty" | "text" => Ok(Self::Pretty),
            "json" => Ok(Self::Json),
            _ => Err(ConfigError::InvalidValue("LOG_FORMAT")),
        }
    }
}

/// Configuration error types
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnv(&'static str),

    #[error("Invalid value for environment variable: {0}")]
    InvalidValue(&'static str),
}
