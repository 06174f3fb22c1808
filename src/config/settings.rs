//! Application settings loaded from environment variables.

use std::env;
use std::str::FromStr;

use super::constants::{
    DEFAULT_DATABASE_MAX_CONNECTIONS, DEFAULT_DEV_DATABASE_URL, DEFAULT_SERVER_HOST,
    DEFAULT_SERVER_PORT,
};
use crate::errors::{AppError, AppResult};

/// Runtime profile selecting database defaults
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Profile {
    /// Embedded SQLite database, relaxed defaults
    Dev,
    /// External database (MySQL), `DATABASE_URL` required
    Prod,
}

impl FromStr for Profile {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "dev" | "development" | "local" => Ok(Profile::Dev),
            "prod" | "production" => Ok(Profile::Prod),
            other => Err(AppError::internal(format!("Unknown APP_PROFILE: {}", other))),
        }
    }
}

/// Application configuration
#[derive(Clone)]
pub struct Config {
    pub profile: Profile,
    pub database_url: String,
    pub database_max_connections: u32,
    pub redis_url: Option<String>,
    /// Key rate limits on `X-Forwarded-For` / `X-Real-IP` instead of the
    /// TCP peer. Only safe behind a reverse proxy that overwrites them.
    pub trust_proxy_headers: bool,
    pub server_host: String,
    pub server_port: u16,
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("profile", &self.profile)
            .field("database_url", &"[REDACTED]")
            .field("database_max_connections", &self.database_max_connections)
            .field("redis_url", &self.redis_url.as_ref().map(|_| "[REDACTED]"))
            .field("trust_proxy_headers", &self.trust_proxy_headers)
            .field("server_host", &self.server_host)
            .field("server_port", &self.server_port)
            .finish()
    }
}

impl Config {
    /// Load configuration from `.env` and environment variables.
    ///
    /// # Errors
    /// Fails on an unknown profile, or when `DATABASE_URL` is missing in `prod`.
    pub fn from_env() -> AppResult<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> AppResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let profile = match lookup("APP_PROFILE") {
            Some(value) => value.parse()?,
            None => Profile::Dev,
        };

        let database_url = match (lookup("DATABASE_URL"), profile) {
            (Some(url), _) => url,
            (None, Profile::Dev) => {
                tracing::warn!("DATABASE_URL not set, using embedded SQLite database");
                DEFAULT_DEV_DATABASE_URL.to_string()
            }
            (None, Profile::Prod) => {
                return Err(AppError::internal(
                    "DATABASE_URL environment variable must be set in production",
                ));
            }
        };

        Ok(Self {
            profile,
            database_url,
            database_max_connections: lookup("DATABASE_MAX_CONNECTIONS")
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_DATABASE_MAX_CONNECTIONS),
            redis_url: lookup("REDIS_URL").filter(|v| !v.trim().is_empty()),
            trust_proxy_headers: lookup("TRUST_PROXY_HEADERS")
                .map(|v| parse_flag(&v))
                .unwrap_or(false),
            server_host: lookup("SERVER_HOST").unwrap_or_else(|| DEFAULT_SERVER_HOST.to_string()),
            server_port: lookup("SERVER_PORT")
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_SERVER_PORT),
        })
    }

    /// Configuration for an explicit database URL with defaults elsewhere.
    pub fn with_database_url(database_url: impl Into<String>) -> Self {
        Self {
            profile: Profile::Dev,
            database_url: database_url.into(),
            database_max_connections: DEFAULT_DATABASE_MAX_CONNECTIONS,
            redis_url: None,
            trust_proxy_headers: false,
            server_host: DEFAULT_SERVER_HOST.to_string(),
            server_port: DEFAULT_SERVER_PORT,
        }
    }

    /// Get the full server address.
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.server_host, self.server_port)
    }
}

fn parse_flag(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_dev_defaults() {
        let config = Config::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(config.profile, Profile::Dev);
        assert_eq!(config.database_url, DEFAULT_DEV_DATABASE_URL);
        assert_eq!(config.server_port, DEFAULT_SERVER_PORT);
        assert!(config.redis_url.is_none());
        assert!(!config.trust_proxy_headers);
    }

    #[test]
    fn test_trust_proxy_headers_flag() {
        let on = Config::from_lookup(lookup_from(&[("TRUST_PROXY_HEADERS", "true")])).unwrap();
        assert!(on.trust_proxy_headers);

        let off = Config::from_lookup(lookup_from(&[("TRUST_PROXY_HEADERS", "nope")])).unwrap();
        assert!(!off.trust_proxy_headers);
    }

    #[test]
    fn test_prod_requires_database_url() {
        let result = Config::from_lookup(lookup_from(&[("APP_PROFILE", "prod")]));
        assert!(result.is_err());

        let config = Config::from_lookup(lookup_from(&[
            ("APP_PROFILE", "production"),
            ("DATABASE_URL", "mysql://board:secret@db:3306/board"),
        ]))
        .unwrap();
        assert_eq!(config.profile, Profile::Prod);
        assert!(config.database_url.starts_with("mysql://"));
    }

    #[test]
    fn test_unknown_profile_rejected() {
        assert!(Config::from_lookup(lookup_from(&[("APP_PROFILE", "staging")])).is_err());
    }

    #[test]
    fn test_invalid_numbers_fall_back_to_defaults() {
        let config = Config::from_lookup(lookup_from(&[
            ("SERVER_PORT", "not-a-port"),
            ("DATABASE_MAX_CONNECTIONS", "-3"),
        ]))
        .unwrap();
        assert_eq!(config.server_port, DEFAULT_SERVER_PORT);
        assert_eq!(config.database_max_connections, DEFAULT_DATABASE_MAX_CONNECTIONS);
    }

    #[test]
    fn test_blank_redis_url_is_ignored() {
        let config = Config::from_lookup(lookup_from(&[("REDIS_URL", "  ")])).unwrap();
        assert!(config.redis_url.is_none());
    }

    #[test]
    fn test_debug_redacts_urls() {
        let mut config = Config::with_database_url("mysql://user:pw@host/db");
        config.redis_url = Some("redis://:pw@cache:6379".to_string());
        let debug = format!("{:?}", config);
        assert!(!debug.contains("pw@"));
        assert!(debug.contains("[REDACTED]"));
    }
}
