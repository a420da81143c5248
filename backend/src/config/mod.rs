//! Central module for application-wide configuration settings.
//!
//! This module handles loading and managing configuration parameters such as
//! the database URL, server port, and the signing secrets used for sessions.

use anyhow::{Context, Result, bail};
use std::env;

/// Settings for issuing and transporting session tokens.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    pub access_secret: String,
    pub refresh_secret: String,
    pub access_ttl_seconds: u64,
    pub refresh_ttl_seconds: u64,
    pub cookie_secure: bool,
}

/// Account guaranteed to exist with the admin flag at startup.
#[derive(Debug, Clone)]
pub struct AdminBootstrap {
    pub email: String,
    pub password: String,
    pub name: String,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub max_connections: u32,
    pub acquire_timeout_seconds: u64,
    pub bcrypt_cost: u32,
    pub server_port: u16,
    pub session: SessionConfig,
    pub admin: Option<AdminBootstrap>,
}

impl Config {
    /// Loads configuration from environment variables.
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var_or = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        let database_url = lookup("DATABASE_URL").context("DATABASE_URL not set")?;

        let max_connections = var_or("DB_MAX_CONNECTIONS", "5")
            .parse::<u32>()
            .context("DB_MAX_CONNECTIONS must be a valid number")?;

        let acquire_timeout_seconds = var_or("DB_ACQUIRE_TIMEOUT_SECONDS", "3")
            .parse::<u64>()
            .context("DB_ACQUIRE_TIMEOUT_SECONDS must be a valid number")?;

        let bcrypt_cost = var_or("BCRYPT_COST", &bcrypt::DEFAULT_COST.to_string())
            .parse::<u32>()
            .context("BCRYPT_COST must be a valid number")?;

        let server_port = var_or("SERVER_PORT", "3000")
            .parse::<u16>()
            .context("SERVER_PORT must be a valid number")?;

        let access_secret = lookup("JWT_ACCESS_SECRET").context("JWT_ACCESS_SECRET not set")?;
        let refresh_secret = lookup("JWT_REFRESH_SECRET").context("JWT_REFRESH_SECRET not set")?;
        if access_secret == refresh_secret {
            bail!("JWT_ACCESS_SECRET and JWT_REFRESH_SECRET must differ");
        }

        let access_ttl_seconds = var_or("ACCESS_TOKEN_TTL_SECONDS", "600")
            .parse::<u64>()
            .context("ACCESS_TOKEN_TTL_SECONDS must be a valid number")?;

        let refresh_ttl_seconds = var_or("REFRESH_TOKEN_TTL_SECONDS", "86400")
            .parse::<u64>()
            .context("REFRESH_TOKEN_TTL_SECONDS must be a valid number")?;

        let cookie_secure = var_or("REFRESH_COOKIE_SECURE", "false")
            .parse::<bool>()
            .context("REFRESH_COOKIE_SECURE must be true or false")?;

        let admin = match (lookup("ADMIN_EMAIL"), lookup("ADMIN_PASSWORD")) {
            (Some(email), Some(password)) => Some(AdminBootstrap {
                email,
                password,
                name: var_or("ADMIN_NAME", "Administrator"),
            }),
            (None, None) => None,
            _ => bail!("ADMIN_EMAIL and ADMIN_PASSWORD must be set together"),
        };

        Ok(Config {
            database_url,
            max_connections,
            acquire_timeout_seconds,
            bcrypt_cost,
            server_port,
            session: SessionConfig {
                access_secret,
                refresh_secret,
                access_ttl_seconds,
                refresh_ttl_seconds,
                cookie_secure,
            },
            admin,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_defaults_applied() {
        let config = Config::from_lookup(lookup_from(&[
            ("DATABASE_URL", "sqlite::memory:"),
            ("JWT_ACCESS_SECRET", "access"),
            ("JWT_REFRESH_SECRET", "refresh"),
        ]))
        .unwrap();

        assert_eq!(config.server_port, 3000);
        assert_eq!(config.max_connections, 5);
        assert_eq!(config.bcrypt_cost, bcrypt::DEFAULT_COST);
        assert_eq!(config.session.access_ttl_seconds, 600);
        assert_eq!(config.session.refresh_ttl_seconds, 86400);
        assert!(!config.session.cookie_secure);
        assert!(config.admin.is_none());
    }

    #[test]
    fn test_admin_bootstrap_read_as_pair() {
        let config = Config::from_lookup(lookup_from(&[
            ("DATABASE_URL", "sqlite::memory:"),
            ("JWT_ACCESS_SECRET", "access"),
            ("JWT_REFRESH_SECRET", "refresh"),
            ("ADMIN_EMAIL", "root@example.com"),
            ("ADMIN_PASSWORD", "secret1"),
        ]))
        .unwrap();
        let admin = config.admin.unwrap();
        assert_eq!(admin.email, "root@example.com");
        assert_eq!(admin.name, "Administrator");

        let result = Config::from_lookup(lookup_from(&[
            ("DATABASE_URL", "sqlite::memory:"),
            ("JWT_ACCESS_SECRET", "access"),
            ("JWT_REFRESH_SECRET", "refresh"),
            ("ADMIN_EMAIL", "root@example.com"),
        ]));
        assert!(result.is_err());
    }

    #[test]
    fn test_missing_secret_rejected() {
        let result = Config::from_lookup(lookup_from(&[
            ("DATABASE_URL", "sqlite::memory:"),
            ("JWT_ACCESS_SECRET", "access"),
        ]));
        assert!(result.is_err());
    }

    #[test]
    fn test_shared_secret_rejected() {
        let result = Config::from_lookup(lookup_from(&[
            ("DATABASE_URL", "sqlite::memory:"),
            ("JWT_ACCESS_SECRET", "same"),
            ("JWT_REFRESH_SECRET", "same"),
        ]));
        assert!(result.is_err());
    }

    #[test]
    fn test_invalid_port_rejected() {
        let result = Config::from_lookup(lookup_from(&[
            ("DATABASE_URL", "sqlite::memory:"),
            ("JWT_ACCESS_SECRET", "access"),
            ("JWT_REFRESH_SECRET", "refresh"),
            ("SERVER_PORT", "not-a-port"),
        ]));
        assert!(result.is_err());
    }
}
