//! Process configuration
//!
//! Read once at startup. Nothing below the binary touches the environment.

use anyhow::{Context, bail};
use auth::AuthConfig;
use std::net::SocketAddr;
use std::time::Duration;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8000";
const DEFAULT_FRONTEND_ORIGINS: &str = "http://localhost:3000,http://127.0.0.1:3000";
const DEFAULT_MAX_CONNECTIONS: u32 = 5;
const MAX_ACCESS_TOKEN_MINUTES: u64 = 7 * 24 * 60;
const MAX_REFRESH_TOKEN_DAYS: u64 = 365;

#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub database_url: String,
    pub database_max_connections: u32,
    pub bind_addr: SocketAddr,
    pub frontend_origins: Vec<String>,
    pub auth: AuthConfig,
}

impl ApiConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup. `JWT_SECRET` is mandatory in release
    /// builds; debug builds fall back to a random secret.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let database_url = lookup("DATABASE_URL").context("DATABASE_URL must be set")?;

        let database_max_connections = parse_or(&lookup, "DATABASE_MAX_CONNECTIONS", DEFAULT_MAX_CONNECTIONS)?;

        let bind_addr = lookup("BIND_ADDR")
            .unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string())
            .parse()
            .context("BIND_ADDR must be a socket address")?;

        let frontend_origins = lookup("FRONTEND_ORIGINS")
            .unwrap_or_else(|| DEFAULT_FRONTEND_ORIGINS.to_string())
            .split(',')
            .map(str::trim)
            .filter(|origin| !origin.is_empty())
            .map(str::to_string)
            .collect();

        let auth = match lookup("JWT_SECRET").filter(|s| !s.is_empty()) {
            Some(secret) => AuthConfig::new(secret),
            None if cfg!(debug_assertions) => AuthConfig::development(),
            None => bail!("JWT_SECRET must be set in production"),
        };

        let access_ttl = lifetime(&lookup, "ACCESS_TOKEN_EXPIRE_MINUTES", 30, MAX_ACCESS_TOKEN_MINUTES, 60)?;
        let refresh_ttl = lifetime(&lookup, "REFRESH_TOKEN_EXPIRE_DAYS", 30, MAX_REFRESH_TOKEN_DAYS, 24 * 3600)?;

        let auth = auth
            .with_access_token_ttl(access_ttl)
            .with_refresh_token_ttl(refresh_ttl);

        Ok(Self {
            database_url,
            database_max_connections,
            bind_addr,
            frontend_origins,
            auth,
        })
    }
}

fn parse_or<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> anyhow::Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .with_context(|| format!("{key} is not a valid number: {raw}")),
        None => Ok(default),
    }
}

/// Token lifetime in `1..=max` units of `unit_secs` seconds
fn lifetime(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
    default: u64,
    max: u64,
    unit_secs: u64,
) -> anyhow::Result<Duration> {
    let units: u64 = parse_or(lookup, key, default)?;
    if units == 0 || units > max {
        bail!("{key} must be between 1 and {max}, got {units}");
    }
    let secs = units
        .checked_mul(unit_secs)
        .with_context(|| format!("{key} overflows: {units}"))?;
    Ok(Duration::from_secs(secs))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = ApiConfig::from_lookup(lookup(&[
            ("DATABASE_URL", "postgres://localhost/medicitas"),
            ("JWT_SECRET", "s3cret"),
        ]))
        .unwrap();

        assert_eq!(config.database_max_connections, 5);
        assert_eq!(config.bind_addr.port(), 8000);
        assert_eq!(config.frontend_origins.len(), 2);
        assert_eq!(config.auth.jwt_secret, b"s3cret");
        assert_eq!(config.auth.expires_in_secs(), 1800);
    }

    #[test]
    fn test_overrides() {
        let config = ApiConfig::from_lookup(lookup(&[
            ("DATABASE_URL", "postgres://db/medicitas"),
            ("JWT_SECRET", "s3cret"),
            ("ACCESS_TOKEN_EXPIRE_MINUTES", "15"),
            ("REFRESH_TOKEN_EXPIRE_DAYS", "7"),
            ("FRONTEND_ORIGINS", "https://app.example.com, "),
            ("BIND_ADDR", "127.0.0.1:9000"),
        ]))
        .unwrap();

        assert_eq!(config.auth.expires_in_secs(), 900);
        assert_eq!(config.auth.refresh_token_ttl, Duration::from_secs(7 * 86_400));
        assert_eq!(config.frontend_origins, vec!["https://app.example.com"]);
        assert_eq!(config.bind_addr.port(), 9000);
    }

    #[test]
    fn test_missing_database_url() {
        assert!(ApiConfig::from_lookup(lookup(&[("JWT_SECRET", "s")])).is_err());
    }

    #[test]
    fn test_invalid_numbers() {
        let result = ApiConfig::from_lookup(lookup(&[
            ("DATABASE_URL", "postgres://db"),
            ("JWT_SECRET", "s"),
            ("ACCESS_TOKEN_EXPIRE_MINUTES", "soon"),
        ]));
        assert!(result.is_err());

        let result = ApiConfig::from_lookup(lookup(&[
            ("DATABASE_URL", "postgres://db"),
            ("JWT_SECRET", "s"),
            ("REFRESH_TOKEN_EXPIRE_DAYS", "0"),
        ]));
        assert!(result.is_err());
    }

    #[test]
    fn test_token_lifetimes_are_bounded() {
        let result = ApiConfig::from_lookup(lookup(&[
            ("DATABASE_URL", "postgres://db"),
            ("JWT_SECRET", "s"),
            ("REFRESH_TOKEN_EXPIRE_DAYS", "100000000"),
        ]));
        assert!(result.is_err());

        let result = ApiConfig::from_lookup(lookup(&[
            ("DATABASE_URL", "postgres://db"),
            ("JWT_SECRET", "s"),
            ("ACCESS_TOKEN_EXPIRE_MINUTES", "18446744073709551615"),
        ]));
        assert!(result.is_err());

        let config = ApiConfig::from_lookup(lookup(&[
            ("DATABASE_URL", "postgres://db"),
            ("JWT_SECRET", "s"),
            ("ACCESS_TOKEN_EXPIRE_MINUTES", "10080"),
            ("REFRESH_TOKEN_EXPIRE_DAYS", "365"),
        ]))
        .unwrap();
        assert_eq!(config.auth.expires_in_secs(), 604_800);
        assert_eq!(config.auth.refresh_token_ttl, Duration::from_secs(365 * 86_400));
    }
}
