//! Configuration loading and representation.

use std::str::FromStr;

use thiserror::Error;

const DEFAULT_PORT: u16 = 3003;
const DEFAULT_TOKEN_TTL_SECS: i64 = 3600;
const DEFAULT_BCRYPT_COST: u32 = bloglist_auth::password::DEFAULT_COST;
const DEV_JWT_SECRET: &str = "dev-secret";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{name} must be {expected}, got {value:?}")]
    Invalid {
        name: &'static str,
        expected: &'static str,
        value: String,
    },
}

/// Process configuration, read from the environment once at startup.
#[derive(Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Postgres URL. `None` runs against the in-memory store.
    pub database_url: Option<String>,
    pub jwt_secret: String,
    pub port: u16,
    pub token_ttl_secs: i64,
    pub bcrypt_cost: u32,
}

impl core::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("AppConfig")
            .field("database_url", &self.database_url.as_ref().map(|_| "<set>"))
            .field("jwt_secret", &"<redacted>")
            .field("port", &self.port)
            .field("token_ttl_secs", &self.token_ttl_secs)
            .field("bcrypt_cost", &self.bcrypt_cost)
            .finish()
    }
}

impl AppConfig {
    /// Load configuration from environment variables.
    ///
    /// - `DATABASE_URL`: Postgres connection string (optional)
    /// - `JWT_SECRET`: token signing secret (default: insecure dev value)
    /// - `PORT`: listening port (default: 3003)
    /// - `TOKEN_TTL_SECS`: token lifetime in seconds (default: 3600)
    /// - `BCRYPT_COST`: bcrypt cost factor, 4..=31 (default: 10)
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Same as [`AppConfig::from_env`], reading from an arbitrary source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let jwt_secret = var("JWT_SECRET").unwrap_or_else(|| {
            tracing::warn!("JWT_SECRET not set; using insecure dev default");
            DEV_JWT_SECRET.to_string()
        });

        let token_ttl_secs = parse_or(
            var("TOKEN_TTL_SECS"),
            "TOKEN_TTL_SECS",
            "a positive integer",
            DEFAULT_TOKEN_TTL_SECS,
        )?;
        if token_ttl_secs <= 0 {
            return Err(invalid("TOKEN_TTL_SECS", "a positive integer", token_ttl_secs.to_string()));
        }

        let bcrypt_cost = parse_or(
            var("BCRYPT_COST"),
            "BCRYPT_COST",
            "an integer in 4..=31",
            DEFAULT_BCRYPT_COST,
        )?;
        if !(4..=31).contains(&bcrypt_cost) {
            return Err(invalid("BCRYPT_COST", "an integer in 4..=31", bcrypt_cost.to_string()));
        }

        Ok(Self {
            database_url: var("DATABASE_URL"),
            jwt_secret,
            port: parse_or(var("PORT"), "PORT", "a port number", DEFAULT_PORT)?,
            token_ttl_secs,
            bcrypt_cost,
        })
    }

    pub fn bind_addr(&self) -> String {
        format!("0.0.0.0:{}", self.port)
    }

    /// Defaults suitable for tests: in-memory store, fixed secret, cheapest bcrypt cost.
    pub fn for_tests(jwt_secret: impl Into<String>) -> Self {
        Self {
            database_url: None,
            jwt_secret: jwt_secret.into(),
            port: 0,
            token_ttl_secs: DEFAULT_TOKEN_TTL_SECS,
            bcrypt_cost: 4,
        }
    }
}

fn parse_or<T: FromStr>(
    raw: Option<String>,
    name: &'static str,
    expected: &'static str,
    default: T,
) -> Result<T, ConfigError> {
    match raw {
        Some(value) => value.trim().parse().map_err(|_| invalid(name, expected, value)),
        None => Ok(default),
    }
}

fn invalid(name: &'static str, expected: &'static str, value: String) -> ConfigError {
    ConfigError::Invalid {
        name,
        expected,
        value,
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn load(vars: &[(&str, &str)]) -> Result<AppConfig, ConfigError> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::from_lookup(|name| map.get(name).cloned())
    }

    #[test]
    fn defaults_apply_when_unset() {
        let cfg = load(&[]).unwrap();
        assert_eq!(cfg.database_url, None);
        assert_eq!(cfg.jwt_secret, DEV_JWT_SECRET);
        assert_eq!(cfg.port, 3003);
        assert_eq!(cfg.token_ttl_secs, 3600);
        assert_eq!(cfg.bcrypt_cost, 10);
    }

    #[test]
    fn reads_values_from_source() {
        let cfg = load(&[
            ("DATABASE_URL", "postgres://localhost/bloglist"),
            ("JWT_SECRET", "s3cret"),
            ("PORT", "8080"),
            ("TOKEN_TTL_SECS", "60"),
            ("BCRYPT_COST", "12"),
        ])
        .unwrap();

        assert_eq!(cfg.database_url.as_deref(), Some("postgres://localhost/bloglist"));
        assert_eq!(cfg.jwt_secret, "s3cret");
        assert_eq!(cfg.bind_addr(), "0.0.0.0:8080");
        assert_eq!(cfg.token_ttl_secs, 60);
        assert_eq!(cfg.bcrypt_cost, 12);
    }

    #[test]
    fn blank_values_count_as_unset() {
        let cfg = load(&[("DATABASE_URL", "  ")]).unwrap();
        assert_eq!(cfg.database_url, None);
    }

    #[test]
    fn malformed_numbers_are_rejected() {
        let err = load(&[("PORT", "eighty")]).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { name: "PORT", .. }));

        let err = load(&[("BCRYPT_COST", "2")]).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { name: "BCRYPT_COST", .. }));

        let err = load(&[("TOKEN_TTL_SECS", "0")]).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { name: "TOKEN_TTL_SECS", .. }));
    }

    #[test]
    fn debug_output_hides_secrets() {
        let cfg = load(&[("JWT_SECRET", "s3cret"), ("DATABASE_URL", "postgres://u:pw@db/x")]).unwrap();
        let out = format!("{cfg:?}");
        assert!(!out.contains("s3cret"));
        assert!(!out.contains("pw@db"));
    }
}
