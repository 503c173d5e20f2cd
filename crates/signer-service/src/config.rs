//! Service configuration
//!
//! Read from the environment at startup. Only the signature secret is
//! mandatory; everything else has a default.
//!
//! | Variable | Default |
//! |----------|---------|
//! | `SIGNER_SIGNATURE_SECRET` | required |
//! | `SIGNER_PORT` (or `PORT`) | `3000` |
//! | `SIGNER_BIND_ADDR` | `127.0.0.1` |
//! | `SIGNER_DATABASE_URL` | `sqlite://signer.db` (`memory` for in-memory) |
//! | `SIGNER_JWT_AUDIENCE` | unset |
//! | `SIGNER_JWT_ISSUER` | unset |
//! | `SIGNER_JWT_LEEWAY_SECS` | `0` |
//! | `SIGNER_LOG_LEVEL` | `info` |
//! | `SIGNER_REQUEST_TIMEOUT_SECS` | `10` |

use signer_bridge::JwtExtractorConfig;
use std::fmt;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;
use tracing::Level;

/// Database URL that selects the in-memory store
pub const MEMORY_DATABASE_URL: &str = "memory";

const DEFAULT_PORT: u16 = 3000;
const DEFAULT_DATABASE_URL: &str = "sqlite://signer.db";
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 10;

/// Configuration errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("{var} has invalid value {value:?}: {reason}")]
    Invalid {
        var: &'static str,
        value: String,
        reason: String,
    },
}

/// Runtime configuration for the signing service
#[derive(Clone)]
pub struct ServiceConfig {
    pub bind_addr: IpAddr,
    pub port: u16,
    pub database_url: String,
    pub signature_secret: String,
    pub jwt_audience: Option<String>,
    pub jwt_issuer: Option<String>,
    pub jwt_leeway_secs: u64,
    pub log_level: Level,
    pub request_timeout: Duration,
}

impl fmt::Debug for ServiceConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServiceConfig")
            .field("bind_addr", &self.bind_addr)
            .field("port", &self.port)
            .field("database_url", &self.database_url)
            .field("signature_secret", &"[redacted]")
            .field("jwt_audience", &self.jwt_audience)
            .field("jwt_issuer", &self.jwt_issuer)
            .field("jwt_leeway_secs", &self.jwt_leeway_secs)
            .field("log_level", &self.log_level)
            .field("request_timeout", &self.request_timeout)
            .finish()
    }
}

impl ServiceConfig {
    /// Load from process environment
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load using an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let signature_secret =
            var("SIGNER_SIGNATURE_SECRET").ok_or(ConfigError::Missing("SIGNER_SIGNATURE_SECRET"))?;

        let port = match var("SIGNER_PORT") {
            Some(value) => parse_var("SIGNER_PORT", value)?,
            None => match var("PORT") {
                Some(value) => parse_var("PORT", value)?,
                None => DEFAULT_PORT,
            },
        };

        let bind_addr = match var("SIGNER_BIND_ADDR") {
            Some(value) => parse_var("SIGNER_BIND_ADDR", value)?,
            None => IpAddr::V4(Ipv4Addr::LOCALHOST),
        };

        let log_level = match var("SIGNER_LOG_LEVEL") {
            Some(value) => parse_var("SIGNER_LOG_LEVEL", value)?,
            None => Level::INFO,
        };

        let jwt_leeway_secs = match var("SIGNER_JWT_LEEWAY_SECS") {
            Some(value) => parse_var("SIGNER_JWT_LEEWAY_SECS", value)?,
            None => 0,
        };

        let timeout_secs: u64 = match var("SIGNER_REQUEST_TIMEOUT_SECS") {
            Some(value) => parse_var("SIGNER_REQUEST_TIMEOUT_SECS", value)?,
            None => DEFAULT_REQUEST_TIMEOUT_SECS,
        };
        if timeout_secs == 0 {
            return Err(ConfigError::Invalid {
                var: "SIGNER_REQUEST_TIMEOUT_SECS",
                value: "0".into(),
                reason: "must be positive".into(),
            });
        }

        Ok(Self {
            bind_addr,
            port,
            database_url: var("SIGNER_DATABASE_URL").unwrap_or_else(|| DEFAULT_DATABASE_URL.into()),
            signature_secret,
            jwt_audience: var("SIGNER_JWT_AUDIENCE"),
            jwt_issuer: var("SIGNER_JWT_ISSUER"),
            jwt_leeway_secs,
            log_level,
            request_timeout: Duration::from_secs(timeout_secs),
        })
    }

    /// Socket address to listen on
    pub fn listen_addr(&self) -> SocketAddr {
        SocketAddr::new(self.bind_addr, self.port)
    }

    /// Credential verification settings
    pub fn jwt_config(&self) -> JwtExtractorConfig {
        let mut config = JwtExtractorConfig::new(self.signature_secret.clone())
            .with_leeway_secs(self.jwt_leeway_secs);
        if let Some(ref aud) = self.jwt_audience {
            config = config.with_audience(aud.clone());
        }
        if let Some(ref iss) = self.jwt_issuer {
            config = config.with_issuer(iss.clone());
        }
        config
    }
}

fn parse_var<T>(var: &'static str, value: String) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: fmt::Display,
{
    value.trim().parse().map_err(|e: T::Err| ConfigError::Invalid {
        var,
        reason: e.to_string(),
        value,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn load(vars: &[(&str, &str)]) -> Result<ServiceConfig, ConfigError> {
        let env: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        ServiceConfig::from_lookup(|key| env.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = load(&[("SIGNER_SIGNATURE_SECRET", "s3cret")]).unwrap();

        assert_eq!(config.port, 3000);
        assert_eq!(config.listen_addr().to_string(), "127.0.0.1:3000");
        assert_eq!(config.database_url, "sqlite://signer.db");
        assert_eq!(config.log_level, Level::INFO);
        assert_eq!(config.request_timeout, Duration::from_secs(10));
        assert_eq!(config.jwt_audience, None);
    }

    #[test]
    fn test_secret_required() {
        assert_eq!(
            load(&[]).unwrap_err(),
            ConfigError::Missing("SIGNER_SIGNATURE_SECRET")
        );
        assert_eq!(
            load(&[("SIGNER_SIGNATURE_SECRET", "  ")]).unwrap_err(),
            ConfigError::Missing("SIGNER_SIGNATURE_SECRET")
        );
    }

    #[test]
    fn test_port_fallback_and_precedence() {
        let config = load(&[("SIGNER_SIGNATURE_SECRET", "s"), ("PORT", "4000")]).unwrap();
        assert_eq!(config.port, 4000);

        let config = load(&[
            ("SIGNER_SIGNATURE_SECRET", "s"),
            ("PORT", "4000"),
            ("SIGNER_PORT", "5000"),
        ])
        .unwrap();
        assert_eq!(config.port, 5000);
    }

    #[test]
    fn test_invalid_values() {
        let err = load(&[("SIGNER_SIGNATURE_SECRET", "s"), ("SIGNER_PORT", "http")]).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { var: "SIGNER_PORT", .. }));

        let err = load(&[("SIGNER_SIGNATURE_SECRET", "s"), ("SIGNER_LOG_LEVEL", "loud")]).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { var: "SIGNER_LOG_LEVEL", .. }));

        let err = load(&[("SIGNER_SIGNATURE_SECRET", "s"), ("SIGNER_REQUEST_TIMEOUT_SECS", "0")]).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { var: "SIGNER_REQUEST_TIMEOUT_SECS", .. }));
    }

    #[test]
    fn test_overrides() {
        let config = load(&[
            ("SIGNER_SIGNATURE_SECRET", "s"),
            ("SIGNER_BIND_ADDR", "0.0.0.0"),
            ("SIGNER_DATABASE_URL", "memory"),
            ("SIGNER_JWT_AUDIENCE", "signer"),
            ("SIGNER_JWT_ISSUER", "https://issuer.example.com"),
            ("SIGNER_LOG_LEVEL", "debug"),
        ])
        .unwrap();

        assert_eq!(config.listen_addr().to_string(), "0.0.0.0:3000");
        assert_eq!(config.database_url, MEMORY_DATABASE_URL);
        assert_eq!(config.log_level, Level::DEBUG);

        let jwt = config.jwt_config();
        assert_eq!(jwt.audience.as_deref(), Some("signer"));
        assert_eq!(jwt.issuer.as_deref(), Some("https://issuer.example.com"));
    }

    #[test]
    fn test_debug_redacts_secret() {
        let config = load(&[("SIGNER_SIGNATURE_SECRET", "hunter2")]).unwrap();
        assert!(!format!("{:?}", config).contains("hunter2"));
    }
}
