//! Process configuration parsed from environment variables.
//!
//! Required:
//! - `TRELLO_KEY`, `TRELLO_TOKEN`: provider credentials
//!
//! Optional:
//! - `TRELLO_BASE_URL`: default `https://api.trello.com/1`
//! - `PORT`: default 4000
//! - `CORS_ORIGIN`: allowed browser origin, any origin when unset
//! - `UPSTREAM_TIMEOUT_SECS`: default 30
//! - `UPSTREAM_CONNECT_TIMEOUT_SECS`: default 10
//! - `WS_HEARTBEAT_INTERVAL_SECS`: default 25
//! - `WS_CLIENT_TIMEOUT_SECS`: default 60

use std::time::Duration;
use thiserror::Error;

use crate::provider::ProviderConfig;
use crate::websockets::HeartbeatConfig;

pub const DEFAULT_PORT: u16 = 4000;
pub const DEFAULT_HEARTBEAT_INTERVAL_SECS: u64 = 25;
pub const DEFAULT_CLIENT_TIMEOUT_SECS: u64 = 60;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("{var} has invalid value '{value}'")]
    Invalid { var: &'static str, value: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub port: u16,
    pub cors_origin: Option<String>,
    pub provider: ProviderConfig,
    pub heartbeat: HeartbeatConfig,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from any key lookup, so tests need not touch the process env
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let key = required(&lookup, "TRELLO_KEY")?;
        let token = required(&lookup, "TRELLO_TOKEN")?;
        let base_url = lookup("TRELLO_BASE_URL")
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| crate::provider::DEFAULT_TRELLO_BASE_URL.to_string())
            .trim_end_matches('/')
            .to_string();

        let port = parse_or(&lookup, "PORT", DEFAULT_PORT)?;
        let request_timeout = secs_or(
            &lookup,
            "UPSTREAM_TIMEOUT_SECS",
            crate::provider::DEFAULT_REQUEST_TIMEOUT_SECS,
        )?;
        let connect_timeout = secs_or(
            &lookup,
            "UPSTREAM_CONNECT_TIMEOUT_SECS",
            crate::provider::DEFAULT_CONNECT_TIMEOUT_SECS,
        )?;
        let heartbeat = HeartbeatConfig {
            interval: secs_or(
                &lookup,
                "WS_HEARTBEAT_INTERVAL_SECS",
                DEFAULT_HEARTBEAT_INTERVAL_SECS,
            )?,
            timeout: secs_or(&lookup, "WS_CLIENT_TIMEOUT_SECS", DEFAULT_CLIENT_TIMEOUT_SECS)?,
        };
        if heartbeat.timeout <= heartbeat.interval {
            return Err(ConfigError::Invalid {
                var: "WS_CLIENT_TIMEOUT_SECS",
                value: heartbeat.timeout.as_secs().to_string(),
            });
        }

        Ok(Self {
            port,
            cors_origin: lookup("CORS_ORIGIN").filter(|v| !v.trim().is_empty()),
            provider: ProviderConfig {
                base_url,
                key,
                token,
                request_timeout,
                connect_timeout,
            },
            heartbeat,
        })
    }
}

fn required(
    lookup: &impl Fn(&str) -> Option<String>,
    var: &'static str,
) -> Result<String, ConfigError> {
    lookup(var)
        .filter(|v| !v.trim().is_empty())
        .ok_or(ConfigError::Missing(var))
}

fn parse_or<T: std::str::FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    var: &'static str,
    default: T,
) -> Result<T, ConfigError> {
    match lookup(var) {
        None => Ok(default),
        Some(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid { var, value }),
    }
}

fn secs_or(
    lookup: &impl Fn(&str) -> Option<String>,
    var: &'static str,
    default: u64,
) -> Result<Duration, ConfigError> {
    let secs: u64 = parse_or(lookup, var, default)?;
    if secs == 0 {
        return Err(ConfigError::Invalid {
            var,
            value: secs.to_string(),
        });
    }
    Ok(Duration::from_secs(secs))
}
