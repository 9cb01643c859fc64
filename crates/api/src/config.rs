//! Process configuration read from the environment.

use std::net::SocketAddr;

use thiserror::Error;

/// Socket address to listen on.
pub const ADDR_VAR: &str = "STOCKROOM_ADDR";
pub const DEFAULT_ADDR: &str = "0.0.0.0:4000";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{var} is not a valid socket address: {value:?}")]
    InvalidAddr { var: &'static str, value: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    pub bind_addr: SocketAddr,
}

impl ApiConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary variable source (tests pass a closure).
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let raw = lookup(ADDR_VAR)
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| {
                tracing::debug!("{ADDR_VAR} not set; using {DEFAULT_ADDR}");
                DEFAULT_ADDR.to_string()
            });

        let bind_addr = raw.parse().map_err(|_| ConfigError::InvalidAddr {
            var: ADDR_VAR,
            value: raw.clone(),
        })?;

        Ok(Self { bind_addr })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_when_unset_or_blank() {
        let cfg = ApiConfig::from_lookup(|_| None).unwrap();
        assert_eq!(cfg.bind_addr, DEFAULT_ADDR.parse::<SocketAddr>().unwrap());

        let cfg = ApiConfig::from_lookup(|_| Some("  ".to_string())).unwrap();
        assert_eq!(cfg.bind_addr.port(), 4000);
    }

    #[test]
    fn reads_override() {
        let cfg = ApiConfig::from_lookup(|k| (k == ADDR_VAR).then(|| "127.0.0.1:9000".to_string()))
            .unwrap();
        assert_eq!(cfg.bind_addr, "127.0.0.1:9000".parse::<SocketAddr>().unwrap());
    }

    #[test]
    fn rejects_garbage() {
        let err = ApiConfig::from_lookup(|_| Some("not-an-addr".to_string())).unwrap_err();
        assert_eq!(
            err,
            ConfigError::InvalidAddr {
                var: ADDR_VAR,
                value: "not-an-addr".to_string()
            }
        );
    }
}
