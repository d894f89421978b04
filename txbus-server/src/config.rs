//! Server configuration from environment variables.

use std::net::SocketAddr;
use std::path::PathBuf;

use crate::schedule::{DEFAULT_BASE_URL, SubmitMode};

/// Default listen address. The schedule API conventionally takes 3000.
pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:3001";

/// Default outbound request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Errors from reading configuration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid {var}: {reason}")]
pub struct ConfigError {
    var: &'static str,
    reason: String,
}

/// Process configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Address to listen on (`TXBUS_BIND_ADDR`)
    pub bind_addr: SocketAddr,
    /// Schedule API base URL (`TXBUS_API_BASE_URL`)
    pub api_base_url: String,
    /// Schedule API request shape (`TXBUS_SUBMIT_MODE`)
    pub submit_mode: SubmitMode,
    /// Outbound request timeout (`TXBUS_TIMEOUT_SECS`)
    pub timeout_secs: u64,
    /// Serve itineraries from this file instead of the API (`TXBUS_MOCK_DATA`)
    pub mock_data: Option<PathBuf>,
}

impl AppConfig {
    /// Read configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Read configuration through `lookup`. Unset or empty variables take
    /// their defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |var: &str| lookup(var).filter(|v| !v.trim().is_empty());

        let bind_addr = get("TXBUS_BIND_ADDR")
            .unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string())
            .trim()
            .parse::<SocketAddr>()
            .map_err(|e| ConfigError {
                var: "TXBUS_BIND_ADDR",
                reason: e.to_string(),
            })?;

        let api_base_url = get("TXBUS_API_BASE_URL")
            .map(|v| v.trim().to_string())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        if !api_base_url.starts_with("http://") && !api_base_url.starts_with("https://") {
            return Err(ConfigError {
                var: "TXBUS_API_BASE_URL",
                reason: format!("{api_base_url:?} is not an http(s) URL"),
            });
        }

        let submit_mode = match get("TXBUS_SUBMIT_MODE") {
            Some(v) => v.parse().map_err(|reason| ConfigError {
                var: "TXBUS_SUBMIT_MODE",
                reason,
            })?,
            None => SubmitMode::default(),
        };

        let timeout_secs = match get("TXBUS_TIMEOUT_SECS") {
            Some(v) => match v.trim().parse::<u64>() {
                Ok(n) if n > 0 => n,
                _ => {
                    return Err(ConfigError {
                        var: "TXBUS_TIMEOUT_SECS",
                        reason: format!("{v:?} is not a positive number of seconds"),
                    });
                }
            },
            None => DEFAULT_TIMEOUT_SECS,
        };

        let mock_data = get("TXBUS_MOCK_DATA").map(PathBuf::from);

        Ok(Self {
            bind_addr,
            api_base_url,
            submit_mode,
            timeout_secs,
            mock_data,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config(vars: &[(&str, &str)]) -> Result<AppConfig, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::from_lookup(|k| vars.get(k).cloned())
    }

    #[test]
    fn defaults() {
        let c = config(&[]).unwrap();
        assert_eq!(c.bind_addr, DEFAULT_BIND_ADDR.parse::<SocketAddr>().unwrap());
        assert_eq!(c.api_base_url, DEFAULT_BASE_URL);
        assert_eq!(c.submit_mode, SubmitMode::Get);
        assert_eq!(c.timeout_secs, DEFAULT_TIMEOUT_SECS);
        assert_eq!(c.mock_data, None);
    }

    #[test]
    fn empty_values_take_defaults() {
        let c = config(&[("TXBUS_SUBMIT_MODE", ""), ("TXBUS_MOCK_DATA", "  ")]).unwrap();
        assert_eq!(c.submit_mode, SubmitMode::Get);
        assert_eq!(c.mock_data, None);
    }

    #[test]
    fn overrides() {
        let c = config(&[
            ("TXBUS_BIND_ADDR", "0.0.0.0:8080"),
            ("TXBUS_API_BASE_URL", "https://txbus.example.com"),
            ("TXBUS_SUBMIT_MODE", "POST"),
            ("TXBUS_TIMEOUT_SECS", "5"),
            ("TXBUS_MOCK_DATA", "data/sample_itineraries.json"),
        ])
        .unwrap();
        assert_eq!(c.bind_addr, "0.0.0.0:8080".parse::<SocketAddr>().unwrap());
        assert_eq!(c.api_base_url, "https://txbus.example.com");
        assert_eq!(c.submit_mode, SubmitMode::Post);
        assert_eq!(c.timeout_secs, 5);
        assert_eq!(
            c.mock_data,
            Some(PathBuf::from("data/sample_itineraries.json"))
        );
    }

    #[test]
    fn invalid_values() {
        let err = config(&[("TXBUS_BIND_ADDR", "localhost")]).unwrap_err();
        assert!(err.to_string().starts_with("invalid TXBUS_BIND_ADDR"));

        let err = config(&[("TXBUS_API_BASE_URL", "ftp://nope")]).unwrap_err();
        assert!(err.to_string().starts_with("invalid TXBUS_API_BASE_URL"));

        let err = config(&[("TXBUS_SUBMIT_MODE", "put")]).unwrap_err();
        assert!(err.to_string().contains("unknown submit mode"));

        let err = config(&[("TXBUS_TIMEOUT_SECS", "0")]).unwrap_err();
        assert!(err.to_string().starts_with("invalid TXBUS_TIMEOUT_SECS"));
    }
}
