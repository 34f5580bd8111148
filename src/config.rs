//! # Configuration Management
//!
//! Configuration comes from the environment (and an optional `.env` file).
//!
//! ## Environment Variables
//! - `HOST`: Server bind address (default: 127.0.0.1)
//! - `PORT`: Server port (default: 8080)
//! - `GATE_ENDPOINT`: Absolute URL of the verification endpoint (required)
//! - `GATE_TIMEOUT_SECS`: Bound on the verification call (default: 30, `0` also means 30)
//! - `GATE_NAME`: Label attached to the gate's log events (default: auth_cookie)

use anyhow::{Context, Result};
use std::env;
use std::time::Duration;

use crate::gate::DEFAULT_TIMEOUT;

/// Settings of a single [`RequestGate`](crate::gate::RequestGate)
///
/// Built once at startup and never mutated afterwards. Validation of the
/// endpoint happens when the gate is constructed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GateConfig {
    /// Absolute URL of the verification endpoint, e.g. `http://auth-service/verify`
    pub endpoint: String,

    /// Bound on the outbound verification call. Zero resolves to 30s.
    pub timeout: Duration,
}

impl GateConfig {
    pub fn new(endpoint: impl Into<String>) -> Self {
        GateConfig {
            endpoint: endpoint.into(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Server host/IP address to bind to
    pub host: String,

    /// Server port number
    pub port: u16,

    /// Label for the gate in log output
    pub gate_name: String,

    pub gate: GateConfig,
}

impl Config {
    /// Load configuration from environment variables
    ///
    /// Loads `.env` first if present. A missing `GATE_ENDPOINT` is not an
    /// error here; the empty endpoint is rejected when the gate is built.
    ///
    /// ## Example .env file
    /// ```text
    /// HOST=0.0.0.0
    /// PORT=8080
    /// GATE_ENDPOINT=http://auth-service/verify
    /// GATE_TIMEOUT_SECS=5
    /// ```
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        Self::from_vars(|key| env::var(key).ok())
    }

    fn from_vars(var: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let port = var("PORT")
            .unwrap_or_else(|| "8080".to_string())
            .parse()
            .context("PORT must be a valid port number")?;

        let timeout_secs: u64 = match var("GATE_TIMEOUT_SECS") {
            Some(raw) if !raw.trim().is_empty() => raw
                .trim()
                .parse()
                .context("GATE_TIMEOUT_SECS must be a whole number of seconds")?,
            _ => 0,
        };

        Ok(Config {
            host: var("HOST").unwrap_or_else(|| "127.0.0.1".to_string()),
            port,
            gate_name: var("GATE_NAME").unwrap_or_else(|| "auth_cookie".to_string()),
            gate: GateConfig::new(var("GATE_ENDPOINT").unwrap_or_default())
                .with_timeout(Duration::from_secs(timeout_secs)),
        })
    }

    /// Socket address to bind the server to, e.g. "127.0.0.1:8080"
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn load(pairs: &[(&str, &str)]) -> Result<Config> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_vars(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = load(&[("GATE_ENDPOINT", "http://auth/verify")]).unwrap();

        assert_eq!(config.bind_address(), "127.0.0.1:8080");
        assert_eq!(config.gate_name, "auth_cookie");
        assert_eq!(config.gate.endpoint, "http://auth/verify");
        assert_eq!(config.gate.timeout, Duration::ZERO);
    }

    #[test]
    fn test_overrides() {
        let config = load(&[
            ("HOST", "0.0.0.0"),
            ("PORT", "9000"),
            ("GATE_ENDPOINT", "http://auth/verify"),
            ("GATE_TIMEOUT_SECS", "5"),
            ("GATE_NAME", "edge"),
        ])
        .unwrap();

        assert_eq!(config.bind_address(), "0.0.0.0:9000");
        assert_eq!(config.gate.timeout, Duration::from_secs(5));
        assert_eq!(config.gate_name, "edge");
    }

    #[test]
    fn test_missing_endpoint_loads_empty() {
        let config = load(&[]).unwrap();
        assert!(config.gate.endpoint.is_empty());
    }

    #[test]
    fn test_invalid_numbers_rejected() {
        assert!(load(&[("PORT", "eighty")]).is_err());
        assert!(load(&[("GATE_TIMEOUT_SECS", "-1")]).is_err());
    }

    #[test]
    fn test_gate_config_default_timeout() {
        let config = GateConfig::new("http://auth/verify");
        assert_eq!(config.timeout, Duration::from_secs(30));
    }
}
