//! Gateway configuration, populated from environment variables.

use std::net::SocketAddr;
use std::time::Duration;

/// Errors raised while reading configuration from the environment.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{var} has an invalid value {value:?}")]
    Invalid { var: &'static str, value: String },
}

/// Connection settings for the upstream HSD node.
///
/// Injected into [`crate::upstream::NodeClient::new`] so tests can point a
/// client at a mock node.
#[derive(Debug, Clone)]
pub struct NodeConfig {
    pub host: String,
    pub port: u16,
    /// Sent as the basic-auth password (username `x`). `None` sends no credentials.
    pub api_key: Option<String>,
    /// Transport timeout applied to every upstream request.
    pub timeout: Duration,
}

impl NodeConfig {
    pub const API_KEY_USER: &'static str = "x";

    /// `http://{host}:{port}` without credentials.
    pub fn base_url(&self) -> String {
        format!("http://{}:{}", self.host, self.port)
    }

    /// Base URL for log output, with the API key redacted.
    pub fn display_url(&self) -> String {
        match self.api_key {
            Some(_) => format!("http://{}:***@{}:{}", Self::API_KEY_USER, self.host, self.port),
            None => self.base_url(),
        }
    }
}

impl Default for NodeConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".into(),
            port: 12037,
            api_key: None,
            timeout: Duration::from_secs(10),
        }
    }
}

/// Runtime configuration for the gateway.
///
/// | Variable | Default | Description |
/// |----------|---------|-------------|
/// | `HSD_HOST` | `127.0.0.1` | Upstream node host |
/// | `HSD_PORT` | `12037` | Upstream node HTTP port |
/// | `HSD_API_KEY` | (absent) | Node API key; empty means no credentials |
/// | `HSD_TIMEOUT_SECS` | `10` | Per-request upstream timeout |
/// | `GATEWAY_BIND` | `127.0.0.1:5000` | TCP socket address to listen on |
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    pub node: NodeConfig,
    pub bind_addr: SocketAddr,
}

impl GatewayConfig {
    /// Populate config from environment variables, applying defaults where absent.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = NodeConfig::default();

        let host = lookup("HSD_HOST").unwrap_or(defaults.host);
        let port = parse_or("HSD_PORT", lookup("HSD_PORT"), defaults.port)?;
        let timeout_secs = parse_or(
            "HSD_TIMEOUT_SECS",
            lookup("HSD_TIMEOUT_SECS"),
            defaults.timeout.as_secs(),
        )?;
        let api_key = lookup("HSD_API_KEY").filter(|k| !k.is_empty());
        let bind_addr = parse_or(
            "GATEWAY_BIND",
            lookup("GATEWAY_BIND"),
            SocketAddr::from(([127, 0, 0, 1], 5000)),
        )?;

        Ok(Self {
            node: NodeConfig {
                host,
                port,
                api_key,
                timeout: Duration::from_secs(timeout_secs),
            },
            bind_addr,
        })
    }
}

fn parse_or<T: std::str::FromStr>(
    var: &'static str,
    raw: Option<String>,
    default: T,
) -> Result<T, ConfigError> {
    match raw {
        None => Ok(default),
        Some(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid { var, value }),
    }
}
