use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::time::Duration;

use super::errors::ConfigError;

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct UpstreamConfig {
    /// `ip:port` of the resolver allowed questions are forwarded to
    #[serde(default = "default_server")]
    pub server: String,

    /// Seconds to wait for the upstream reply
    #[serde(default = "default_query_timeout")]
    pub query_timeout: u64,

    /// Answer without an upstream round trip when every question was blocked
    #[serde(default = "default_true")]
    pub skip_empty_queries: bool,
}

impl UpstreamConfig {
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        self.server.parse().map_err(|e| {
            ConfigError::Validation(format!("Invalid upstream address '{}': {}", self.server, e))
        })
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.query_timeout)
    }
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            server: default_server(),
            query_timeout: default_query_timeout(),
            skip_empty_queries: true,
        }
    }
}

fn default_server() -> String {
    "8.8.8.8:53".to_string()
}

fn default_query_timeout() -> u64 {
    5
}

fn default_true() -> bool {
    true
}
