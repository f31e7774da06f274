//! Server configuration.

use std::net::SocketAddr;

use tracing::warn;

/// Configuration for the HTTP server.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Socket address to bind.
    pub bind_addr: SocketAddr,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: ([127, 0, 0, 1], 8080).into(),
        }
    }
}

impl ServerConfig {
    /// Defaults with environment overrides (`COHORT_BIND_ADDR`).
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Ok(raw) = std::env::var("COHORT_BIND_ADDR") {
            match raw.parse() {
                Ok(addr) => config.bind_addr = addr,
                Err(_) => warn!(value = %raw, "ignoring invalid COHORT_BIND_ADDR"),
            }
        }
        config
    }
}
