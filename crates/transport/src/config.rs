//! Transport settings
//!
//! Everything the HTTP layer needs that the protocol does not care about:
//! timeouts, TLS verification and the user agent. Deserializable so it can
//! sit in the `[transport]` table of the client configuration file.

use std::time::Duration;

use serde::Deserialize;

/// Default user agent sent with every request.
pub const DEFAULT_USER_AGENT: &str = concat!("backplane-rust-client/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct TransportConfig {
    pub connect_timeout_secs: u64,
    pub timeout_secs: u64,
    pub user_agent: String,
    /// Disable only against test servers with self-signed certificates.
    pub verify_tls: bool,
}

impl TransportConfig {
    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            connect_timeout_secs: 10,
            timeout_secs: 60,
            user_agent: DEFAULT_USER_AGENT.to_owned(),
            verify_tls: true,
        }
    }
}
