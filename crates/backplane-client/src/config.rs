//! Configuration types and loading
//!
//! Precedence: explicit path > `BACKPLANE_CONFIG` env var > `backplane.toml`.
//! The client secret is read from `BACKPLANE_CLIENT_SECRET` or from
//! `client_secret_file`, never from the TOML itself.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use common::Secret;
use serde::Deserialize;
use transport::{ReqwestTransport, TransportConfig};

use crate::client::BackplaneClient;
use crate::credentials::ClientCredentials;

pub const SECRET_ENV: &str = "BACKPLANE_CLIENT_SECRET";
pub const CONFIG_PATH_ENV: &str = "BACKPLANE_CONFIG";
pub const DEFAULT_CONFIG_PATH: &str = "backplane.toml";

/// Root configuration
#[derive(Debug, Deserialize)]
pub struct Config {
    pub backplane: ServerConfig,
    #[serde(default)]
    pub transport: TransportConfig,
}

/// Backplane server and client registration
#[derive(Debug, Deserialize)]
pub struct ServerConfig {
    pub server_url: String,
    pub client_id: String,
    #[serde(skip)]
    pub client_secret: Option<Secret<String>>,
    #[serde(default)]
    pub client_secret_file: Option<PathBuf>,
    #[serde(default)]
    pub redirect_uri: Option<String>,
}

impl Config {
    /// Load a TOML file, validate it, and resolve the client secret.
    pub fn load(path: &Path) -> common::Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let mut config: Config = toml::from_str(&contents)?;

        let url = &config.backplane.server_url;
        if !url.starts_with("http://") && !url.starts_with("https://") {
            return Err(common::Error::Config(format!(
                "server_url must start with http:// or https://, got: {url}"
            )));
        }

        if config.transport.timeout_secs == 0 {
            return Err(common::Error::Config(
                "timeout_secs must be greater than 0".into(),
            ));
        }

        if config.transport.connect_timeout_secs == 0 {
            return Err(common::Error::Config(
                "connect_timeout_secs must be greater than 0".into(),
            ));
        }

        config.backplane.client_secret = Some(resolve_secret(&config.backplane)?);
        Ok(config)
    }

    /// Resolve config file path from an explicit argument or the env var.
    pub fn resolve_path(explicit: Option<&str>) -> PathBuf {
        if let Some(p) = explicit {
            return PathBuf::from(p);
        }
        if let Ok(p) = std::env::var(CONFIG_PATH_ENV) {
            return PathBuf::from(p);
        }
        PathBuf::from(DEFAULT_CONFIG_PATH)
    }

    pub fn credentials(&self) -> common::Result<ClientCredentials> {
        let server = &self.backplane;
        let secret = server.client_secret.clone().ok_or_else(|| {
            common::Error::Config("client secret has not been resolved".into())
        })?;
        let credentials = ClientCredentials::new(&server.server_url, &server.client_id, secret);
        Ok(match &server.redirect_uri {
            Some(uri) => credentials.with_redirect_uri(uri),
            None => credentials,
        })
    }

    /// Build a client backed by a reqwest transport using `[transport]`.
    pub fn build_client(&self) -> crate::Result<BackplaneClient> {
        let credentials = self.credentials()?;
        let transport = ReqwestTransport::new(&self.transport)?;
        Ok(BackplaneClient::new(credentials, Arc::new(transport)))
    }
}

/// Env var wins over the secret file. A blank file counts as missing.
fn resolve_secret(server: &ServerConfig) -> common::Result<Secret<String>> {
    if let Ok(secret) = std::env::var(SECRET_ENV) {
        return Ok(Secret::new(secret));
    }

    let Some(path) = &server.client_secret_file else {
        return Err(common::Error::Config(format!(
            "client secret missing: set {SECRET_ENV} or client_secret_file"
        )));
    };

    let secret = std::fs::read_to_string(path).map_err(|e| {
        common::Error::Config(format!(
            "failed to read client_secret_file {}: {e}",
            path.display()
        ))
    })?;
    let secret = secret.trim();
    if secret.is_empty() {
        return Err(common::Error::Config(format!(
            "client_secret_file {} is empty",
            path.display()
        )));
    }
    Ok(Secret::new(secret.to_owned()))
}
