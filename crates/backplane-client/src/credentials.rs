//! Client credentials for a Backplane server
//!
//! Fixed at construction: a `BackplaneClient` owns its credentials and only
//! hands out shared references, so the URL, id and secret cannot change for
//! the life of the client.

use std::fmt;

use common::Secret;

use transport::BasicAuth;

#[derive(Clone)]
pub struct ClientCredentials {
    server_url: String,
    client_id: String,
    client_secret: Secret<String>,
    redirect_uri: Option<String>,
}

impl ClientCredentials {
    pub fn new(
        server_url: impl Into<String>,
        client_id: impl Into<String>,
        client_secret: impl Into<Secret<String>>,
    ) -> Self {
        Self {
            server_url: server_url.into(),
            client_id: client_id.into(),
            client_secret: client_secret.into(),
            redirect_uri: None,
        }
    }

    /// Redirect URI registered for this client. Not used by any protocol call.
    pub fn with_redirect_uri(mut self, redirect_uri: impl Into<String>) -> Self {
        self.redirect_uri = Some(redirect_uri.into());
        self
    }

    pub fn server_url(&self) -> &str {
        &self.server_url
    }

    pub fn client_id(&self) -> &str {
        &self.client_id
    }

    pub fn client_secret(&self) -> &Secret<String> {
        &self.client_secret
    }

    pub fn redirect_uri(&self) -> Option<&str> {
        self.redirect_uri.as_deref()
    }

    /// Absolute URL for an endpoint path such as `/v2/token`.
    pub(crate) fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.server_url.trim_end_matches('/'), path)
    }

    pub(crate) fn basic_auth(&self) -> BasicAuth<'_> {
        BasicAuth {
            username: &self.client_id,
            password: self.client_secret.expose(),
        }
    }
}

impl fmt::Debug for ClientCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientCredentials")
            .field("server_url", &self.server_url)
            .field("client_id", &self.client_id)
            .field("client_secret", &self.client_secret)
            .field("redirect_uri", &self.redirect_uri)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accessors_return_constructed_values() {
        let credentials = ClientCredentials::new("foo.com", "clientId", "secret")
            .with_redirect_uri("redirecturi.com");

        assert_eq!(credentials.server_url(), "foo.com");
        assert_eq!(credentials.client_id(), "clientId");
        assert_eq!(credentials.client_secret().expose(), "secret");
        assert_eq!(credentials.redirect_uri(), Some("redirecturi.com"));
    }

    #[test]
    fn redirect_uri_defaults_to_none() {
        let credentials = ClientCredentials::new("https://bp.example.com", "id", "secret");
        assert_eq!(credentials.redirect_uri(), None);
    }

    #[test]
    fn endpoint_joins_without_double_slash() {
        let plain = ClientCredentials::new("https://bp.example.com", "id", "secret");
        let slashed = ClientCredentials::new("https://bp.example.com/", "id", "secret");
        assert_eq!(plain.endpoint("/v2/token"), "https://bp.example.com/v2/token");
        assert_eq!(slashed.endpoint("/v2/token"), "https://bp.example.com/v2/token");
    }

    #[test]
    fn basic_auth_uses_id_and_secret() {
        let credentials = ClientCredentials::new("https://bp.example.com", "id", "secret");
        let auth = credentials.basic_auth();
        assert_eq!(auth.username, "id");
        assert_eq!(auth.password, "secret");
    }

    #[test]
    fn debug_redacts_secret() {
        let credentials = ClientCredentials::new("https://bp.example.com", "id", "hunter2");
        let debug = format!("{credentials:?}");
        assert!(debug.contains("https://bp.example.com"));
        assert!(!debug.contains("hunter2"), "got: {debug}");
    }
}
