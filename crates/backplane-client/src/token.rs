//! Access tokens and token endpoint payloads
//!
//! The token endpoint answers both the client-credentials grant and the
//! refresh grant with the same JSON shape:
//!
//! ```json
//! {"token_type":"Bearer","access_token":"AA1","expires_in":604799,
//!  "scope":"bus:foo.com channel:channel_foo","refresh_token":"AR1"}
//! ```
//!
//! Regular (public) tokens come back in the same shape wrapped in a JSONP
//! callback, `f({...});`.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

use crate::error::{Error, Result};
use crate::scope::{retrieve_bus_from_scope, retrieve_channel_from_scope};

/// OAuth grant used when requesting a token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GrantType {
    ClientCredentials,
    RefreshToken,
}

impl GrantType {
    pub fn as_str(&self) -> &'static str {
        match self {
            GrantType::ClientCredentials => "client_credentials",
            GrantType::RefreshToken => "refresh_token",
        }
    }
}

impl fmt::Display for GrantType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Bearer token issued by a Backplane server.
///
/// Immutable: a refresh produces a new `AccessToken` rather than updating
/// this one. `expires_in` is seconds from issuance, not a timestamp.
/// Serializes to the token endpoint's JSON shape, so a stored token can be
/// read back and installed with `BackplaneClient::set_access_token`.
#[derive(Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct AccessToken {
    access_token: String,
    /// Absent for regular tokens
    #[serde(default, skip_serializing_if = "Option::is_none")]
    refresh_token: Option<String>,
    token_type: String,
    #[serde(deserialize_with = "lenient_seconds")]
    expires_in: u64,
    #[serde(default)]
    scope: String,
}

impl AccessToken {
    pub fn new(
        access_token: impl Into<String>,
        refresh_token: Option<String>,
        token_type: impl Into<String>,
        expires_in: u64,
        scope: impl Into<String>,
    ) -> Self {
        Self {
            access_token: access_token.into(),
            refresh_token,
            token_type: token_type.into(),
            expires_in,
            scope: scope.into(),
        }
    }

    pub fn access_token(&self) -> &str {
        &self.access_token
    }

    pub fn refresh_token(&self) -> Option<&str> {
        self.refresh_token.as_deref()
    }

    pub fn token_type(&self) -> &str {
        &self.token_type
    }

    pub fn expires_in(&self) -> u64 {
        self.expires_in
    }

    pub fn scope(&self) -> &str {
        &self.scope
    }

    /// Channel granted by this token's scope.
    pub fn channel(&self) -> Result<&str> {
        retrieve_channel_from_scope(&self.scope)
    }

    /// Bus granted by this token's scope, if any.
    pub fn bus(&self) -> Option<&str> {
        retrieve_bus_from_scope(&self.scope)
    }

    /// `Authorization` header value for bearer-authenticated calls.
    pub(crate) fn bearer_header(&self) -> String {
        format!("Bearer {}", self.access_token)
    }

    /// Parse a token endpoint JSON body.
    pub(crate) fn from_json(body: &str) -> Result<Self> {
        serde_json::from_str(body).map_err(|e| Error::Parse(format!("invalid token response: {e}")))
    }

    /// Parse a regular-token body wrapped as `f({...});`.
    pub(crate) fn from_callback(body: &str) -> Result<Self> {
        Self::from_json(strip_callback(body)?)
    }
}

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AccessToken")
            .field("access_token", &"[REDACTED]")
            .field(
                "refresh_token",
                &self.refresh_token.as_ref().map(|_| "[REDACTED]"),
            )
            .field("token_type", &self.token_type)
            .field("expires_in", &self.expires_in)
            .field("scope", &self.scope)
            .finish()
    }
}

/// Some servers send `expires_in` as a quoted number.
fn lenient_seconds<'de, D>(deserializer: D) -> std::result::Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum NumberOrString {
        Number(u64),
        Text(String),
    }

    match NumberOrString::deserialize(deserializer)? {
        NumberOrString::Number(n) => Ok(n),
        NumberOrString::Text(s) => s.trim().parse().map_err(|_| {
            serde::de::Error::custom(format!("expires_in must be whole seconds, got {s:?}"))
        }),
    }
}

/// Form body sent to the token endpoint.
#[derive(Debug, Serialize)]
pub(crate) struct TokenRequest<'a> {
    pub grant_type: GrantType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scope: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub refresh_token: Option<&'a str>,
}

impl TokenRequest<'_> {
    pub fn to_form(&self) -> Result<String> {
        serde_urlencoded::to_string(self)
            .map_err(|e| Error::Parse(format!("encoding token request: {e}")))
    }
}

/// The JSON object between the outermost braces of a JSONP envelope.
fn strip_callback(body: &str) -> Result<&str> {
    match (body.find('{'), body.rfind('}')) {
        (Some(start), Some(end)) if start < end => Ok(&body[start..=end]),
        _ => Err(Error::Parse(format!(
            "regular token response is not a callback-wrapped object: {body:?}"
        ))),
    }
}
