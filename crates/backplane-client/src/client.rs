//! Backplane 2.0 protocol client
//!
//! Wraps a `Transport` and the client credentials, and holds at most one
//! current access token. Every call performs exactly one HTTP exchange and
//! returns its outcome; there are no retries and no background work.
//!
//! Token lifecycle:
//! 1. `initialize_access_token(scope, ClientCredentials)` stores a token
//! 2. Message calls send it as `Authorization: Bearer ...`
//! 3. A call fails with `Error::ExpiredToken`
//! 4. Caller runs `initialize_access_token(scope, RefreshToken)`, which
//!    replaces the stored token
//!
//! Token-replacing methods take `&mut self`, so sharing one client across
//! tasks requires the caller's own lock.

use std::sync::Arc;

use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, info, warn};
use transport::Transport;

use crate::classify::classify_failure;
use crate::constants::{
    BLOCK_PARAM, FORM_CONTENT_TYPE, JSON_CONTENT_TYPE, MESSAGE_PATH, MESSAGES_PATH,
    REGULAR_TOKEN_CALLBACK, STATUS_CREATED, STATUS_OK, TOKEN_PATH,
};
use crate::credentials::ClientCredentials;
use crate::error::{Error, Result};
use crate::message::{Message, MessageWrapper};
use crate::token::{AccessToken, GrantType, TokenRequest};

/// Backplane 2.0 client bound to one set of credentials.
pub struct BackplaneClient {
    credentials: ClientCredentials,
    transport: Arc<dyn Transport>,
    access_token: Option<AccessToken>,
}

impl BackplaneClient {
    /// Create a client with no access token.
    pub fn new(credentials: ClientCredentials, transport: Arc<dyn Transport>) -> Self {
        Self {
            credentials,
            transport,
            access_token: None,
        }
    }

    /// Credentials this client authenticates with.
    pub fn credentials(&self) -> &ClientCredentials {
        &self.credentials
    }

    /// The current token, if one has been obtained or installed.
    pub fn access_token(&self) -> Option<&AccessToken> {
        self.access_token.as_ref()
    }

    /// Install a token obtained elsewhere, replacing the current one.
    pub fn set_access_token(&mut self, token: AccessToken) {
        self.access_token = Some(token);
    }

    /// Obtain a new token, or refresh the current one, and store it.
    ///
    /// `scope` narrows the grant (e.g. `bus:foo.com`); `None` requests a
    /// super token covering every grant issued to this client. With
    /// `GrantType::RefreshToken` the current token's refresh token is sent
    /// along. Any status other than 200 fails with `Error::Protocol` and
    /// leaves the stored token untouched.
    pub async fn initialize_access_token(
        &mut self,
        scope: Option<&str>,
        grant_type: GrantType,
    ) -> Result<AccessToken> {
        let url = self.credentials.endpoint(TOKEN_PATH);

        let refresh_token = match grant_type {
            GrantType::RefreshToken => {
                let refresh = self.access_token.as_ref().and_then(AccessToken::refresh_token);
                if refresh.is_none() {
                    warn!("refresh requested without a stored refresh token, sending grant only");
                }
                refresh
            }
            GrantType::ClientCredentials => None,
        };
        let form = TokenRequest {
            grant_type,
            scope,
            refresh_token,
        }
        .to_form()?;

        debug!(%url, %grant_type, scope, "requesting access token");
        let headers = [("Content-Type", FORM_CONTENT_TYPE)];
        let response = self
            .transport
            .post(&url, Some(form.as_str()), &headers, Some(self.credentials.basic_auth()))
            .await?;

        if response.status != STATUS_OK {
            warn!(status = response.status, %grant_type, "token request rejected");
            return Err(Error::Protocol {
                status: response.status,
                body: response.body,
            });
        }

        let token = AccessToken::from_json(&response.body)?;
        info!(
            %grant_type,
            token_type = token.token_type(),
            expires_in = token.expires_in(),
            scope = token.scope(),
            replaced = self.access_token.is_some(),
            "stored access token"
        );
        self.access_token = Some(token.clone());
        Ok(token)
    }

    /// Request a regular (public) token for `bus`.
    ///
    /// No client credentials are sent and the stored token is not changed.
    /// The server assigns a fresh channel, readable through
    /// `AccessToken::channel`.
    pub async fn get_regular_access_token(&self, bus: &str) -> Result<AccessToken> {
        let url = format!(
            "{}?callback={}&bus={}",
            self.credentials.endpoint(TOKEN_PATH),
            REGULAR_TOKEN_CALLBACK,
            urlencoding::encode(bus)
        );

        debug!(%url, "requesting regular access token");
        let response = self.transport.get(&url, &[]).await?;

        if response.status != STATUS_OK {
            warn!(status = response.status, bus, "regular token request rejected");
            return Err(Error::Protocol {
                status: response.status,
                body: response.body,
            });
        }

        AccessToken::from_callback(&response.body)
    }

    /// Publish one message. Succeeds only on 201.
    pub async fn post_message<M>(&self, message: &M) -> Result<()>
    where
        M: Serialize + ?Sized,
    {
        let authorization = self.bearer()?;
        let body = serde_json::to_string(message)
            .map_err(|e| Error::Parse(format!("serializing message: {e}")))?;
        let url = self.credentials.endpoint(MESSAGE_PATH);

        let headers = [
            ("Content-Type", JSON_CONTENT_TYPE),
            ("Authorization", authorization.as_str()),
        ];
        let response = self.transport.post(&url, Some(body.as_str()), &headers, None).await?;

        if response.status != STATUS_CREATED {
            return Err(classify_failure(response.status, &response.body));
        }
        debug!(%url, "message posted");
        Ok(())
    }

    /// Fetch one message by its absolute `messageURL`.
    pub async fn get_single_message(&self, message_url: &str) -> Result<Message> {
        self.bearer_get(message_url).await
    }

    /// Fetch one page of messages.
    ///
    /// Pass `None` on the first call and the previous page afterwards; the
    /// next request follows that page's `nextURL`. `block` asks the server to
    /// hold the request open for up to that many seconds when nothing is
    /// pending. This never loops: check `more_messages` and call again.
    pub async fn get_messages(
        &self,
        previous: Option<&MessageWrapper>,
        block: Option<u32>,
    ) -> Result<MessageWrapper> {
        let url = self.messages_url(previous, block);
        let page: MessageWrapper = self.bearer_get(&url).await?;
        debug!(
            messages = page.messages.len(),
            more_messages = page.more_messages,
            "polled messages"
        );
        Ok(page)
    }

    /// Poll URL: the base endpoint or the previous page's cursor, plus an
    /// optional `block` parameter.
    fn messages_url(&self, previous: Option<&MessageWrapper>, block: Option<u32>) -> String {
        let (mut url, separator) = match previous {
            Some(page) => (page.next_url.clone(), '&'),
            None => (self.credentials.endpoint(MESSAGES_PATH), '?'),
        };
        if let Some(block) = block {
            url.push(separator);
            url.push_str(&format!("{BLOCK_PARAM}={block}"));
        }
        url
    }

    async fn bearer_get<T: DeserializeOwned>(&self, url: &str) -> Result<T> {
        let authorization = self.bearer()?;
        let headers = [("Authorization", authorization.as_str())];
        let response = self.transport.get(url, &headers).await?;

        if response.status != STATUS_OK {
            return Err(classify_failure(response.status, &response.body));
        }

        serde_json::from_str(&response.body)
            .map_err(|e| Error::Parse(format!("invalid response from {url}: {e}")))
    }

    fn bearer(&self) -> Result<String> {
        self.access_token
            .as_ref()
            .map(AccessToken::bearer_header)
            .ok_or(Error::MissingAccessToken)
    }
}
