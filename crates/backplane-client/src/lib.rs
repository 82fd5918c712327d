//! Backplane 2.0 client library
//!
//! Obtains and refreshes OAuth2 bearer tokens, publishes messages and polls
//! a Backplane bus over HTTP. The HTTP exchange itself is delegated to a
//! `transport::Transport`, so the protocol logic here can be exercised
//! against `transport::MockTransport` without a server.
//!
//! Typical flow:
//! 1. Build `ClientCredentials` (or load a `config::Config`)
//! 2. Wrap them in a `BackplaneClient` with a transport
//! 3. `initialize_access_token(scope, GrantType::ClientCredentials)`
//! 4. `post_message` / `get_messages` / `get_single_message`
//! 5. On `Error::ExpiredToken`, `initialize_access_token(scope, GrantType::RefreshToken)`

pub mod classify;
pub mod client;
pub mod config;
pub mod constants;
pub mod credentials;
pub mod error;
pub mod message;
pub mod scope;
pub mod token;

#[cfg(test)]
mod fixtures;

pub use classify::classify_failure;
pub use client::BackplaneClient;
pub use config::Config;
pub use credentials::ClientCredentials;
pub use error::{Error, Result};
pub use message::{Message, MessageWrapper};
pub use scope::{retrieve_bus_from_scope, retrieve_channel_from_scope};
pub use token::{AccessToken, GrantType};
