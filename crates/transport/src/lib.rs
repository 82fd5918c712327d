//! HTTP transport abstraction for the Backplane client
//!
//! Defines the `Transport` trait that decouples protocol logic from the HTTP
//! stack. A transport performs exactly one GET or POST and hands back the raw
//! body and status code; it never retries and never interprets the status.
//! `ReqwestTransport` is the production implementation, `MockTransport` the
//! record-and-replay double used by protocol tests.

pub mod config;
pub mod mock;
pub mod reqwest_transport;

pub use config::TransportConfig;
pub use mock::{MockTransport, RecordedRequest};
pub use reqwest_transport::ReqwestTransport;

use std::fmt;
use std::future::Future;
use std::pin::Pin;

/// A request header as a `(name, value)` pair.
pub type Header<'a> = (&'a str, &'a str);

/// Boxed future returned by transport calls.
pub type TransportFuture<'a> = Pin<Box<dyn Future<Output = Result<HttpResponse>> + Send + 'a>>;

/// Raw outcome of one HTTP exchange.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }
}

/// HTTP Basic credentials (`username:password`).
#[derive(Clone, Copy)]
pub struct BasicAuth<'a> {
    pub username: &'a str,
    pub password: &'a str,
}

impl fmt::Debug for BasicAuth<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BasicAuth")
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

/// HTTP method of a recorded request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
}

/// Errors from executing a request. Non-2xx statuses are not errors.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("failed to build HTTP client: {0}")]
    Build(String),

    #[error("HTTP request failed: {0}")]
    Request(String),

    #[error("failed to read response body: {0}")]
    Body(String),

    #[error("no response configured for {method:?} {url}")]
    NoResponse { method: Method, url: String },
}

/// Result alias for transport operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Executes single HTTP requests on behalf of the protocol client.
///
/// Uses `Pin<Box<dyn Future>>` return types so the client can hold an
/// `Arc<dyn Transport>`.
pub trait Transport: Send + Sync {
    /// Issue a GET with the given headers.
    fn get<'a>(&'a self, url: &'a str, headers: &'a [Header<'a>]) -> TransportFuture<'a>;

    /// Issue a POST. `body` may be absent; `basic_auth` adds an
    /// `Authorization: Basic` header.
    fn post<'a>(
        &'a self,
        url: &'a str,
        body: Option<&'a str>,
        headers: &'a [Header<'a>],
        basic_auth: Option<BasicAuth<'a>>,
    ) -> TransportFuture<'a>;
}
