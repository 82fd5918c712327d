//! Record-and-replay transport for protocol tests
//!
//! Every request is recorded in order. Responses are replayed from a queue of
//! one-shot responses first; once the queue is empty the sticky default set
//! with `set_response` answers every request. With neither configured the call
//! fails with `Error::NoResponse`.

use std::collections::VecDeque;
use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::{BasicAuth, Error, Header, HttpResponse, Method, Result, Transport, TransportFuture};

/// One request as seen by the transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedRequest {
    pub method: Method,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<String>,
    /// `(username, password)` when basic auth was supplied
    pub basic_auth: Option<(String, String)>,
}

impl RecordedRequest {
    /// Value of the first header matching `name` case-insensitively.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

#[derive(Default)]
struct State {
    queued: VecDeque<HttpResponse>,
    sticky: Option<HttpResponse>,
    requests: Vec<RecordedRequest>,
}

#[derive(Default)]
pub struct MockTransport {
    state: Mutex<State>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer every request with this response until replaced.
    pub fn set_response(&self, status: u16, body: impl Into<String>) {
        self.lock().sticky = Some(HttpResponse::new(status, body));
    }

    /// Answer the next unanswered request with this response, once.
    pub fn enqueue(&self, status: u16, body: impl Into<String>) {
        self.lock().queued.push_back(HttpResponse::new(status, body));
    }

    /// All requests received so far, oldest first.
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.lock().requests.clone()
    }

    pub fn last_request(&self) -> Option<RecordedRequest> {
        self.lock().requests.last().cloned()
    }

    fn lock(&self) -> MutexGuard<'_, State> {
        // A panicking test thread must not hide later assertions
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn respond(&self, request: RecordedRequest) -> Result<HttpResponse> {
        let mut state = self.lock();
        let (method, url) = (request.method, request.url.clone());
        state.requests.push(request);
        match state.queued.pop_front() {
            Some(response) => Ok(response),
            None => state.sticky.clone().ok_or(Error::NoResponse { method, url }),
        }
    }
}

fn owned_headers(headers: &[Header<'_>]) -> Vec<(String, String)> {
    headers
        .iter()
        .map(|(n, v)| ((*n).to_owned(), (*v).to_owned()))
        .collect()
}

impl Transport for MockTransport {
    fn get<'a>(&'a self, url: &'a str, headers: &'a [Header<'a>]) -> TransportFuture<'a> {
        let result = self.respond(RecordedRequest {
            method: Method::Get,
            url: url.to_owned(),
            headers: owned_headers(headers),
            body: None,
            basic_auth: None,
        });
        Box::pin(async move { result })
    }

    fn post<'a>(
        &'a self,
        url: &'a str,
        body: Option<&'a str>,
        headers: &'a [Header<'a>],
        basic_auth: Option<BasicAuth<'a>>,
    ) -> TransportFuture<'a> {
        let result = self.respond(RecordedRequest {
            method: Method::Post,
            url: url.to_owned(),
            headers: owned_headers(headers),
            body: body.map(str::to_owned),
            basic_auth: basic_auth.map(|a| (a.username.to_owned(), a.password.to_owned())),
        });
        Box::pin(async move { result })
    }
}
