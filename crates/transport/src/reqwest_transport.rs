//! reqwest-backed transport
//!
//! Builds one `reqwest::Client` from `TransportConfig` and reuses it for every
//! request. The status code and body text are returned untouched: a 403 is a
//! successful exchange from this layer's point of view.

use tracing::debug;

use crate::{BasicAuth, Error, Header, HttpResponse, Result, Transport, TransportConfig, TransportFuture};

pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    pub fn new(config: &TransportConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .connect_timeout(config.connect_timeout())
            .timeout(config.timeout())
            .user_agent(config.user_agent.as_str())
            .danger_accept_invalid_certs(!config.verify_tls)
            .build()
            .map_err(|e| Error::Build(e.to_string()))?;
        Ok(Self { client })
    }
}

fn apply_headers(mut request: reqwest::RequestBuilder, headers: &[Header<'_>]) -> reqwest::RequestBuilder {
    for (name, value) in headers {
        request = request.header(*name, *value);
    }
    request
}

async fn execute(request: reqwest::RequestBuilder, method: &str, url: &str) -> Result<HttpResponse> {
    let response = request
        .send()
        .await
        .map_err(|e| Error::Request(format!("{method} {url}: {e}")))?;

    let status = response.status().as_u16();
    let body = response
        .text()
        .await
        .map_err(|e| Error::Body(format!("{method} {url}: {e}")))?;

    debug!(method, url, status, bytes = body.len(), "backplane response");
    Ok(HttpResponse { status, body })
}

impl Transport for ReqwestTransport {
    fn get<'a>(&'a self, url: &'a str, headers: &'a [Header<'a>]) -> TransportFuture<'a> {
        Box::pin(async move {
            let request = apply_headers(self.client.get(url), headers);
            execute(request, "GET", url).await
        })
    }

    fn post<'a>(
        &'a self,
        url: &'a str,
        body: Option<&'a str>,
        headers: &'a [Header<'a>],
        basic_auth: Option<BasicAuth<'a>>,
    ) -> TransportFuture<'a> {
        Box::pin(async move {
            let mut request = apply_headers(self.client.post(url), headers);
            if let Some(body) = body {
                request = request.body(body.to_owned());
            }
            if let Some(auth) = basic_auth {
                request = request.basic_auth(auth.username, Some(auth.password));
            }
            execute(request, "POST", url).await
        })
    }
}
