//! HTTP transport implementation using `reqwest`.

use std::error::Error as _;
use std::io;

use hyper::ext::ReasonPhrase;

use crate::{HttpRequest, HttpResponse, HttpTransport, Method, TransportError};

/// An [`HttpTransport`] backed by a shared `reqwest::Client`.
///
/// `reqwest::Client` pools connections internally and is cheap to clone,
/// so one transport serves every request the API client makes. No timeout
/// is configured here; the client's defaults apply.
#[derive(Debug, Clone, Default)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    /// Creates a transport with a default `reqwest::Client`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Wraps an existing, pre-configured client (proxies, TLS roots, …).
    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

impl HttpTransport for ReqwestTransport {
    async fn execute(
        &self,
        request: HttpRequest,
    ) -> Result<HttpResponse, TransportError> {
        let method = match request.method {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
            Method::Put => reqwest::Method::PUT,
            Method::Delete => reqwest::Method::DELETE,
        };

        let mut builder = self.client.request(method, &request.url);
        for (name, value) in request.headers.iter() {
            builder = builder.header(name, value);
        }
        if let Some(body) = request.body {
            builder = builder.body(body);
        }

        let response = builder.send().await.map_err(|e| {
            if e.is_builder() {
                TransportError::InvalidRequest(e.to_string())
            } else {
                TransportError::SendFailed(to_io_error(e))
            }
        })?;

        let status = response.status();
        let status_text = reason_phrase(&response);
        let body = response
            .bytes()
            .await
            .map_err(|e| TransportError::ReceiveFailed(to_io_error(e)))?;

        tracing::trace!(
            status = status.as_u16(),
            len = body.len(),
            "received response"
        );

        Ok(HttpResponse {
            status: status.as_u16(),
            status_text,
            body: body.to_vec(),
        })
    }
}

/// The reason phrase the server actually sent.
///
/// hyper only records the phrase when it differs from the canonical one
/// for the status code, so the canonical phrase fills in otherwise.
fn reason_phrase(response: &reqwest::Response) -> String {
    match response.extensions().get::<ReasonPhrase>() {
        Some(phrase) => String::from_utf8_lossy(phrase.as_bytes()).into_owned(),
        None => response
            .status()
            .canonical_reason()
            .unwrap_or("")
            .to_string(),
    }
}

/// Wraps a reqwest error in an `io::Error` whose kind matches the cause.
///
/// The kind comes from the first `io::Error` in the source chain (refused,
/// reset, ...). Timeouts map to `TimedOut`. Anything else, such as a peer
/// that closed the connection without answering, is `Other`.
fn to_io_error(error: reqwest::Error) -> io::Error {
    let kind = if error.is_timeout() {
        io::ErrorKind::TimedOut
    } else {
        io_kind(&error).unwrap_or(io::ErrorKind::Other)
    };
    io::Error::new(kind, error)
}

fn io_kind(error: &reqwest::Error) -> Option<io::ErrorKind> {
    let mut source = error.source();
    while let Some(cause) = source {
        if let Some(io_error) = cause.downcast_ref::<io::Error>() {
            return Some(io_error.kind());
        }
        source = cause.source();
    }
    None
}
