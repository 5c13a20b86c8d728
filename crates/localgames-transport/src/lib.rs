//! HTTP transport abstraction for the Local Games client.
//!
//! Provides the [`HttpTransport`] trait: one method that takes a fully built
//! [`HttpRequest`] and returns the raw [`HttpResponse`]. The request wrapper
//! above only ever talks to this trait, so tests can swap in an in-memory
//! fake and production code uses [`ReqwestTransport`].
//!
//! A transport performs one exchange and reports what happened. It does not
//! interpret status codes, parse bodies, retry, or cache.
//!
//! # Feature Flags
//!
//! - `reqwest` (default) — HTTP transport via `reqwest`

mod error;
#[cfg(feature = "reqwest")]
mod reqwest_transport;

pub use error::TransportError;
#[cfg(feature = "reqwest")]
pub use reqwest_transport::ReqwestTransport;

use std::collections::BTreeMap;
use std::fmt;
use std::future::Future;

// ---------------------------------------------------------------------------
// Method
// ---------------------------------------------------------------------------

/// The HTTP methods the API uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Method {
    #[default]
    Get,
    Post,
    Put,
    Delete,
}

impl Method {
    /// Returns the method name as it appears on the wire.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Delete => "DELETE",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Headers
// ---------------------------------------------------------------------------

/// A case-insensitive header set.
///
/// Names are stored lowercased, so inserting `Content-Type` after
/// `content-type` replaces the value instead of sending both.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Headers(BTreeMap<String, String>);

impl Headers {
    /// Creates an empty header set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a header, returning the previous value for that name.
    pub fn insert(
        &mut self,
        name: impl AsRef<str>,
        value: impl Into<String>,
    ) -> Option<String> {
        self.0
            .insert(name.as_ref().to_ascii_lowercase(), value.into())
    }

    /// Looks up a header by name, ignoring case.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(&name.to_ascii_lowercase()).map(String::as_str)
    }

    /// Applies every header in `other` on top of this set.
    pub fn merge(&mut self, other: &Headers) {
        for (name, value) in other.iter() {
            self.0.insert(name.to_owned(), value.to_owned());
        }
    }

    /// Iterates `(name, value)` pairs in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: AsRef<str>, V: Into<String>> FromIterator<(K, V)> for Headers {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut headers = Self::new();
        for (name, value) in iter {
            headers.insert(name, value);
        }
        headers
    }
}

// ---------------------------------------------------------------------------
// Request / Response
// ---------------------------------------------------------------------------

/// A fully resolved HTTP request: absolute URL, final headers, raw body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    pub method: Method,
    pub url: String,
    pub headers: Headers,
    pub body: Option<Vec<u8>>,
}

impl HttpRequest {
    /// Creates a request with no headers and no body.
    pub fn new(method: Method, url: impl Into<String>) -> Self {
        Self {
            method,
            url: url.into(),
            headers: Headers::new(),
            body: None,
        }
    }
}

/// The raw outcome of an HTTP exchange.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    /// Numeric status code (`200`, `404`, …).
    pub status: u16,
    /// Reason phrase for the status (`"Not Found"`).
    pub status_text: String,
    pub body: Vec<u8>,
}

impl HttpResponse {
    /// Returns `true` for any 2xx status.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

// ---------------------------------------------------------------------------
// HttpTransport
// ---------------------------------------------------------------------------

/// Performs HTTP exchanges.
///
/// # Trait bounds
///
/// - `Send + Sync + 'static` → one transport is shared (behind an `Arc`) by
///   every clone of the API client, across tasks.
/// - The returned future is `Send` so callers can `tokio::spawn` requests.
///
/// Implementors may write `async fn execute(...)` directly.
pub trait HttpTransport: Send + Sync + 'static {
    /// Sends the request and returns the response, whatever its status.
    ///
    /// # Errors
    /// Returns a [`TransportError`] only when no response was obtained.
    fn execute(
        &self,
        request: HttpRequest,
    ) -> impl Future<Output = Result<HttpResponse, TransportError>> + Send;
}
