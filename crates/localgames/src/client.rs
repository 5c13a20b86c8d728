//! `ApiClient`: the request wrapper every facet is built on.
//!
//! One generic exchange, used by every endpoint:
//!   1. Build the URL: `base_url` + endpoint
//!   2. Build headers: `content-type: application/json`, then caller headers
//!   3. Hand the request to the [`HttpTransport`]
//!   4. Non-2xx → [`ClientError::Http`] (body ignored)
//!   5. 2xx → decode the body as JSON (or skip it, for no-payload endpoints)
//!
//! No retries, no caching, no timeouts beyond the transport's own. Failures
//! are logged and then returned unchanged.

use std::sync::Arc;

use localgames_protocol::{Codec, HealthStatus, JsonCodec};
use localgames_transport::{
    Headers, HttpRequest, HttpResponse, HttpTransport, Method,
    ReqwestTransport,
};
use serde::{Serialize, de::DeserializeOwned};

use crate::config::{DEFAULT_API_PREFIX, DEFAULT_BASE_URL};
use crate::games::Games;
use crate::players::{Players, Sessions};
use crate::{ClientConfig, ClientError};

// ---------------------------------------------------------------------------
// RequestOptions
// ---------------------------------------------------------------------------

/// Per-call options: method, extra headers, raw body.
///
/// `Default` is a bare GET.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestOptions {
    pub method: Method,
    pub headers: Headers,
    pub body: Option<Vec<u8>>,
}

impl RequestOptions {
    pub fn new(method: Method) -> Self {
        Self {
            method,
            ..Self::default()
        }
    }

    pub fn get() -> Self {
        Self::new(Method::Get)
    }

    pub fn post() -> Self {
        Self::new(Method::Post)
    }

    pub fn put() -> Self {
        Self::new(Method::Put)
    }

    pub fn delete() -> Self {
        Self::new(Method::Delete)
    }

    /// Adds (or overrides) a header for this call only.
    pub fn header(
        mut self,
        name: impl AsRef<str>,
        value: impl Into<String>,
    ) -> Self {
        self.headers.insert(name, value);
        self
    }

    /// Sets the raw request body.
    pub fn body(mut self, body: Vec<u8>) -> Self {
        self.body = Some(body);
        self
    }
}

// ---------------------------------------------------------------------------
// ApiClient
// ---------------------------------------------------------------------------

/// Typed client for the Local Games HTTP API.
///
/// Cheap to clone: the transport and config sit behind `Arc`s, so every
/// clone shares one connection pool.
///
/// # Example
///
/// ```rust,no_run
/// use localgames::{ApiClient, CreateGame};
///
/// # async fn run() -> Result<(), localgames::ClientError> {
/// let client = ApiClient::builder()
///     .base_url("http://localhost:8080")
///     .build()?;
///
/// let game = client.games().create(&CreateGame::new("impostor")).await?;
/// let lobby = client.games().list().await?;
/// assert!(lobby.iter().any(|g| g.id == game.id));
/// # Ok(())
/// # }
/// ```
pub struct ApiClient<T = ReqwestTransport> {
    transport: Arc<T>,
    config: Arc<ClientConfig>,
    codec: JsonCodec,
}

impl<T> Clone for ApiClient<T> {
    fn clone(&self) -> Self {
        Self {
            transport: Arc::clone(&self.transport),
            config: Arc::clone(&self.config),
            codec: self.codec,
        }
    }
}

impl<T> std::fmt::Debug for ApiClient<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl ApiClient<ReqwestTransport> {
    /// Creates a client using `reqwest` with the given config.
    pub fn new(config: ClientConfig) -> Self {
        Self::with_transport(config, ReqwestTransport::new())
    }

    /// Creates a client configured from the environment.
    pub fn from_env() -> Result<Self, ClientError> {
        Ok(Self::new(ClientConfig::from_env()?))
    }

    /// Starts a builder with default settings.
    pub fn builder() -> ApiClientBuilder {
        ApiClientBuilder::new()
    }
}

impl<T: HttpTransport> ApiClient<T> {
    /// Creates a client over any transport.
    pub fn with_transport(config: ClientConfig, transport: T) -> Self {
        Self {
            transport: Arc::new(transport),
            config: Arc::new(config),
            codec: JsonCodec,
        }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Resolves an endpoint (starting with `/`) to an absolute URL.
    pub fn url(&self, endpoint: &str) -> String {
        format!("{}{endpoint}", self.config.base_url())
    }

    /// Prepends the configured API prefix to a resource path.
    pub(crate) fn api_path(&self, resource: &str) -> String {
        format!("{}{resource}", self.config.api_prefix())
    }

    /// Encodes a request body with the client's codec.
    pub fn encode<B: Serialize + ?Sized>(
        &self,
        body: &B,
    ) -> Result<Vec<u8>, ClientError> {
        Ok(self.codec.encode(body)?)
    }

    /// Performs a request and decodes the JSON response body as `R`.
    ///
    /// # Errors
    /// - [`ClientError::Http`] — non-2xx status; the body is not read
    /// - [`ClientError::Codec`] — 2xx but the body isn't a valid `R`
    /// - [`ClientError::Transport`] — no response at all
    pub async fn request<R: DeserializeOwned>(
        &self,
        endpoint: &str,
        options: RequestOptions,
    ) -> Result<R, ClientError> {
        let method = options.method;
        let result = match self.exchange(endpoint, options).await {
            Ok(response) => self
                .codec
                .decode(&response.body)
                .map_err(ClientError::from),
            Err(e) => Err(e),
        };
        result.inspect_err(|e| log_failure(method, endpoint, e))
    }

    /// Performs a request whose response carries no payload.
    ///
    /// The body of a 2xx response is discarded without parsing, so `204 No
    /// Content` and empty `200`s both succeed.
    pub async fn request_empty(
        &self,
        endpoint: &str,
        options: RequestOptions,
    ) -> Result<(), ClientError> {
        let method = options.method;
        self.exchange(endpoint, options)
            .await
            .map(drop)
            .inspect_err(|e| log_failure(method, endpoint, e))
    }

    /// `GET /health`. Never prefixed.
    pub async fn health_check(&self) -> Result<HealthStatus, ClientError> {
        self.request("/health", RequestOptions::get()).await
    }

    /// Game CRUD and lobby membership.
    pub fn games(&self) -> Games<'_, T> {
        Games::new(self)
    }

    /// Player records.
    pub fn players(&self) -> Players<'_, T> {
        Players::new(self)
    }

    /// Login session lifecycle.
    pub fn sessions(&self) -> Sessions<'_, T> {
        Sessions::new(self)
    }

    /// Steps 1–4: build, send, check status.
    async fn exchange(
        &self,
        endpoint: &str,
        options: RequestOptions,
    ) -> Result<HttpResponse, ClientError> {
        let mut headers = Headers::new();
        headers.insert("content-type", self.codec.content_type());
        headers.merge(&options.headers);

        let request = HttpRequest {
            method: options.method,
            url: self.url(endpoint),
            headers,
            body: options.body,
        };

        tracing::debug!(
            method = %request.method,
            url = %request.url,
            "sending request"
        );

        let response = self.transport.execute(request).await?;
        if !response.is_success() {
            return Err(ClientError::Http {
                status: response.status,
                status_text: response.status_text,
            });
        }
        Ok(response)
    }
}

fn log_failure(method: Method, endpoint: &str, error: &ClientError) {
    tracing::warn!(%method, endpoint, error = %error, "API request failed");
}

// ---------------------------------------------------------------------------
// ApiClientBuilder
// ---------------------------------------------------------------------------

/// Builder for [`ApiClient`].
///
/// ```rust
/// use localgames::ApiClient;
///
/// let client = ApiClient::builder()
///     .base_url("https://games.example.com/")
///     .api_prefix("/v1")
///     .build()
///     .unwrap();
/// assert_eq!(client.url("/v1/games"), "https://games.example.com/v1/games");
/// ```
pub struct ApiClientBuilder<T = ReqwestTransport> {
    base_url: String,
    api_prefix: String,
    transport: T,
}

impl ApiClientBuilder<ReqwestTransport> {
    /// Creates a builder pointing at the local development server.
    pub fn new() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            api_prefix: DEFAULT_API_PREFIX.to_string(),
            transport: ReqwestTransport::new(),
        }
    }
}

impl Default for ApiClientBuilder<ReqwestTransport> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: HttpTransport> ApiClientBuilder<T> {
    /// Sets the base URL (scheme + host + optional port).
    pub fn base_url(mut self, url: &str) -> Self {
        self.base_url = url.to_string();
        self
    }

    /// Sets the path prefix for resource endpoints.
    pub fn api_prefix(mut self, prefix: &str) -> Self {
        self.api_prefix = prefix.to_string();
        self
    }

    /// Copies base URL and prefix from an existing config.
    pub fn config(mut self, config: &ClientConfig) -> Self {
        self.base_url = config.base_url().to_string();
        self.api_prefix = config.api_prefix().to_string();
        self
    }

    /// Swaps the transport (e.g. for a fake in tests).
    pub fn transport<U: HttpTransport>(self, transport: U) -> ApiClientBuilder<U> {
        ApiClientBuilder {
            base_url: self.base_url,
            api_prefix: self.api_prefix,
            transport,
        }
    }

    /// Validates the settings and builds the client.
    pub fn build(self) -> Result<ApiClient<T>, ClientError> {
        let config =
            ClientConfig::new(&self.base_url)?.with_api_prefix(&self.api_prefix);
        Ok(ApiClient::with_transport(config, self.transport))
    }
}

// =========================================================================
// Tests
// =========================================================================
