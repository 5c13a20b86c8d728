//! Client configuration: where the API lives.

use crate::ClientError;

/// Base URL used when nothing else is configured (local development server).
pub const DEFAULT_BASE_URL: &str = "http://localhost:8080";

/// Path prefix for every resource endpoint. `/health` is never prefixed.
pub const DEFAULT_API_PREFIX: &str = "/api";

/// Environment variable holding the base URL.
pub const BASE_URL_ENV: &str = "LOCALGAMES_API_URL";

/// Environment variable holding the API prefix.
pub const API_PREFIX_ENV: &str = "LOCALGAMES_API_PREFIX";

/// Where the client sends its requests.
///
/// Always normalized: `base_url` has a scheme and no trailing `/`,
/// `api_prefix` is either empty or starts with `/` and doesn't end with one.
/// That way `base_url + api_prefix + "/games"` is always a well-formed URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    base_url: String,
    api_prefix: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            api_prefix: DEFAULT_API_PREFIX.to_string(),
        }
    }
}

impl ClientConfig {
    /// Creates a config for `base_url` with the default prefix.
    ///
    /// # Errors
    /// Returns [`ClientError::Config`] if the URL isn't `http(s)://…`.
    pub fn new(base_url: &str) -> Result<Self, ClientError> {
        Ok(Self {
            base_url: normalize_base_url(base_url)?,
            api_prefix: DEFAULT_API_PREFIX.to_string(),
        })
    }

    /// Replaces the API prefix. `""` and `"/"` both mean "no prefix".
    pub fn with_api_prefix(mut self, prefix: &str) -> Self {
        self.api_prefix = normalize_prefix(prefix);
        self
    }

    /// Reads [`BASE_URL_ENV`] and [`API_PREFIX_ENV`] from the process
    /// environment, falling back to the defaults.
    pub fn from_env() -> Result<Self, ClientError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`from_env`](Self::from_env) but with a caller-supplied
    /// lookup. Empty values count as unset.
    pub fn from_lookup(
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ClientError> {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let config = match get(BASE_URL_ENV) {
            Some(url) => Self::new(&url)?,
            None => Self::default(),
        };
        let config = match get(API_PREFIX_ENV) {
            Some(prefix) => config.with_api_prefix(&prefix),
            None => config,
        };

        tracing::debug!(
            base_url = %config.base_url,
            api_prefix = %config.api_prefix,
            "client config loaded"
        );
        Ok(config)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn api_prefix(&self) -> &str {
        &self.api_prefix
    }
}

fn normalize_base_url(url: &str) -> Result<String, ClientError> {
    let url = url.trim();
    let (scheme, rest) = if let Some(rest) = url.strip_prefix("https://") {
        ("https://", rest)
    } else if let Some(rest) = url.strip_prefix("http://") {
        ("http://", rest)
    } else {
        return Err(ClientError::Config(format!(
            "base URL must start with http:// or https://, got {url:?}"
        )));
    };

    let rest = rest.trim_end_matches('/');
    if rest.is_empty() || rest.starts_with('/') {
        return Err(ClientError::Config(format!(
            "base URL has no host: {url:?}"
        )));
    }
    Ok(format!("{scheme}{rest}"))
}

fn normalize_prefix(prefix: &str) -> String {
    let prefix = prefix.trim().trim_matches('/');
    if prefix.is_empty() {
        String::new()
    } else {
        format!("/{prefix}")
    }
}
