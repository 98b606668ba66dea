//! Cache-or-fetch resolver for API endpoints
//!
//! `ApiClient::get` consults the on-disk cache before going to the network;
//! `ApiClient::post` always performs a live request. Live responses are
//! validated (non-empty, 2xx, decodable JSON) and failures follow the
//! soft-fail policy: the problem is logged with whatever status and raw body
//! is available, and the call resolves to `Value::Null` so the invocation
//! can finish with degraded output.

use std::time::Duration;

use log::{error, info, warn};
use reqwest::{header, Client, Method};
use serde_json::Value;
use thiserror::Error;

use crate::cache::{CacheKey, CacheManager};
use crate::config::Config;

use super::body;

/// Hard ceiling on a single request, in seconds
const REQUEST_TIMEOUT_SECS: u64 = 1800;

/// Media type GitHub recommends for REST API requests
const ACCEPT_MEDIA_TYPE: &str = "application/vnd.github+json";

/// User agent sent with every request; GitHub rejects agent-less calls
const USER_AGENT: &str = concat!("hubq/", env!("CARGO_PKG_VERSION"));

/// Errors that abort an API call outright
///
/// Transport and response problems are handled by the soft-fail policy and
/// never surface here; only unusable inputs and client construction do.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The HTTP client could not be constructed
    #[error("Failed to build HTTP client: {0}")]
    Client(#[from] reqwest::Error),

    /// A body is required for write operations
    #[error("A JSON body to send is required")]
    MissingBody,

    /// The supplied body is not valid JSON even after relaxed-syntax cleanup
    #[error("Invalid JSON body - likely a syntax error: {0}")]
    InvalidBody(#[from] serde_json::Error),
}

/// Outcome of one resolver call
#[derive(Debug)]
pub struct ApiResult {
    /// Decoded response body; `Value::Null` when the request soft-failed
    pub body: Value,
    /// Response headers in arrival order; empty on the cache-hit path
    pub headers: Vec<(String, String)>,
}

impl ApiResult {
    fn empty() -> Self {
        Self {
            body: Value::Null,
            headers: Vec::new(),
        }
    }
}

/// Client for authenticated GitHub REST API calls with response caching
#[derive(Debug)]
pub struct ApiClient {
    http: Client,
    config: Config,
    cache: Option<CacheManager>,
}

impl ApiClient {
    /// Creates a client from explicit configuration
    ///
    /// The cache directory comes from the XDG cache path; if none can be
    /// determined, the client runs uncached.
    pub fn new(config: Config) -> Result<Self, ApiError> {
        Self::with_cache(config, CacheManager::new())
    }

    /// Creates a client with a specific cache manager (or none)
    pub fn with_cache(config: Config, cache: Option<CacheManager>) -> Result<Self, ApiError> {
        let http = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .redirect(reqwest::redirect::Policy::none())
            .build()?;
        Ok(Self { http, config, cache })
    }

    /// GETs an endpoint, serving from cache when possible
    ///
    /// Headers are only available from a live call, so `return_headers`
    /// bypasses the cache read (the result is still written through).
    pub async fn get(&self, endpoint: &str, return_headers: bool) -> Result<ApiResult, ApiError> {
        let endpoint = normalize_endpoint(endpoint);

        if self.config.api_cache && !return_headers {
            info!("cache is enabled - checking");
            if let Some(body) = self.cached_body(&endpoint) {
                return Ok(ApiResult {
                    body,
                    headers: Vec::new(),
                });
            }
        } else {
            info!("cache is disabled");
        }

        info!("no usable cached data, running a fresh API request");
        let result = self.run(Method::GET, &endpoint, None).await;
        if !result.body.is_null() {
            self.store(&endpoint, &result.body);
        }
        Ok(result)
    }

    /// POSTs a relaxed-JSON body to an endpoint
    pub async fn post(&self, endpoint: &str, body: &str) -> Result<ApiResult, ApiError> {
        self.send(Method::POST, endpoint, body).await
    }

    /// Sends a body to an endpoint with the given method (POST/PUT-style)
    pub async fn send(
        &self,
        method: Method,
        endpoint: &str,
        body: &str,
    ) -> Result<ApiResult, ApiError> {
        if body.trim().is_empty() {
            return Err(ApiError::MissingBody);
        }
        let endpoint = normalize_endpoint(endpoint);
        let body = body::parse_relaxed(body)?;
        Ok(self.run(method, &endpoint, Some(&body)).await)
    }

    /// Reads and decodes a fresh cache entry for an endpoint
    ///
    /// A corrupted entry (undecodable or null) is a miss, not an error.
    fn cached_body(&self, endpoint: &str) -> Option<Value> {
        let cache = self.cache.as_ref()?;
        let key = CacheKey::for_endpoint(&self.config.api_url, endpoint);
        let text = cache.read(&key, self.config.api_cache_lifetime)?;
        match serde_json::from_str::<Value>(&text) {
            Ok(body) if !body.is_null() => Some(body),
            _ => {
                warn!("invalid cached data - will try a fresh call");
                None
            }
        }
    }

    /// Writes a fetched body through to the cache as pretty JSON
    ///
    /// Runs after every successful live fetch, even when cache reads are
    /// disabled, so the entry is fresh the next time caching is on.
    fn store(&self, endpoint: &str, value: &Value) {
        let Some(cache) = self.cache.as_ref() else {
            return;
        };
        let key = CacheKey::for_endpoint(&self.config.api_url, endpoint);
        match serde_json::to_string_pretty(value) {
            Ok(text) => {
                if let Err(err) = cache.write(&key, &text) {
                    warn!("failed to write cache entry: {err}");
                }
            }
            Err(err) => warn!("failed to encode body for caching: {err}"),
        }
    }

    /// Performs a live request and validates the response
    ///
    /// Soft-fails: any transport error, empty body, non-2xx status, or
    /// decode failure is logged and yields an empty result.
    async fn run(&self, method: Method, endpoint: &str, body: Option<&Value>) -> ApiResult {
        let url = format!("{}/{}", self.config.api_url.trim_end_matches('/'), endpoint);
        info!("running API request to {url}");

        let mut request = self
            .http
            .request(method, &url)
            .header(header::ACCEPT, ACCEPT_MEDIA_TYPE)
            .header(header::CONTENT_TYPE, "application/json")
            .header(header::USER_AGENT, USER_AGENT)
            .bearer_auth(&self.config.api_key);
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = match request.send().await {
            Ok(response) => response,
            Err(err) => {
                error!("Request error: {err}");
                warn!("Request may have failed");
                return ApiResult::empty();
            }
        };

        let status = response.status();
        let headers = response
            .headers()
            .iter()
            .map(|(name, value)| {
                (
                    name.as_str().to_string(),
                    String::from_utf8_lossy(value.as_bytes()).into_owned(),
                )
            })
            .collect();

        let text = match response.text().await {
            Ok(text) => text,
            Err(err) => {
                error!("Request error: {err}");
                warn!("Request may have failed");
                return ApiResult {
                    body: Value::Null,
                    headers,
                };
            }
        };

        if text.trim().is_empty() {
            error!("Empty response body");
            warn!("Request may have failed");
            return ApiResult {
                body: Value::Null,
                headers,
            };
        }

        if !status.is_success() {
            error!("Response: {}", status.as_u16());
            error!("{text}");
            warn!("Request may have failed");
            return ApiResult {
                body: Value::Null,
                headers,
            };
        }

        match serde_json::from_str(&text) {
            Ok(body) => ApiResult { body, headers },
            Err(_) => {
                error!("Invalid response");
                error!("{}", status.as_u16());
                error!("{text}");
                warn!("Request may have failed");
                ApiResult {
                    body: Value::Null,
                    headers,
                }
            }
        }
    }
}

/// Normalizes an endpoint by trimming whitespace and slashes from both ends
pub fn normalize_endpoint(endpoint: &str) -> String {
    endpoint
        .trim_matches(|c: char| c.is_whitespace() || c == '/')
        .to_string()
}
