//! ESI request executor
//!
//! This module holds the request/response types, client configuration and the
//! single retry loop every resource accessor goes through. Accessors describe
//! a call with an [`EsiRequest`]; [`EsiClient::execute`] resolves it against
//! the base URL, attaches headers, and retries according to the status code
//! classification in [`StatusClass`].

use crate::error::{EsiError, Result};
use crate::sleep::{Sleeper, TokioSleeper};
use crate::transport::{HttpMethod, ReqwestTransport, Transport, TransportRequest, TransportResponse};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;

/// Production ESI endpoint
pub const DEFAULT_BASE_URL: &str = "https://esi.evetech.net";

/// Response header carrying the total page count of a paged collection
pub const PAGES_HEADER: &str = "x-pages";

// =============================================================================
// Request Types
// =============================================================================

/// Description of one logical ESI call
///
/// # Examples
/// ```
/// use esi_client::EsiRequest;
///
/// let request = EsiRequest::get("/v2/characters/90000001/location/").bearer("token");
/// assert_eq!(request.path, "/v2/characters/90000001/location/");
/// assert_eq!(request.token.as_deref(), Some("token"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EsiRequest {
    /// HTTP method
    pub method: HttpMethod,
    /// Versioned path relative to the base URL (e.g. "/v5/characters/1/")
    pub path: String,
    /// Query parameters, in insertion order
    pub params: Vec<(String, String)>,
    /// JSON request body
    pub body: Option<Vec<u8>>,
    /// Bearer token for character-scoped endpoints
    pub token: Option<String>,
    /// Whether the `X-Pages` header must be captured
    pub paged: bool,
}

impl EsiRequest {
    /// Create a GET request
    pub fn get(path: impl Into<String>) -> Self {
        Self {
            method: HttpMethod::Get,
            path: path.into(),
            params: Vec::new(),
            body: None,
            token: None,
            paged: false,
        }
    }

    /// Create a POST request
    pub fn post(path: impl Into<String>) -> Self {
        Self {
            method: HttpMethod::Post,
            ..Self::get(path)
        }
    }

    /// Add a query parameter
    pub fn param(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.params.push((key.into(), value.to_string()));
        self
    }

    /// Request one page of a paged collection and capture the page count
    pub fn page(self, page: u32) -> Self {
        let mut request = self.param("page", page);
        request.paged = true;
        request
    }

    /// Set the request body from JSON
    pub fn json_body<T: Serialize + ?Sized>(mut self, value: &T) -> Result<Self> {
        self.body = Some(serde_json::to_vec(value)?);
        Ok(self)
    }

    /// Attach a bearer token
    pub fn bearer(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Path plus percent-encoded query string
    pub fn path_and_query(&self) -> String {
        if self.params.is_empty() {
            return self.path.clone();
        }

        let query = self
            .params
            .iter()
            .map(|(key, value)| format!("{}={}", urlencoding::encode(key), urlencoding::encode(value)))
            .collect::<Vec<_>>()
            .join("&");
        let separator = if self.path.contains('?') { '&' } else { '?' };
        format!("{}{}{}", self.path, separator, query)
    }
}

// =============================================================================
// Response Types
// =============================================================================

/// Raw payload of a successful call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EsiResponse {
    /// HTTP status code (2xx)
    pub status: u16,
    /// Response body
    pub body: Vec<u8>,
    /// Total page count, only for requests built with [`EsiRequest::page`]
    pub total_pages: Option<u32>,
}

/// Position of a page within a paged collection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageInfo {
    /// Page that was requested (1-based)
    pub page: u32,
    /// Total number of pages reported by ESI
    pub total_pages: u32,
}

impl PageInfo {
    /// Check if further pages exist after this one
    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }

    /// Number of the following page, if any
    pub fn next_page(&self) -> Option<u32> {
        self.has_next().then(|| self.page + 1)
    }
}

/// One decoded page of a paged collection
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    /// Records on this page
    pub items: Vec<T>,
    /// Page descriptor
    pub info: PageInfo,
}

/// Parse the `X-Pages` header value
///
/// A missing header means the collection fits on one page.
pub fn parse_total_pages(value: Option<&str>) -> Result<u32> {
    match value {
        None => Ok(1),
        Some(raw) => match raw.trim().parse::<u32>() {
            Ok(pages) if pages > 0 => Ok(pages),
            _ => Err(EsiError::InvalidPageHeader(raw.to_string())),
        },
    }
}

// =============================================================================
// Client Configuration
// =============================================================================

/// Retry budget and delays used by the executor
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryConfig {
    /// Total number of attempts, including the first
    pub max_attempts: u32,
    /// Delay after a transport failure or a transient status
    pub retry_delay: Duration,
    /// Delay after ESI reports the error limit was hit (420)
    pub rate_limit_delay: Duration,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            retry_delay: Duration::from_secs(5),
            rate_limit_delay: Duration::from_secs(60),
        }
    }
}

impl RetryConfig {
    /// Create a retry configuration with the given attempt budget
    pub fn new(max_attempts: u32) -> Self {
        Self {
            max_attempts,
            ..Default::default()
        }
    }

    /// Set the default retry delay
    pub fn with_retry_delay(mut self, delay: Duration) -> Self {
        self.retry_delay = delay;
        self
    }

    /// Set the delay used after a 420 response
    pub fn with_rate_limit_delay(mut self, delay: Duration) -> Self {
        self.rate_limit_delay = delay;
        self
    }

    /// Attempt budget, never less than one
    fn attempts(&self) -> u32 {
        self.max_attempts.max(1)
    }
}

/// Configuration for [`EsiClient`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EsiClientConfig {
    /// Base service URL (e.g. "https://esi.evetech.net")
    pub base_url: String,
    /// User agent sent with every request
    pub user_agent: String,
    /// Per-request timeout applied to the default transport
    pub timeout: Duration,
    /// Retry behaviour
    pub retry: RetryConfig,
}

impl Default for EsiClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            user_agent: format!("eve-esi/{}", env!("CARGO_PKG_VERSION")),
            timeout: Duration::from_secs(30),
            retry: RetryConfig::default(),
        }
    }
}

impl EsiClientConfig {
    /// Create a new config with a base URL
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            ..Default::default()
        }
    }

    /// Set the user agent
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Set the timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the retry behaviour
    pub fn with_retry(mut self, retry: RetryConfig) -> Self {
        self.retry = retry;
        self
    }
}

// =============================================================================
// Status Classification
// =============================================================================

/// How the executor reacts to an HTTP status
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusClass {
    /// 2xx: return the body
    Success,
    /// 401/403: abort, retrying cannot fix authorization
    Unauthorized,
    /// 400/404: abort, the request will never succeed
    ClientError,
    /// 420: ESI error limit reached, retry after the long delay
    RateLimited,
    /// Anything else: retry after the default delay
    Transient,
}

impl StatusClass {
    /// Classify a status code
    pub fn of(status: u16) -> Self {
        match status {
            200..=299 => StatusClass::Success,
            401 | 403 => StatusClass::Unauthorized,
            400 | 404 => StatusClass::ClientError,
            420 => StatusClass::RateLimited,
            _ => StatusClass::Transient,
        }
    }

    /// Check if another attempt may succeed
    pub fn is_retryable(&self) -> bool {
        matches!(self, StatusClass::RateLimited | StatusClass::Transient)
    }
}

// =============================================================================
// Client Implementation
// =============================================================================

/// Typed ESI client
///
/// Immutable after construction and cheap to clone; clones share the
/// transport's connection pool.
///
/// # Examples
/// ```no_run
/// use esi_client::{EsiClient, EsiClientConfig};
///
/// async fn example() -> esi_client::Result<()> {
///     let client = EsiClient::new(EsiClientConfig::default())?;
///     let status = client.server_status().await?;
///     println!("{} players online", status.players);
///     Ok(())
/// }
/// ```
#[derive(Clone)]
pub struct EsiClient {
    transport: Arc<dyn Transport>,
    sleeper: Arc<dyn Sleeper>,
    config: EsiClientConfig,
}

impl fmt::Debug for EsiClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EsiClient").field("config", &self.config).finish_non_exhaustive()
    }
}

impl EsiClient {
    /// Create a client backed by a pooled reqwest transport
    pub fn new(config: EsiClientConfig) -> Result<Self> {
        let transport = ReqwestTransport::new(config.timeout)
            .map_err(|e| EsiError::Transport(e.to_string()))?;
        Ok(Self::with_transport(config, transport))
    }

    /// Create a client over a caller-supplied transport
    pub fn with_transport(config: EsiClientConfig, transport: impl Transport + 'static) -> Self {
        Self {
            transport: Arc::new(transport),
            sleeper: Arc::new(TokioSleeper),
            config,
        }
    }

    /// Replace the retry delay implementation
    pub fn with_sleeper(mut self, sleeper: impl Sleeper + 'static) -> Self {
        self.sleeper = Arc::new(sleeper);
        self
    }

    /// Get the client configuration
    pub fn config(&self) -> &EsiClientConfig {
        &self.config
    }

    /// Get the base URL
    pub fn base_url(&self) -> &str {
        &self.config.base_url
    }

    /// Absolute URL for a request
    pub fn url_for(&self, request: &EsiRequest) -> String {
        format!("{}{}", self.config.base_url, request.path_and_query())
    }

    fn transport_request(&self, request: &EsiRequest, url: &str) -> TransportRequest {
        let mut headers = HashMap::new();
        headers.insert("Accept".to_string(), "application/json".to_string());
        headers.insert("User-Agent".to_string(), self.config.user_agent.clone());

        if request.body.is_some() {
            headers.insert("Content-Type".to_string(), "application/json".to_string());
        }

        if let Some(token) = &request.token {
            headers.insert("Authorization".to_string(), format!("Bearer {}", token));
        }

        TransportRequest {
            method: request.method,
            url: url.to_string(),
            headers,
            body: request.body.clone(),
        }
    }

    /// Perform a call with bounded retry
    ///
    /// Returns on the first 2xx response. 401/403 and 400/404 abort after one
    /// attempt; 420 waits `rate_limit_delay`, every other failure waits
    /// `retry_delay`. No delay follows the final attempt.
    pub async fn execute(&self, request: EsiRequest) -> Result<EsiResponse> {
        let url = self.url_for(&request);
        let outgoing = self.transport_request(&request, &url);
        let max_attempts = self.config.retry.attempts();

        let mut last_status = None;
        let mut diagnostic = String::new();

        for attempt in 1..=max_attempts {
            tracing::debug!(method = request.method.as_str(), url = %url, attempt, "Sending ESI request");

            let delay = match self.transport.send(outgoing.clone()).await {
                Err(err) => {
                    tracing::warn!(url = %url, attempt, "ESI transport error: {}", err);
                    last_status = None;
                    diagnostic = err.to_string();
                    self.config.retry.retry_delay
                }
                Ok(response) => match StatusClass::of(response.status) {
                    StatusClass::Success => return self.finish(&request, response),
                    StatusClass::Unauthorized => {
                        tracing::warn!(url = %url, status = response.status, "Status {}: Unauthorized", response.status);
                        return Err(EsiError::Unauthorized { status: response.status, url });
                    }
                    StatusClass::ClientError => {
                        let body = response.body_text();
                        tracing::warn!(url = %url, status = response.status, "ESI client error: {}", body);
                        return Err(EsiError::Client { status: response.status, url, body });
                    }
                    class => {
                        diagnostic = response.body_text();
                        last_status = Some(response.status);
                        tracing::warn!(url = %url, status = response.status, attempt, "ESI request failed: {}", diagnostic);
                        if class == StatusClass::RateLimited {
                            self.config.retry.rate_limit_delay
                        } else {
                            self.config.retry.retry_delay
                        }
                    }
                },
            };

            if attempt < max_attempts {
                self.sleeper.sleep(delay).await;
            }
        }

        Err(EsiError::RetriesExhausted {
            url,
            attempts: max_attempts,
            last_status,
            diagnostic,
        })
    }

    fn finish(&self, request: &EsiRequest, response: TransportResponse) -> Result<EsiResponse> {
        let total_pages = if request.paged {
            Some(parse_total_pages(response.header(PAGES_HEADER))?)
        } else {
            None
        };

        Ok(EsiResponse {
            status: response.status,
            body: response.body,
            total_pages,
        })
    }

    /// Perform a call and decode the JSON body
    pub async fn fetch<T: DeserializeOwned>(&self, request: EsiRequest) -> Result<T> {
        let path = request.path.clone();
        let response = self.execute(request).await?;
        decode(&path, &response.body)
    }

    /// Fetch one page of a paged collection
    pub async fn fetch_page<T: DeserializeOwned>(&self, request: EsiRequest, page: u32) -> Result<Page<T>> {
        let path = request.path.clone();
        let response = self.execute(request.page(page)).await?;
        let items = decode(&path, &response.body)?;

        Ok(Page {
            items,
            info: PageInfo {
                page,
                total_pages: response.total_pages.unwrap_or(1),
            },
        })
    }
}

/// Decode a JSON payload, tagging failures with the request path
pub(crate) fn decode<T: DeserializeOwned>(path: &str, body: &[u8]) -> Result<T> {
    serde_json::from_slice(body).map_err(|source| EsiError::Decode {
        path: path.to_string(),
        source,
    })
}

// =============================================================================
// Tests
// =============================================================================
