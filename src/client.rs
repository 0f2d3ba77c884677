//! IT Glue API client.
//!
//! Low-level HTTP client that owns the authenticated header set and the
//! per-request retry/backoff policy. Higher-level operations (paginated
//! fetches, single-record gets, mutations) are built on [`GlueClient::execute`]
//! in the `fetch` and `mutate` modules, and exposed to entity types via
//! traits.

use std::env;
use std::sync::Arc;
use std::time::Duration;

use reqwest::header::HeaderMap;
use reqwest::{Client, Method, Response, StatusCode};
use url::Url;

use crate::auth::{self, Credential};
use crate::document::ErrorDocument;
use crate::error::{GlueError, Result};

const DEFAULT_API_URL: &str = "https://api.itglue.com";
const USER_AGENT: &str = concat!("gluapi/", env!("CARGO_PKG_VERSION"));

/// Retry and pagination knobs for one client.
///
/// Every operation copies what it needs into operation-local state, so a
/// mid-fetch page-size degradation never leaks into the next call.
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    /// Records requested per page before any degradation.
    pub page_size: u32,
    /// Sleep between attempts after an HTTP 429 (overridden by a
    /// `retry-after` header when the server sends one).
    pub rate_limit_backoff: Duration,
    /// Total attempts allowed when every response is a 429.
    pub rate_limit_attempts: u32,
    /// Attempts allowed against a server-reported timeout before the
    /// request is given up (paginated fetches then halve the page size).
    pub timeout_retries: u32,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            page_size: 1000,
            rate_limit_backoff: Duration::from_secs(60),
            rate_limit_attempts: 10,
            timeout_retries: 5,
        }
    }
}

/// Why a single request could not be completed.
///
/// `TimedOut` is recoverable for paginated fetches (they degrade the page
/// size and resume); everything else is terminal for the operation.
#[derive(Debug)]
pub(crate) enum RequestFailure {
    /// The server kept reporting its application-level timeout for every
    /// attempt in the retry budget.
    TimedOut { detail: String },
    /// Terminal error; surfaced to the caller as-is.
    Terminal(GlueError),
}

impl RequestFailure {
    /// Collapse into a terminal error, for callers with no page size to
    /// degrade (single fetches, mutations).
    pub(crate) fn into_error(self) -> GlueError {
        match self {
            Self::TimedOut { detail } => GlueError::Unexpected {
                title: Some("Request timed out".to_string()),
                detail: Some(detail),
                status_code: None,
            },
            Self::Terminal(err) => err,
        }
    }
}

/// Low-level IT Glue API client.
///
/// Holds the connection pool, base URL, authenticated headers, and
/// [`RetryPolicy`]. Cheaply cloneable; clones share the connection pool.
/// Entity operations are implemented via the [`Get`](crate::Get),
/// [`List`](crate::List), [`Create`](crate::Create),
/// [`Update`](crate::Update), and [`Delete`](crate::Delete) traits.
///
/// # Example
///
/// ```no_run
/// use gluapi::{Credential, GlueClient};
///
/// # async fn example() -> gluapi::Result<()> {
/// // Create from environment variables
/// let client = GlueClient::from_env()?;
///
/// // Or configure explicitly
/// let client = GlueClient::new("your-api-key", "https://api.itglue.com")?;
///
/// // Or exchange a username/password for a bearer token
/// let client = GlueClient::login(
///     Credential::UserPassword {
///         username: "user@example.com".into(),
///         password: "secret".into(),
///     },
///     "https://api.itglue.com",
/// )
/// .await?;
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct GlueClient {
    http: Client,
    base_url: Arc<Url>,
    headers: HeaderMap,
    policy: RetryPolicy,
}

impl std::fmt::Debug for GlueClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GlueClient")
            .field("base_url", &self.base_url.as_str())
            .field("policy", &self.policy)
            .finish_non_exhaustive()
    }
}

impl GlueClient {
    /// Create a client from environment variables.
    ///
    /// Uses `GLUE_API_KEY` for authentication and optionally `GLUE_API_URL`
    /// for the base URL (defaults to `https://api.itglue.com`).
    ///
    /// # Errors
    ///
    /// Returns an error if `GLUE_API_KEY` is not set.
    pub fn from_env() -> Result<Self> {
        let key = env::var("GLUE_API_KEY").map_err(|_| {
            GlueError::ConfigMissing("GLUE_API_KEY environment variable not set".to_string())
        })?;

        let base_url = env::var("GLUE_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_string());

        Self::new(&key, &base_url)
    }

    /// Create a new client with a static API key. No network call is made.
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL is invalid or the key cannot be
    /// carried in a header.
    pub fn new(api_key: &str, base_url: &str) -> Result<Self> {
        let base_url = Self::parse_base_url(base_url)?;
        let http = Self::build_http()?;
        let headers = auth::api_key_headers(api_key)?;

        Ok(Self {
            http,
            base_url: Arc::new(base_url),
            headers,
            policy: RetryPolicy::default(),
        })
    }

    /// Create a client by authenticating a [`Credential`].
    ///
    /// For [`Credential::UserPassword`] this performs the two-step
    /// refresh-token/access-token exchange against the API; for
    /// [`Credential::ApiKey`] it is equivalent to [`GlueClient::new`].
    ///
    /// # Errors
    ///
    /// Returns [`GlueError::Auth`] if either exchange step is denied. Auth
    /// failures are terminal and never retried internally.
    pub async fn login(credential: Credential, base_url: &str) -> Result<Self> {
        let base_url = Self::parse_base_url(base_url)?;
        let http = Self::build_http()?;
        let headers = auth::authenticate(&http, &base_url, &credential).await?;

        Ok(Self {
            http,
            base_url: Arc::new(base_url),
            headers,
            policy: RetryPolicy::default(),
        })
    }

    /// Replace the retry policy.
    #[must_use]
    pub fn with_policy(mut self, policy: RetryPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Get the base URL.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Get the retry policy.
    pub fn policy(&self) -> &RetryPolicy {
        &self.policy
    }

    fn parse_base_url(base_url: &str) -> Result<Url> {
        // Ensure base URL ends with / so join() keeps the full path.
        let base_url_str = if base_url.ends_with('/') {
            base_url.to_string()
        } else {
            format!("{base_url}/")
        };
        Ok(Url::parse(&base_url_str)?)
    }

    fn build_http() -> Result<Client> {
        Client::builder()
            .user_agent(USER_AGENT)
            .brotli(true)
            .gzip(true)
            .deflate(true)
            .timeout(Duration::from_secs(300))
            .build()
            .map_err(GlueError::Http)
    }

    /// Issue one logical request, absorbing retryable failures.
    ///
    /// This is the retry core every operation goes through — count probes,
    /// page requests, single-record gets, and mutations alike:
    ///
    /// - HTTP 429: sleep the policy backoff (or the server's `retry-after`)
    ///   and resend, up to `rate_limit_attempts` total attempts; past the
    ///   ceiling, terminal [`GlueError::RateLimitExhausted`].
    /// - A response body carrying the server's "timed out" detail: resend
    ///   immediately, up to `timeout_retries` attempts; past the budget,
    ///   [`RequestFailure::TimedOut`] so paginated callers can degrade the
    ///   page size.
    /// - Any other non-2xx response: terminal [`GlueError::Unexpected`],
    ///   never retried.
    #[tracing::instrument(skip(self, query, body))]
    pub(crate) async fn execute(
        &self,
        method: Method,
        path: &str,
        query: &[(String, String)],
        body: Option<&serde_json::Value>,
    ) -> std::result::Result<Response, RequestFailure> {
        let url = self
            .base_url
            .join(path)
            .map_err(|e| RequestFailure::Terminal(GlueError::Url(e)))?;

        let mut rate_limit_hits: u32 = 0;
        let mut timeout_hits: u32 = 0;

        loop {
            let mut request = self
                .http
                .request(method.clone(), url.clone())
                .headers(self.headers.clone());
            if !query.is_empty() {
                request = request.query(query);
            }
            if let Some(body) = body {
                request = request.json(body);
            }

            let response = request
                .send()
                .await
                .map_err(|e| RequestFailure::Terminal(GlueError::Http(e)))?;

            let status = response.status();
            if status.is_success() {
                return Ok(response);
            }

            if status == StatusCode::TOO_MANY_REQUESTS {
                rate_limit_hits += 1;
                if rate_limit_hits >= self.policy.rate_limit_attempts {
                    tracing::error!(
                        attempts = rate_limit_hits,
                        "rate limit persisted past the attempt ceiling"
                    );
                    return Err(RequestFailure::Terminal(GlueError::RateLimitExhausted {
                        attempts: rate_limit_hits,
                    }));
                }

                let backoff = retry_after(&response).unwrap_or(self.policy.rate_limit_backoff);
                tracing::warn!(
                    attempt = rate_limit_hits,
                    backoff_secs = backoff.as_secs_f64(),
                    "rate limited; backing off"
                );
                tokio::time::sleep(backoff).await;
                continue;
            }

            let body_text = response.text().await.unwrap_or_default();
            let error_doc = ErrorDocument::from_body(&body_text);

            if error_doc.is_timeout() {
                timeout_hits += 1;
                if timeout_hits >= self.policy.timeout_retries {
                    tracing::warn!(
                        attempts = timeout_hits,
                        "server-side timeout persisted past the retry budget"
                    );
                    return Err(RequestFailure::TimedOut {
                        detail: error_doc.detail().unwrap_or_default(),
                    });
                }
                tracing::warn!(attempt = timeout_hits, "server-side timeout; retrying");
                continue;
            }

            tracing::error!(status = status.as_u16(), "request failed");
            return Err(RequestFailure::Terminal(GlueError::Unexpected {
                title: error_doc.title(),
                detail: error_doc.detail().or_else(|| {
                    (!body_text.is_empty()).then(|| body_text.clone())
                }),
                status_code: Some(status.as_u16()),
            }));
        }
    }
}

/// Parse a 429's `retry-after` header, in seconds.
fn retry_after(response: &Response) -> Option<Duration> {
    response
        .headers()
        .get("retry-after")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.parse().ok())
        .map(Duration::from_secs)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_debug_redacts_headers() {
        let client = GlueClient::new("test-key", "https://api.itglue.com").unwrap();
        let debug = format!("{client:?}");
        assert!(debug.contains("GlueClient"));
        assert!(debug.contains("base_url"));
        assert!(!debug.contains("test-key"));
    }

    #[test]
    fn test_base_url_trailing_slash() {
        let client1 = GlueClient::new("key", "https://api.itglue.com").unwrap();
        let client2 = GlueClient::new("key", "https://api.itglue.com/").unwrap();
        assert_eq!(client1.base_url().as_str(), client2.base_url().as_str());
    }

    #[test]
    fn test_default_policy_matches_documented_defaults() {
        let policy = RetryPolicy::default();
        assert_eq!(policy.page_size, 1000);
        assert_eq!(policy.rate_limit_backoff, Duration::from_secs(60));
        assert_eq!(policy.rate_limit_attempts, 10);
        assert_eq!(policy.timeout_retries, 5);
    }

    #[test]
    fn test_new_sets_api_key_header() {
        let client = GlueClient::new("abc123", "https://api.itglue.com").unwrap();
        assert_eq!(client.headers.get("x-api-key").unwrap(), "abc123");
        assert_eq!(
            client.headers.get(reqwest::header::CONTENT_TYPE).unwrap(),
            crate::auth::JSON_API_CONTENT_TYPE
        );
    }
}
