//! Error types for IT Glue API operations.

use thiserror::Error;

/// Errors that can occur during API operations.
#[derive(Debug, Error)]
pub enum GlueError {
    /// Configuration is missing or incomplete.
    #[error("gluapi configuration required: {0}")]
    ConfigMissing(String),

    /// Credential exchange failed. Never retried by the engine; callers may
    /// retry with new credentials.
    #[error("authentication failed: {0}")]
    Auth(AuthFailure),

    /// 429 responses persisted past the configured attempt ceiling.
    #[error("rate limited on all {attempts} attempts")]
    RateLimitExhausted { attempts: u32 },

    /// Server-side timeouts persisted even after halving the page size down
    /// to the minimum.
    #[error("server kept timing out after page size was reduced to the minimum")]
    PageSizeExhausted,

    /// Entity not found. Distinct from [`GlueError::Unexpected`] so callers
    /// can treat "missing" differently from "broken".
    #[error("{entity_type} '{id}' not found")]
    NotFound {
        entity_type: &'static str,
        id: String,
    },

    /// Retrieved-record count disagrees with the server's reported total.
    /// Indicates a server-side pagination inconsistency (e.g. records
    /// created or deleted mid-fetch); surfaced rather than silently
    /// truncated or padded.
    #[error("retrieved {actual} records but the server reported a total of {expected}")]
    ReconciliationMismatch { actual: usize, expected: u64 },

    /// Any other non-2xx or malformed response. Never retried.
    #[error("{}", unexpected_message(.title, .detail, .status_code))]
    Unexpected {
        title: Option<String>,
        detail: Option<String>,
        status_code: Option<u16>,
    },

    /// HTTP transport error.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON parsing error.
    #[error("failed to parse response: {0}")]
    Parse(#[from] serde_json::Error),

    /// URL parsing error.
    #[error("invalid URL: {0}")]
    Url(#[from] url::ParseError),
}

/// Which step of the two-step token exchange was denied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum AuthFailure {
    /// The login endpoint rejected the username/password.
    #[error("refresh token denied (HTTP {status})")]
    RefreshTokenDenied { status: u16 },

    /// The access-token endpoint rejected the refresh token.
    #[error("access token denied (HTTP {status})")]
    AccessTokenDenied { status: u16 },
}

fn unexpected_message(
    title: &Option<String>,
    detail: &Option<String>,
    status_code: &Option<u16>,
) -> String {
    let status = status_code.map(|s| format!(" ({s})")).unwrap_or_default();
    let message = detail
        .as_deref()
        .or(title.as_deref())
        .unwrap_or("no detail provided");
    format!("API error{status}: {message}")
}

/// Result type alias for API operations.
pub type Result<T> = core::result::Result<T, GlueError>;
