//! Authentication: credentials and the header sets derived from them.
//!
//! Two modes, one output. A static API key turns into headers synchronously;
//! a username/password pair is exchanged over the network in two steps
//! (login -> refresh token, refresh token -> short-lived access token).
//! Either way the caller ends up with the header set every subsequent
//! request carries.

use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use reqwest::Client;
use serde::Deserialize;
use url::Url;

use crate::error::{AuthFailure, GlueError, Result};

/// Media type the API requires on every request.
pub(crate) const JSON_API_CONTENT_TYPE: &str = "application/vnd.api+json";

const LOGIN_PATH: &str = "login";
const ACCESS_TOKEN_PATH: &str = "access_token";

/// A credential supplied by the caller.
///
/// Never persisted by this crate; a username/password pair exists only for
/// the duration of the token exchange.
#[derive(Clone)]
pub enum Credential {
    /// Opaque static API key, sent as `x-api-key` on every request.
    ApiKey(String),
    /// Username/password, exchanged for a short-lived bearer token.
    UserPassword { username: String, password: String },
}

impl std::fmt::Debug for Credential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ApiKey(_) => f.debug_tuple("ApiKey").field(&"<redacted>").finish(),
            Self::UserPassword { username, .. } => f
                .debug_struct("UserPassword")
                .field("username", username)
                .field("password", &"<redacted>")
                .finish(),
        }
    }
}

#[derive(Deserialize)]
struct RefreshTokenResponse {
    refresh_token: String,
}

#[derive(Deserialize)]
struct AccessTokenResponse {
    access_token: String,
}

/// Header set for static API-key authentication. No network call.
pub(crate) fn api_key_headers(key: &str) -> Result<HeaderMap> {
    let mut headers = base_headers();
    let value = HeaderValue::from_str(key).map_err(|_| {
        GlueError::ConfigMissing("API key contains invalid header characters".to_string())
    })?;
    headers.insert("x-api-key", value);
    Ok(headers)
}

/// Produce the request header set for a credential.
///
/// API keys require no network call. Username/password performs the two-step
/// exchange against `base_url`; either step failing with a non-2xx status is
/// terminal (`GlueError::Auth`) and is never retried here — the caller may
/// retry with new credentials.
pub(crate) async fn authenticate(
    http: &Client,
    base_url: &Url,
    credential: &Credential,
) -> Result<HeaderMap> {
    match credential {
        Credential::ApiKey(key) => api_key_headers(key),
        Credential::UserPassword { username, password } => {
            let access_token = exchange_tokens(http, base_url, username, password).await?;
            let mut headers = base_headers();
            let value = HeaderValue::from_str(&format!("Bearer {access_token}")).map_err(|_| {
                GlueError::ConfigMissing(
                    "access token contains invalid header characters".to_string(),
                )
            })?;
            headers.insert(AUTHORIZATION, value);
            Ok(headers)
        }
    }
}

fn base_headers() -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(CONTENT_TYPE, HeaderValue::from_static(JSON_API_CONTENT_TYPE));
    headers
}

async fn exchange_tokens(
    http: &Client,
    base_url: &Url,
    username: &str,
    password: &str,
) -> Result<String> {
    // Step 1: credentials -> refresh token.
    let login_url = base_url.join(LOGIN_PATH)?;
    let response = http
        .post(login_url)
        .json(&serde_json::json!({"username": username, "password": password}))
        .send()
        .await
        .map_err(GlueError::Http)?;

    let status = response.status();
    if !status.is_success() {
        tracing::error!(status = status.as_u16(), "login rejected");
        return Err(GlueError::Auth(AuthFailure::RefreshTokenDenied {
            status: status.as_u16(),
        }));
    }
    let refresh: RefreshTokenResponse = response.json().await.map_err(GlueError::Http)?;

    // Step 2: refresh token -> access token.
    let token_url = base_url.join(ACCESS_TOKEN_PATH)?;
    let response = http
        .get(token_url)
        .bearer_auth(&refresh.refresh_token)
        .send()
        .await
        .map_err(GlueError::Http)?;

    let status = response.status();
    if !status.is_success() {
        tracing::error!(status = status.as_u16(), "access token request rejected");
        return Err(GlueError::Auth(AuthFailure::AccessTokenDenied {
            status: status.as_u16(),
        }));
    }
    let access: AccessTokenResponse = response.json().await.map_err(GlueError::Http)?;

    tracing::debug!("token exchange complete");
    Ok(access.access_token)
}
