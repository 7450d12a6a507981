//! GitHub API client
//!
//! Minimal GitHub API client for the organization-members and user-events endpoints.

use chrono::{DateTime, Utc};
use core::fmt::Write;
use core::time::Duration;
use ohno::IntoAppError;
use reqwest::StatusCode;
use reqwest::header::{ETAG, HeaderMap, IF_NONE_MATCH};

/// The hosting API rejects requests without a user agent.
const USER_AGENT: &str = "org-pulse";

/// Upper bound for establishing a connection, TLS handshake included.
const CONNECT_TIMEOUT: Duration = Duration::from_secs(30);

/// Upper bound for a whole request, from connect to the last body byte.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Rate limit information from response headers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimitInfo {
    pub remaining: usize,
    pub reset_at: DateTime<Utc>,
}

/// Result of a hosting API call
#[derive(Debug)]
pub enum ApiResult<T> {
    /// Request succeeded - contains data and optional rate limit info
    Success(T, Option<RateLimitInfo>),

    /// The conditional request matched the cached etag, nothing changed upstream
    NotModified(Option<RateLimitInfo>),

    /// Transport failure, timeout, or an unexpected status
    Failed(ohno::AppError, Option<RateLimitInfo>),
}

impl<T> ApiResult<T> {
    /// Rate limit info attached to the response, whatever its outcome
    #[must_use]
    pub const fn rate_limit(&self) -> Option<RateLimitInfo> {
        match self {
            Self::Success(_, rate_limit) | Self::NotModified(rate_limit) | Self::Failed(_, rate_limit) => *rate_limit,
        }
    }
}

/// Hosting API client authenticated with a single static credential
#[derive(Debug, Clone)]
#[expect(clippy::struct_field_names, reason = "client field stores the underlying HTTP client")]
pub struct Client {
    client: reqwest::Client,
}

impl Client {
    /// Create a new client that authenticates every request with `token`
    pub fn new(token: &str) -> crate::Result<Self> {
        Self::with_timeouts(token, CONNECT_TIMEOUT, REQUEST_TIMEOUT)
    }

    /// Like [`Client::new`], with explicit connect and whole-request timeouts.
    ///
    /// A request exceeding either bound ends as [`ApiResult::Failed`].
    pub fn with_timeouts(token: &str, connect_timeout: Duration, request_timeout: Duration) -> crate::Result<Self> {
        use reqwest::header::{AUTHORIZATION, HeaderValue};

        let mut auth_val = HeaderValue::from_str(&format!("token {token}"))?;
        auth_val.set_sensitive(true);

        let mut headers = HeaderMap::new();
        let _ = headers.insert(AUTHORIZATION, auth_val);

        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .default_headers(headers)
            .connect_timeout(connect_timeout)
            .timeout(request_timeout)
            .build()?;

        Ok(Self { client })
    }

    /// Make a GET call, optionally conditional on `etag`, and classify the result
    pub async fn api_call(&self, url: &str, etag: Option<&str>) -> ApiResult<reqwest::Response> {
        let mut request = self.client.get(url);
        if let Some(etag) = etag {
            request = request.header(IF_NONE_MATCH, etag);
        }

        let resp = match request.send().await.into_app_err_with(|| format!("unable to reach '{url}'")) {
            Ok(r) => r,
            Err(e) => return ApiResult::Failed(e, None),
        };

        // Extract rate limit info from response headers before checking status
        let rate_limit = extract_rate_limit_from_headers(resp.headers());

        let status = resp.status();
        if status == StatusCode::NOT_MODIFIED {
            return ApiResult::NotModified(rate_limit);
        }

        if status == StatusCode::OK {
            return ApiResult::Success(resp, rate_limit);
        }

        let dump = dump_response(resp).await;
        ApiResult::Failed(
            ohno::app_err!("unexpected status {status} from '{url}', response dump:\n{dump}"),
            rate_limit,
        )
    }
}

/// Extract the etag a response carries, if any
#[must_use]
pub fn extract_etag(headers: &HeaderMap) -> Option<String> {
    let etag = headers.get(ETAG)?.to_str().ok()?;
    if etag.is_empty() { None } else { Some(etag.to_string()) }
}

/// Extract rate limit information from API response headers
fn extract_rate_limit_from_headers(headers: &HeaderMap) -> Option<RateLimitInfo> {
    let remaining = headers.get("x-ratelimit-remaining")?.to_str().ok()?.parse::<usize>().ok()?;

    let reset_timestamp = headers.get("x-ratelimit-reset")?.to_str().ok()?.parse::<i64>().ok()?;

    let reset_at = DateTime::from_timestamp(reset_timestamp, 0)?;

    Some(RateLimitInfo { remaining, reset_at })
}

/// Render status line, headers, and body of a response for diagnostics
async fn dump_response(resp: reqwest::Response) -> String {
    let mut dump = format!("{:?} {}\n", resp.version(), resp.status());
    for (name, value) in resp.headers() {
        let _ = writeln!(dump, "{name}: {}", value.to_str().unwrap_or("<binary>"));
    }
    dump.push('\n');

    match resp.text().await {
        Ok(body) => dump.push_str(&body),
        Err(e) => {
            let _ = write!(dump, "<unreadable body: {e:#}>");
        }
    }

    dump
}
