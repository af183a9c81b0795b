use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::header::{HeaderMap, ACCEPT, AUTHORIZATION};
use reqwest::{Client, StatusCode};
use serde_json::Value;
use tracing::{debug, warn};

use crate::config::{SearchConfig, SearchSettings, ACCEPT_HEADER};
use crate::error::{Result, RouletteError};
use crate::models::{RepositoryItem, SearchResponse};

/// A fully built search request, independent of the HTTP client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchRequest {
    pub url: String,
    pub page: u32,
    pub query: Vec<(&'static str, String)>,
    pub authorization: String,
    pub accept: &'static str,
}

impl SearchRequest {
    /// Build the request for `page` from a run's configuration.
    pub fn new(config: &SearchConfig, page: u32) -> Self {
        SearchRequest {
            url: config.settings.api_url.clone(),
            page,
            query: config.query(page),
            authorization: config.authorization(),
            accept: ACCEPT_HEADER,
        }
    }
}

/// Rate limit headers of a reply.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimit {
    pub remaining: u32,
    pub limit: u32,
    pub reset: Option<DateTime<Utc>>,
}

impl RateLimit {
    /// Read the rate limit headers. `None` when the reply carries no
    /// `X-RateLimit-Remaining` header.
    pub fn from_headers(headers: &HeaderMap) -> Option<Self> {
        let remaining = header_value::<u32>(headers, "X-RateLimit-Remaining")?;
        let limit = header_value::<u32>(headers, "X-RateLimit-Limit").unwrap_or(0);
        let reset = header_value::<i64>(headers, "X-RateLimit-Reset")
            .and_then(|timestamp| DateTime::from_timestamp(timestamp, 0));

        Some(RateLimit {
            remaining,
            limit,
            reset,
        })
    }

    /// True when no requests are left until the reset time.
    pub fn is_exhausted(&self) -> bool {
        self.remaining == 0
    }
}

/// Parse a header value, ignoring headers that are absent or malformed.
fn header_value<T: std::str::FromStr>(headers: &HeaderMap, name: &str) -> Option<T> {
    headers
        .get(name)
        .and_then(|h| h.to_str().ok())
        .and_then(|s| s.parse::<T>().ok())
}

/// Status, rate limit and raw body of a search reply.
#[derive(Debug, Clone)]
pub struct SearchReply {
    pub status: StatusCode,
    pub rate_limit: Option<RateLimit>,
    pub body: String,
}

/// Sends one search request.
#[async_trait]
pub trait SearchTransport: Send + Sync {
    /// Send the request and return the raw reply. Only failures to get a
    /// reply at all are errors; status codes are left to the caller.
    async fn send(&self, request: &SearchRequest) -> Result<SearchReply>;
}

/// Transport backed by a reqwest client.
pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    /// Create the HTTP client with the configured user agent and timeout.
    pub fn new(settings: &SearchSettings) -> Result<Self> {
        let client = Client::builder()
            .user_agent(settings.user_agent.as_str())
            .timeout(settings.timeout)
            .build()
            .map_err(|e| RouletteError::Unknown(format!("could not build HTTP client: {}", e)))?;

        Ok(ReqwestTransport { client })
    }
}

#[async_trait]
impl SearchTransport for ReqwestTransport {
    async fn send(&self, request: &SearchRequest) -> Result<SearchReply> {
        let response = self
            .client
            .get(&request.url)
            .query(&request.query)
            .header(ACCEPT, request.accept)
            .header(AUTHORIZATION, &request.authorization)
            .send()
            .await?;

        // Keep the body even for error statuses, it carries GitHub's message
        let status = response.status();
        let rate_limit = RateLimit::from_headers(response.headers());
        let body = response.text().await?;

        Ok(SearchReply {
            status,
            rate_limit,
            body,
        })
    }
}

/// Fetch one page of search results.
pub async fn fetch_repositories<T>(
    transport: &T,
    config: &SearchConfig,
    page: u32,
) -> Result<Vec<RepositoryItem>>
where
    T: SearchTransport + ?Sized,
{
    let request = SearchRequest::new(config, page);
    debug!("Requesting {} page {}", request.url, page);

    let reply = transport.send(&request).await?;

    // Log rate limit status
    if let Some(rate_limit) = reply.rate_limit {
        debug!(
            "Rate limit: {}/{} remaining",
            rate_limit.remaining, rate_limit.limit
        );
    }

    if !reply.status.is_success() {
        warn!("Search request failed with status {}", reply.status);
        return Err(RouletteError::Status {
            status: reply.status,
            detail: status_detail(&reply),
        });
    }

    parse_items(&reply.body)
}

/// Extra context for a failed status: GitHub's message and the rate limit reset.
fn status_detail(reply: &SearchReply) -> String {
    let mut detail = String::new();

    if let Some(message) = serde_json::from_str::<Value>(&reply.body)
        .ok()
        .as_ref()
        .and_then(api_message)
    {
        detail.push_str(&format!(" ({})", message));
    }

    if let Some(rate_limit) = reply.rate_limit.filter(RateLimit::is_exhausted) {
        match rate_limit.reset {
            Some(reset) => detail.push_str(&format!(
                "; rate limit exhausted, resets at {}",
                reset.format("%Y-%m-%d %H:%M:%S UTC")
            )),
            None => detail.push_str("; rate limit exhausted"),
        }
    }

    detail
}

/// The `message` field GitHub puts in error bodies.
fn api_message(json: &Value) -> Option<String> {
    json.get("message")
        .and_then(|v| v.as_str())
        .map(|s| s.to_string())
}

/// Extract the result items from a search response body.
pub fn parse_items(body: &str) -> Result<Vec<RepositoryItem>> {
    let json: Value = serde_json::from_str(body)
        .map_err(|e| RouletteError::DataShape(format!("body is not valid JSON: {}", e)))?;

    // Error and rate limit bodies have no items
    if json.get("items").is_none() {
        let reason = match api_message(&json) {
            Some(message) => format!("'items' field is missing (GitHub said: {})", message),
            None => "'items' field is missing".to_string(),
        };
        return Err(RouletteError::DataShape(reason));
    }

    let response: SearchResponse = serde_json::from_value(json)
        .map_err(|e| RouletteError::DataShape(format!("malformed 'items': {}", e)))?;

    debug!("Received {} repositories", response.items.len());
    Ok(response.items)
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::header::HeaderValue;

    #[test]
    fn parses_items_and_ignores_extra_fields() {
        let body = r#"{"total_count":1,"items":[{"name":"foo","full_name":"o/foo","html_url":"https://x/foo","stargazers_count":42}]}"#;
        let items = parse_items(body).unwrap();
        assert_eq!(
            items,
            vec![RepositoryItem {
                name: "foo".to_string(),
                html_url: "https://x/foo".to_string(),
                stargazers_count: 42,
            }]
        );
    }

    #[test]
    fn empty_items_is_not_a_shape_error() {
        assert!(parse_items(r#"{"items":[]}"#).unwrap().is_empty());
    }

    #[test]
    fn missing_items_reports_github_message() {
        let err = parse_items(r#"{"message":"API rate limit exceeded"}"#).unwrap_err();
        assert!(matches!(err, RouletteError::DataShape(_)));
        assert!(err.to_string().contains("API rate limit exceeded"));
    }

    #[test]
    fn invalid_json_is_a_shape_error() {
        let err = parse_items("<html>").unwrap_err();
        assert!(matches!(err, RouletteError::DataShape(_)));
    }

    #[test]
    fn item_without_stars_is_a_shape_error() {
        let err = parse_items(r#"{"items":[{"name":"foo","html_url":"u"}]}"#).unwrap_err();
        assert!(matches!(err, RouletteError::DataShape(_)));
    }

    #[test]
    fn rate_limit_reads_headers() {
        let mut headers = HeaderMap::new();
        headers.insert("X-RateLimit-Remaining", HeaderValue::from_static("0"));
        headers.insert("X-RateLimit-Limit", HeaderValue::from_static("30"));
        headers.insert("X-RateLimit-Reset", HeaderValue::from_static("1700000000"));

        let rate_limit = RateLimit::from_headers(&headers).unwrap();
        assert_eq!(rate_limit.remaining, 0);
        assert_eq!(rate_limit.limit, 30);
        assert_eq!(rate_limit.reset.map(|r| r.timestamp()), Some(1_700_000_000));
        assert!(rate_limit.is_exhausted());
    }

    #[test]
    fn rate_limit_absent_without_remaining_header() {
        assert!(RateLimit::from_headers(&HeaderMap::new()).is_none());
    }

    #[test]
    fn status_detail_mentions_reset_time() {
        let reply = SearchReply {
            status: StatusCode::FORBIDDEN,
            rate_limit: Some(RateLimit {
                remaining: 0,
                limit: 30,
                reset: DateTime::from_timestamp(0, 0),
            }),
            body: r#"{"message":"API rate limit exceeded"}"#.to_string(),
        };
        assert_eq!(
            status_detail(&reply),
            " (API rate limit exceeded); rate limit exhausted, resets at 1970-01-01 00:00:00 UTC"
        );
    }
}
