#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use github_roulette_lib::config::SearchSettings;
use github_roulette_lib::{Result, SearchReply, SearchRequest, SearchTransport};
use reqwest::StatusCode;

pub const SINGLE_ITEM_BODY: &str =
    r#"{"items":[{"name":"foo","html_url":"https://x/foo","stargazers_count":42}]}"#;

/// Transport that answers every request with a canned reply and records what it was sent.
pub struct FakeTransport {
    status: StatusCode,
    body: String,
    calls: AtomicUsize,
    requests: Mutex<Vec<SearchRequest>>,
}

impl FakeTransport {
    pub fn new(status: StatusCode, body: impl Into<String>) -> Self {
        FakeTransport {
            status,
            body: body.into(),
            calls: AtomicUsize::new(0),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn ok(body: impl Into<String>) -> Self {
        Self::new(StatusCode::OK, body)
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn requests(&self) -> Vec<SearchRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl SearchTransport for FakeTransport {
    async fn send(&self, request: &SearchRequest) -> Result<SearchReply> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.requests.lock().unwrap().push(request.clone());
        Ok(SearchReply {
            status: self.status,
            rate_limit: None,
            body: self.body.clone(),
        })
    }
}

/// Response body with `count` repositories named repo-0, repo-1, ...
pub fn items_body(count: usize) -> String {
    let items: Vec<String> = (0..count)
        .map(|i| {
            format!(
                r#"{{"name":"repo-{i}","html_url":"https://github.com/o/repo-{i}","stargazers_count":{}}}"#,
                1000 - i
            )
        })
        .collect();
    format!(r#"{{"total_count":{},"items":[{}]}}"#, count, items.join(","))
}

pub fn settings() -> SearchSettings {
    SearchSettings {
        api_url: "https://api.test/search/repositories".to_string(),
        ..SearchSettings::default()
    }
}
