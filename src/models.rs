use serde::Deserialize;

/// One repository from a search results page. Only the fields we print are kept.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RepositoryItem {
    pub name: String,
    pub html_url: String,
    pub stargazers_count: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SearchResponse {
    pub items: Vec<RepositoryItem>,
}
