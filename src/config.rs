use std::time::Duration;

use crate::credentials::Token;
use crate::Args;

pub const DEFAULT_API_URL: &str = "https://api.github.com/search/repositories";
pub const ACCEPT_HEADER: &str = "application/vnd.github.v3+json";
pub const USER_AGENT: &str = concat!("github-roulette/", env!("CARGO_PKG_VERSION"));

/// Results per page. The search endpoint caps this at 100.
pub const PER_PAGE: u32 = 100;

/// The search endpoint never returns more than 1000 results, so with
/// `PER_PAGE` results per page only the first 10 pages are reachable.
pub const MAX_PAGE: u32 = 10;

pub const DEFAULT_MIN_STARS: u32 = 1;
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Everything about a search except the credential.
#[derive(Debug, Clone)]
pub struct SearchSettings {
    pub api_url: String,
    pub min_stars: u32,
    pub per_page: u32,
    pub max_page: u32,
    pub timeout: Duration,
    pub user_agent: String,
}

impl Default for SearchSettings {
    fn default() -> Self {
        SearchSettings {
            api_url: DEFAULT_API_URL.to_string(),
            min_stars: DEFAULT_MIN_STARS,
            per_page: PER_PAGE,
            max_page: MAX_PAGE,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            user_agent: USER_AGENT.to_string(),
        }
    }
}

impl From<&Args> for SearchSettings {
    fn from(args: &Args) -> Self {
        SearchSettings {
            api_url: args.api_url.clone(),
            min_stars: args.min_stars,
            max_page: args.max_page.clamp(1, MAX_PAGE),
            timeout: Duration::from_secs(args.timeout),
            ..SearchSettings::default()
        }
    }
}

/// Settings plus token for a single run.
#[derive(Debug, Clone)]
pub struct SearchConfig {
    pub settings: SearchSettings,
    pub token: Token,
}

impl SearchConfig {
    pub fn new(settings: SearchSettings, token: Token) -> Self {
        SearchConfig { settings, token }
    }

    pub fn authorization(&self) -> String {
        format!("token {}", self.token.as_str())
    }

    /// Query parameters for the given page.
    pub fn query(&self, page: u32) -> Vec<(&'static str, String)> {
        vec![
            ("q", format!("stars:>{}", self.settings.min_stars)),
            ("sort", "stars".to_string()),
            ("order", "desc".to_string()),
            ("per_page", self.settings.per_page.to_string()),
            ("page", page.to_string()),
        ]
    }
}
