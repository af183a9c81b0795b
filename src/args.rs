use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use crate::config::{DEFAULT_API_URL, DEFAULT_MIN_STARS, DEFAULT_TIMEOUT_SECS, MAX_PAGE};
use crate::credentials::{Token, TokenSource, DEFAULT_ENV_FILE, DEFAULT_TOKEN_KEY};

/// Where to look for the GitHub token when `--token` is not given.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Source {
    /// Process environment variable.
    Env,
    /// Local file of KEY=VALUE lines, such as .env.
    File,
}

/// GitHub roulette: print a random popular repository from GitHub search.
#[derive(Parser, Debug)]
#[clap(
    author,
    version,
    about,
    long_about = "Picks a random results page of GitHub's repository search (sorted by stars) and prints the name, URL and star count of one repository from it."
)]
pub struct Args {
    /// GitHub API token. Takes precedence over --source.
    #[clap(short, long)]
    pub token: Option<String>,

    /// Where to read the token from when --token is not given.
    #[clap(short, long, value_enum, default_value_t = Source::Env)]
    pub source: Source,

    /// Environment variable name, or key inside the env file, holding the token.
    #[clap(short = 'k', long, default_value = DEFAULT_TOKEN_KEY)]
    pub token_key: String,

    /// Env file read with `--source file`.
    #[clap(short = 'f', long, default_value = DEFAULT_ENV_FILE)]
    pub env_file: PathBuf,

    /// Highest results page to draw from. Search only exposes the first 1000 results.
    #[clap(
        short = 'p',
        long,
        value_name = "NUM",
        default_value_t = MAX_PAGE,
        value_parser = clap::value_parser!(u32).range(1..=(MAX_PAGE as i64))
    )]
    pub max_page: u32,

    /// Only consider repositories with more than this many stars.
    #[clap(long, value_name = "NUM", default_value_t = DEFAULT_MIN_STARS)]
    pub min_stars: u32,

    /// Seed for page and repository selection, for reproducible picks.
    #[clap(long)]
    pub seed: Option<u64>,

    /// Request timeout in seconds.
    #[clap(
        long,
        value_name = "SECS",
        default_value_t = DEFAULT_TIMEOUT_SECS,
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    pub timeout: u64,

    /// Search endpoint.
    #[clap(long, default_value = DEFAULT_API_URL, hide = true)]
    pub api_url: String,

    /// Increase log output (-v info, -vv debug).
    #[clap(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Do not show the progress spinner.
    #[clap(short, long)]
    pub quiet: bool,
}

impl Args {
    /// Token source selected by the flags. A blank `--token` is ignored.
    pub fn token_source(&self) -> TokenSource {
        match &self.token {
            Some(t) if !t.trim().is_empty() => TokenSource::Explicit(Token::new(t.trim())),
            _ => match self.source {
                Source::Env => TokenSource::Env {
                    var: self.token_key.clone(),
                },
                Source::File => TokenSource::File {
                    path: self.env_file.clone(),
                    key: self.token_key.clone(),
                },
            },
        }
    }
}
