//! # GitHub Roulette
//!
//! Picks a random repository out of GitHub's repository search (repositories
//! with more than one star, sorted by stars) and prints its name, URL and
//! star count.
//!
//! ## Main Components
//!
//! - [`GitHubRoulette`]: runs the token → search → pick → print sequence once
//! - [`TokenSource`]: where the GitHub token comes from (environment or env file)
//! - [`SearchTransport`]: the HTTP seam; [`ReqwestTransport`] is the real one
//! - [`Args`]: command line arguments
//!
//! ## Example
//!
//! ```no_run
//! use github_roulette_lib::{Args, GitHubRoulette};
//! use clap::Parser;
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
//!     let args = Args::parse();
//!     let mut roulette = GitHubRoulette::from_args(&args)?;
//!
//!     roulette.run(&args.token_source(), &mut std::io::stdout()).await?;
//!     Ok(())
//! }
//! ```

mod args;
pub mod config;
pub mod credentials;
pub mod error;
mod github_roulette;
pub mod models;
pub mod presenter;
pub mod search;
pub mod selector;

pub use crate::args::{Args, Source};
pub use crate::credentials::{Token, TokenSource};
pub use crate::error::{ConfigError, ErrorKind, Result, RouletteError};
pub use crate::github_roulette::GitHubRoulette;
pub use crate::models::RepositoryItem;
pub use crate::search::{ReqwestTransport, SearchReply, SearchRequest, SearchTransport};
