use std::io::Write;
use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, info};

use crate::config::{SearchConfig, SearchSettings};
use crate::credentials::TokenSource;
use crate::error::Result;
use crate::models::RepositoryItem;
use crate::presenter::display_repository;
use crate::search::{fetch_repositories, ReqwestTransport, SearchTransport};
use crate::selector::{random_page, select_repository};
use crate::Args;

/// One roulette run: load the token, fetch a random page, pick and print a repository.
pub struct GitHubRoulette<T, R> {
    settings: SearchSettings,
    transport: T,
    rng: R,
    progress: ProgressBar,
}

impl GitHubRoulette<ReqwestTransport, StdRng> {
    /// Create a roulette backed by reqwest, configured from command line arguments.
    pub fn from_args(args: &Args) -> Result<Self> {
        let settings = SearchSettings::from(args);
        let transport = ReqwestTransport::new(&settings)?;

        let rng = match args.seed {
            Some(seed) => {
                info!("Using fixed seed {}", seed);
                StdRng::seed_from_u64(seed)
            }
            None => StdRng::from_os_rng(),
        };

        let roulette = GitHubRoulette::new(settings, transport, rng);
        Ok(if args.quiet {
            roulette
        } else {
            roulette.with_spinner()
        })
    }
}

impl<T, R> GitHubRoulette<T, R>
where
    T: SearchTransport,
    R: Rng,
{
    /// Create a roulette from explicit parts. No spinner is shown.
    pub fn new(settings: SearchSettings, transport: T, rng: R) -> Self {
        GitHubRoulette {
            settings,
            transport,
            rng,
            progress: ProgressBar::hidden(),
        }
    }

    /// Show a spinner on stderr while the request is in flight.
    pub fn with_spinner(mut self) -> Self {
        let spinner = ProgressBar::new_spinner();
        spinner.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.green} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner())
                .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"),
        );
        self.progress = spinner;
        self
    }

    /// The transport requests are sent through.
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Load the token, pick a repository and print it to `out`.
    ///
    /// The token is loaded before anything touches the network, so a missing
    /// token never results in a request.
    pub async fn run<W: Write + ?Sized>(
        &mut self,
        source: &TokenSource,
        out: &mut W,
    ) -> Result<RepositoryItem> {
        // Token first, so a missing token never reaches the transport
        let token = source.load()?;
        let config = SearchConfig::new(self.settings.clone(), token);

        let repo = self.spin(&config).await?;

        // Print only once a repository has been picked
        display_repository(out, &repo)?;
        Ok(repo)
    }

    /// Fetch a random page and pick one repository from it.
    pub async fn spin(&mut self, config: &SearchConfig) -> Result<RepositoryItem> {
        let page = random_page(&mut self.rng, config.settings.max_page);
        info!("Spinning the roulette on page {}", page);

        self.progress
            .set_message(format!("Searching GitHub repositories - page {}", page));
        if !self.progress.is_hidden() {
            self.progress.enable_steady_tick(Duration::from_millis(80));
        }

        // Clear the spinner before reporting either outcome
        let fetched = fetch_repositories(&self.transport, config, page).await;
        self.progress.finish_and_clear();
        let repos = fetched?;

        let repo = select_repository(&repos, &mut self.rng)?;
        debug!(
            "Picked {} ({} stars) out of {} repositories",
            repo.name,
            repo.stargazers_count,
            repos.len()
        );
        Ok(repo.clone())
    }
}
