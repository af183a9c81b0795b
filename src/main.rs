use std::io::{self, Write};
use std::process::ExitCode;

use clap::Parser;
use github_roulette_lib::{Args, GitHubRoulette, RouletteError};
use tracing::{debug, info, Level};

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let args = Args::parse();

    // Logs go to stderr; stdout carries only the result.
    let level = match args.verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        _ => Level::DEBUG,
    };
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_max_level(level)
        .with_target(false)
        .init();

    let outcome = match GitHubRoulette::from_args(&args) {
        Ok(mut roulette) => roulette.run(&args.token_source(), &mut io::stdout()).await,
        Err(e) => Err(e),
    };

    match outcome {
        Ok(repo) => {
            info!("Displayed {}", repo.html_url);
            ExitCode::SUCCESS
        }
        Err(e) => ExitCode::from(report_failure(&mut io::stdout(), &e)),
    }
}

/// Print the failure as a single line and return its exit code.
fn report_failure<W: Write>(out: &mut W, error: &RouletteError) -> u8 {
    debug!(kind = ?error.kind(), "Run failed: {:?}", error);
    // Nothing more can be reported if stdout itself is gone
    let _ = writeln!(out, "{}", error);
    error.exit_code()
}
