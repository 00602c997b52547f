//! Command-line interface for the Collegiate matching engine.
#![forbid(unsafe_code)]

use clap::{ArgAction, Parser, Subcommand};
use tracing_subscriber::{EnvFilter, fmt};

mod error;
mod explain;
mod payload;
mod rank;
mod sources;

pub use error::CliError;

use explain::{ExplainArgs, run_explain};
use rank::{RankArgs, run_rank};

pub(crate) const ARG_RANK_REQUEST: &str = "request";
pub(crate) const ARG_RANK_DATASET: &str = "dataset";
pub(crate) const ARG_RANK_GEOCODING_URL: &str = "geocoding-url";
pub(crate) const ARG_RANK_IMAGE_SEARCH_URL: &str = "image-search-url";
pub(crate) const ARG_RANK_API_KEY: &str = "api-key";
pub(crate) const ARG_RANK_SEARCH_ENGINE_ID: &str = "search-engine-id";
pub(crate) const ARG_RANK_SIMILARITY: &str = "similarity";
pub(crate) const ARG_RANK_BANDWIDTH: &str = "bandwidth";
pub(crate) const ARG_RANK_TIMEOUT_SECS: &str = "timeout-secs";
pub(crate) const ENV_RANK_REQUEST: &str = "COLLEGIATE_CMDS_RANK_REQUEST_PATH";
pub(crate) const ENV_RANK_DATASET: &str = "COLLEGIATE_CMDS_RANK_DATASET";
pub(crate) const ENV_RANK_API_KEY: &str = "COLLEGIATE_CMDS_RANK_API_KEY";

pub(crate) const ARG_EXPLAIN_REQUEST: &str = "request";
pub(crate) const ARG_EXPLAIN_COMPLETION_COMMAND: &str = "completion-command";
pub(crate) const ENV_EXPLAIN_REQUEST: &str = "COLLEGIATE_CMDS_EXPLAIN_REQUEST_PATH";
pub(crate) const ENV_EXPLAIN_COMPLETION_COMMAND: &str =
    "COLLEGIATE_CMDS_EXPLAIN_COMPLETION_COMMAND";

/// Run the Collegiate CLI with the current process arguments and environment.
///
/// # Errors
/// Returns [`CliError`] when argument parsing, configuration merging or the
/// selected command fails.
pub fn run() -> Result<(), CliError> {
    let cli = Cli::try_parse().map_err(CliError::ArgumentParsing)?;
    init_logging(cli.verbose);
    match cli.command {
        Command::Rank(args) => run_rank(args),
        Command::Explain(args) => run_explain(args),
    }
}

fn init_logging(verbose: u8) {
    let filter = match verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };
    // An embedding process may already own the global subscriber.
    let _ = fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

#[derive(Debug, Parser)]
#[command(
    name = "collegiate",
    about = "Rank colleges near a location against a student's preferences",
    version
)]
struct Cli {
    /// Increase log verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Rank institutions near a location for a JSON match request.
    Rank(RankArgs),
    /// Explain an institution's match score through a text completion model.
    Explain(ExplainArgs),
}

#[cfg(test)]
mod tests;
