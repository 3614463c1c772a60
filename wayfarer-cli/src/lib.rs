//! Command-line interface for planning routes with the Wayfarer engine.
#![forbid(unsafe_code)]

use clap::{Parser, Subcommand};

mod error;
mod fs;
mod plan;

pub use error::CliError;
use plan::{PlanArgs, run_plan};

const ARG_PLAN_REQUEST: &str = "request";
const ARG_PLAN_DIRECTIONS_URL: &str = "directions-url";
const ARG_PLAN_API_KEY: &str = "api-key";
const ARG_PLAN_OFFLINE: &str = "offline";
const ARG_PLAN_TIMEOUT_SECS: &str = "timeout-secs";
const ENV_PLAN_REQUEST: &str = "WAYFARER_CMDS_PLAN_REQUEST_PATH";

/// Run the Wayfarer CLI with the current process arguments and environment.
pub fn run() -> Result<(), CliError> {
    let cli = Cli::try_parse().map_err(CliError::ArgumentParsing)?;
    match cli.command {
        Command::Plan(args) => run_plan(args),
    }
}

#[derive(Debug, Parser)]
#[command(
    name = "wayfarer",
    about = "Route planning utilities for the Wayfarer engine",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Plan a route from a JSON request and print it with its map viewport.
    Plan(PlanArgs),
}

#[cfg(test)]
mod tests;
