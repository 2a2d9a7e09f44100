//! Command-line interface for planning day trips.
//!
//! The `plan` subcommand loads a JSON POI catalog and a JSON decision table,
//! runs the itinerary planner and prints the day-by-day itinerary as JSON.
#![forbid(unsafe_code)]

use clap::{Parser, Subcommand};

mod catalog;
mod error;
mod plan;

pub use error::CliError;

use plan::PlanArgs;

const ARG_CATALOG: &str = "catalog";
const ARG_DECISION_TABLE: &str = "decision-table";
const ARG_DAYS: &str = "days";
const ARG_TAGS: &str = "tags";
const ARG_SEED: &str = "seed";
const ARG_START_TIME: &str = "start-time";
const ARG_END_TIME: &str = "end-time";
const ARG_THRESHOLD: &str = "threshold";
const ARG_MAX_ATTEMPTS: &str = "max-attempts";
const ARG_START_POI: &str = "start-poi";
const ARG_OUTPUT: &str = "output";
const ENV_CATALOG: &str = "DAYTRIP_CMDS_PLAN_CATALOG";
const ENV_DECISION_TABLE: &str = "DAYTRIP_CMDS_PLAN_DECISION_TABLE";

/// Run the daytrip CLI with the current process arguments and environment.
///
/// # Errors
///
/// Returns a [`CliError`] when arguments are invalid, inputs cannot be
/// loaded, or planning fails.
pub fn run() -> Result<(), CliError> {
    let cli = Cli::try_parse().map_err(CliError::ArgumentParsing)?;
    match cli.command {
        Command::Plan(args) => plan::run_plan(args),
    }
}

#[derive(Debug, Parser)]
#[command(
    name = "daytrip",
    about = "Plan multi-day itineraries from a POI catalog and decision table",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Plan an itinerary and print it as JSON.
    Plan(PlanArgs),
}

#[cfg(test)]
mod tests;
