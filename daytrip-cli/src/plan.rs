//! Plan command implementation for the daytrip CLI.

use std::collections::BTreeMap;
use std::io::Write;

use camino::{Utf8Path, Utf8PathBuf};
use clap::Parser;
use daytrip_core::{
    DayPlan, DistanceMatrix, Itinerary, ItineraryPlanner, PlanRequest, Planner, PlannerConfig,
    TagSet, TripConfig,
};
use log::info;
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use serde::{Deserialize, Serialize};

use crate::catalog::{load_catalog, load_decision_table};
use crate::{
    ARG_CATALOG, ARG_DAYS, ARG_DECISION_TABLE, ARG_END_TIME, ARG_MAX_ATTEMPTS, ARG_OUTPUT,
    ARG_SEED, ARG_START_POI, ARG_START_TIME, ARG_TAGS, ARG_THRESHOLD, CliError, ENV_CATALOG,
    ENV_DECISION_TABLE,
};

/// CLI arguments for the `plan` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    long_about = "Plan a multi-day itinerary by walking a precomputed decision \
                 table. Each day is retried from a random start until its \
                 reward reaches the acceptance threshold. Inputs can come \
                 from CLI flags, configuration files, or environment \
                 variables.",
    about = "Plan an itinerary"
)]
#[ortho_config(prefix = "DAYTRIP")]
pub(crate) struct PlanArgs {
    /// Path to the JSON POI catalog.
    #[arg(long = ARG_CATALOG, value_name = "path")]
    #[serde(default)]
    pub(crate) catalog: Option<Utf8PathBuf>,
    /// Path to the JSON decision table.
    #[arg(long = ARG_DECISION_TABLE, value_name = "path")]
    #[serde(default)]
    pub(crate) decision_table: Option<Utf8PathBuf>,
    /// Number of days to plan (default 1).
    #[arg(long = ARG_DAYS, value_name = "n")]
    #[serde(default)]
    pub(crate) days: Option<u32>,
    /// Comma-separated tag codes the visitor cares about.
    #[arg(long = ARG_TAGS, value_name = "list")]
    #[serde(default)]
    pub(crate) tags: Option<String>,
    /// Seed for start selection (default 0).
    #[arg(long = ARG_SEED, value_name = "n")]
    #[serde(default)]
    pub(crate) seed: Option<u64>,
    /// Start of the day in minutes since midnight (default 720).
    #[arg(long = ARG_START_TIME, value_name = "minutes")]
    #[serde(default)]
    pub(crate) start_time: Option<u32>,
    /// End of the day in minutes since midnight (default 1260).
    #[arg(long = ARG_END_TIME, value_name = "minutes")]
    #[serde(default)]
    pub(crate) end_time: Option<u32>,
    /// Minimum reward for a day to be accepted (default 90).
    #[arg(long = ARG_THRESHOLD, value_name = "reward", allow_negative_numbers = true)]
    #[serde(default)]
    pub(crate) threshold: Option<i32>,
    /// Rollouts tried per day before giving up (default 1000).
    #[arg(long = ARG_MAX_ATTEMPTS, value_name = "n")]
    #[serde(default)]
    pub(crate) max_attempts: Option<u32>,
    /// Identifier of the POI every day starts from.
    #[arg(long = ARG_START_POI, value_name = "id")]
    #[serde(default)]
    pub(crate) start_poi: Option<u64>,
    /// Write the itinerary here instead of standard output.
    #[arg(long = ARG_OUTPUT, value_name = "path")]
    #[serde(default)]
    pub(crate) output: Option<Utf8PathBuf>,
}

impl PlanArgs {
    pub(crate) fn into_config(self) -> Result<PlanConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        PlanConfig::try_from(merged)
    }
}

/// Resolved `plan` command configuration.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct PlanConfig {
    pub(crate) catalog: Utf8PathBuf,
    pub(crate) decision_table: Utf8PathBuf,
    pub(crate) request: PlanRequest,
    pub(crate) planner: PlannerConfig,
    pub(crate) output: Option<Utf8PathBuf>,
}

impl PlanConfig {
    pub(crate) fn validate_sources(&self) -> Result<(), CliError> {
        Self::require_existing(&self.catalog, ARG_CATALOG)?;
        Self::require_existing(&self.decision_table, ARG_DECISION_TABLE)?;
        Ok(())
    }

    fn require_existing(path: &Utf8Path, field: &'static str) -> Result<(), CliError> {
        match daytrip_fs::file_is_file(path) {
            Ok(true) => Ok(()),
            Ok(false) => Err(CliError::SourcePathNotFile {
                field,
                path: path.to_path_buf(),
            }),
            Err(source) if source.kind() == std::io::ErrorKind::NotFound => {
                Err(CliError::MissingSourceFile {
                    field,
                    path: path.to_path_buf(),
                })
            }
            Err(source) => Err(CliError::InspectSourcePath {
                field,
                path: path.to_path_buf(),
                source,
            }),
        }
    }
}

impl TryFrom<PlanArgs> for PlanConfig {
    type Error = CliError;

    fn try_from(args: PlanArgs) -> Result<Self, Self::Error> {
        let catalog = args.catalog.ok_or(CliError::MissingArgument {
            field: ARG_CATALOG,
            env: ENV_CATALOG,
        })?;
        let decision_table = args.decision_table.ok_or(CliError::MissingArgument {
            field: ARG_DECISION_TABLE,
            env: ENV_DECISION_TABLE,
        })?;

        let defaults = PlannerConfig::default();
        let planner = PlannerConfig {
            trip: TripConfig {
                start_time: args.start_time.unwrap_or(defaults.trip.start_time),
                end_time: args.end_time.unwrap_or(defaults.trip.end_time),
                ..defaults.trip
            },
            acceptance_threshold: args.threshold.unwrap_or(defaults.acceptance_threshold),
            max_attempts: args.max_attempts.unwrap_or(defaults.max_attempts),
        };

        let tags = parse_tags(args.tags.as_deref().unwrap_or_default())?;
        let mut request = PlanRequest::new(args.days.unwrap_or(1), tags)
            .with_seed(args.seed.unwrap_or_default());
        request.start_poi = args.start_poi;

        Ok(Self {
            catalog,
            decision_table,
            request,
            planner,
            output: args.output,
        })
    }
}

/// Parse a comma-separated list of tag codes; blank entries are skipped.
pub(crate) fn parse_tags(list: &str) -> Result<TagSet, CliError> {
    list.split(',')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(|entry| {
            entry.parse::<u32>().map_err(|_| CliError::InvalidTag {
                value: entry.to_owned(),
            })
        })
        .collect()
}

pub(crate) fn run_plan(args: PlanArgs) -> Result<(), CliError> {
    let mut stdout = std::io::stdout().lock();
    run_plan_with(args, &mut stdout)
}

pub(crate) fn run_plan_with(args: PlanArgs, writer: &mut dyn Write) -> Result<(), CliError> {
    let config = resolve_plan_config(args)?;
    let itinerary = execute_plan(&config)?;
    write_itinerary(&config, &itinerary, writer)
}

fn resolve_plan_config(args: PlanArgs) -> Result<PlanConfig, CliError> {
    let config = args.into_config()?;
    config.validate_sources()?;
    Ok(config)
}

pub(crate) fn execute_plan(config: &PlanConfig) -> Result<Itinerary, CliError> {
    let catalog = load_catalog(&config.catalog)?;
    let table = load_decision_table(&config.decision_table)?;
    let distances = DistanceMatrix::from_catalog(&catalog);
    let planner = ItineraryPlanner::new(&catalog, &distances, &table, config.planner.clone())?;

    let itinerary = planner
        .plan(&config.request)
        .map_err(|source| CliError::Plan { source })?;
    info!(
        "planned {} day(s) in {:?} using {} rollout(s)",
        itinerary.days.len(),
        itinerary.diagnostics.plan_time,
        itinerary.diagnostics.total_attempts()
    );
    Ok(itinerary)
}

fn write_itinerary(
    config: &PlanConfig,
    itinerary: &Itinerary,
    writer: &mut dyn Write,
) -> Result<(), CliError> {
    let days: &BTreeMap<u32, DayPlan> = &itinerary.days;
    let mut payload = serde_json::to_vec_pretty(days).map_err(CliError::SerialiseItinerary)?;
    payload.push(b'\n');

    match &config.output {
        Some(path) => {
            daytrip_fs::write_file(path, &payload).map_err(|source| CliError::WriteOutput {
                target: path.to_string(),
                source,
            })?;
            info!("wrote itinerary to {path}");
            Ok(())
        }
        None => writer
            .write_all(&payload)
            .map_err(|source| CliError::WriteOutput {
                target: "stdout".to_owned(),
                source,
            }),
    }
}

#[cfg(test)]
pub(crate) fn config_from_layers_for_test(
    layers: Vec<ortho_config::MergeLayer<'static>>,
) -> Result<PlanConfig, CliError> {
    let merged = PlanArgs::merge_from_layers(layers).map_err(CliError::from)?;
    PlanConfig::try_from(merged)
}
