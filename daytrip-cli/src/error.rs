//! Error types emitted by the daytrip CLI.
//!
//! Keep this error type reasonably small, as many CLI helpers return
//! `Result<_, CliError>` and the workspace enables `clippy::result_large_err`.

use std::sync::Arc;

use camino::Utf8PathBuf;
use daytrip_core::{CatalogError, ConfigError, PlanError};
use thiserror::Error;

/// Errors emitted by the daytrip CLI.
#[derive(Debug, Error)]
pub enum CliError {
    /// Provided arguments failed Clap validation.
    #[error(transparent)]
    ArgumentParsing(#[from] clap::Error),
    /// Configuration layering failed (files, env, CLI).
    #[error("failed to load configuration: {0}")]
    Configuration(#[from] Arc<ortho_config::OrthoError>),
    /// A required option is missing after configuration merging.
    #[error("missing {field} (set --{field} or {env})")]
    MissingArgument {
        /// Flag name without dashes.
        field: &'static str,
        /// Environment variable that can supply the value.
        env: &'static str,
    },
    /// The tag list contains something other than integers.
    #[error("invalid tag {value:?} in --tags; expected comma-separated integers")]
    InvalidTag {
        /// Offending list entry.
        value: String,
    },
    /// A referenced input path does not exist.
    #[error("{field} path {path:?} does not exist")]
    MissingSourceFile {
        /// Flag name of the input.
        field: &'static str,
        /// Path that was checked.
        path: Utf8PathBuf,
    },
    /// A referenced input path exists but is not a file.
    #[error("{field} path {path:?} exists but is not a file")]
    SourcePathNotFile {
        /// Flag name of the input.
        field: &'static str,
        /// Path that was checked.
        path: Utf8PathBuf,
    },
    /// A referenced input path could not be inspected.
    #[error("failed to inspect {field} path {path:?}: {source}")]
    InspectSourcePath {
        /// Flag name of the input.
        field: &'static str,
        /// Path that was checked.
        path: Utf8PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
    /// An input file could not be read.
    #[error("failed to read {path:?}: {source}")]
    ReadInput {
        /// Input path.
        path: Utf8PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
    /// An input file is not valid JSON of the expected shape.
    #[error("failed to parse JSON at {path:?}: {source}")]
    ParseInput {
        /// Input path.
        path: Utf8PathBuf,
        /// Underlying decoding error.
        #[source]
        source: serde_json::Error,
    },
    /// The catalog records do not form a usable catalog.
    #[error("catalog {path:?} is invalid: {source}")]
    InvalidCatalog {
        /// Catalog path.
        path: Utf8PathBuf,
        /// Validation failure.
        #[source]
        source: CatalogError,
    },
    /// The decision table is malformed.
    #[error("decision table {path:?} is invalid: {source}")]
    InvalidDecisionTable {
        /// Decision table path.
        path: Utf8PathBuf,
        /// Validation failure.
        #[source]
        source: ConfigError,
    },
    /// The catalog and decision table disagree.
    #[error(transparent)]
    Config(#[from] ConfigError),
    /// Planning failed.
    #[error("planning failed: {source}")]
    Plan {
        /// Planner failure.
        #[source]
        source: PlanError,
    },
    /// Serialising the itinerary failed.
    #[error("failed to serialise itinerary: {0}")]
    SerialiseItinerary(#[source] serde_json::Error),
    /// Writing the itinerary failed.
    #[error("failed to write itinerary to {target}: {source}")]
    WriteOutput {
        /// Output path, or `stdout`.
        target: String,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
}
