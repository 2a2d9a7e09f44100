//! Configuration and planning errors.
//!
//! Constraint violations during a rollout are not errors; they are reported
//! in-band as [`RewardOutcome`](crate::RewardOutcome) values. The types here
//! cover problems that stop planning altogether.

use thiserror::Error;

use crate::CatalogError;

/// Inputs that cannot be combined into a planner.
///
/// These are reported before any simulation starts.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// The POI catalog is unusable.
    #[error(transparent)]
    Catalog(#[from] CatalogError),
    /// A decision table row has the wrong length.
    #[error("decision table row {row} has {found} columns, expected {expected}")]
    DecisionTableNotSquare {
        /// Offending row index.
        row: usize,
        /// Number of rows in the table.
        expected: usize,
        /// Length of the offending row.
        found: usize,
    },
    /// A decision table score is `NaN` or infinite.
    #[error("decision table score at ({row}, {column}) is not finite")]
    NonFiniteScore {
        /// Row of the offending score.
        row: usize,
        /// Column of the offending score.
        column: usize,
    },
    /// The decision table and catalog disagree on the number of POIs.
    #[error("decision table covers {table} POIs but the catalog has {catalog}")]
    DecisionTableMismatch {
        /// Decision table dimension.
        table: usize,
        /// Catalog length.
        catalog: usize,
    },
    /// A distance matrix row has the wrong length.
    #[error("distance matrix row {row} has {found} columns, expected {expected}")]
    DistanceMatrixNotSquare {
        /// Offending row index.
        row: usize,
        /// Number of rows in the matrix.
        expected: usize,
        /// Length of the offending row.
        found: usize,
    },
    /// A distance is negative, non-finite, asymmetric, or a non-zero
    /// self-distance.
    #[error("distance matrix cell ({row}, {column}) is invalid")]
    InvalidDistance {
        /// Row of the offending cell.
        row: usize,
        /// Column of the offending cell.
        column: usize,
    },
    /// The distance matrix and catalog disagree on the number of POIs.
    #[error("distance matrix covers {matrix} POIs but the catalog has {catalog}")]
    DistanceMatrixMismatch {
        /// Distance matrix dimension.
        matrix: usize,
        /// Catalog length.
        catalog: usize,
    },
}

/// Reasons a [`PlanRequest`](crate::PlanRequest) or planner configuration is
/// rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlanRequestError {
    /// At least one day must be requested.
    #[error("at least one day must be planned")]
    ZeroDays,
    /// The daily window closes before it opens.
    #[error("day window {start}..{end} is empty")]
    EmptyTimeWindow {
        /// Start of the window in minutes since midnight.
        start: u32,
        /// End of the window in minutes since midnight.
        end: u32,
    },
    /// The attempt cap must allow at least one rollout.
    #[error("max attempts must be at least one")]
    ZeroAttempts,
}

/// Errors returned by [`ItineraryPlanner`](crate::ItineraryPlanner).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlanError {
    /// Request parameters were invalid.
    #[error("invalid plan request: {0}")]
    InvalidRequest(#[from] PlanRequestError),
    /// The pinned start POI is not in the catalog or is an accommodation.
    #[error("start POI {id} is not a valid starting point")]
    UnknownStartPoi {
        /// Requested POI identifier.
        id: u64,
    },
    /// No rollout reached the acceptance threshold within the attempt cap.
    #[error(
        "day {day} did not reach the acceptance threshold in {attempts} attempts (best reward {best_reward})"
    )]
    ItineraryUnattainable {
        /// One-based day number.
        day: u32,
        /// Rollouts attempted.
        attempts: u32,
        /// Highest reward seen across the attempts.
        best_reward: i32,
    },
    /// Planner inputs were inconsistent.
    #[error(transparent)]
    Config(#[from] ConfigError),
}
