//! JSON loaders for the POI catalog and decision table.

use std::collections::BTreeSet;

use camino::Utf8Path;
use daytrip_core::{Catalog, Category, DecisionTable, PointOfInterest};
use geo::Coord;
use serde::{Deserialize, Serialize};
use serde::de::DeserializeOwned;

use crate::CliError;

/// One catalog entry as stored on disk.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub(crate) struct PoiRecord {
    pub(crate) id: u64,
    #[serde(default)]
    pub(crate) name: String,
    pub(crate) category: u8,
    /// Stay length in whole hours.
    #[serde(default)]
    pub(crate) duration: u32,
    pub(crate) latitude: f64,
    pub(crate) longitude: f64,
    #[serde(default)]
    pub(crate) tags: BTreeSet<u32>,
}

impl From<PoiRecord> for PointOfInterest {
    fn from(record: PoiRecord) -> Self {
        let location = Coord {
            x: record.longitude,
            y: record.latitude,
        };
        Self::new(
            record.id,
            record.name,
            Category::from_code(record.category),
            location,
        )
        .with_duration_hours(record.duration)
        .with_tags(record.tags)
    }
}

/// Load and validate a catalog from a JSON array of [`PoiRecord`]s.
pub(crate) fn load_catalog(path: &Utf8Path) -> Result<Catalog, CliError> {
    let records: Vec<PoiRecord> = read_json(path)?;
    let pois = records.into_iter().map(PointOfInterest::from).collect();
    Catalog::new(pois).map_err(|source| CliError::InvalidCatalog {
        path: path.to_path_buf(),
        source,
    })
}

/// Load and validate a decision table from a JSON array of rows.
pub(crate) fn load_decision_table(path: &Utf8Path) -> Result<DecisionTable, CliError> {
    let rows: Vec<Vec<f64>> = read_json(path)?;
    DecisionTable::new(rows).map_err(|source| CliError::InvalidDecisionTable {
        path: path.to_path_buf(),
        source,
    })
}

fn read_json<T: DeserializeOwned>(path: &Utf8Path) -> Result<T, CliError> {
    let text = daytrip_fs::read_to_string(path).map_err(|source| CliError::ReadInput {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&text).map_err(|source| CliError::ParseInput {
        path: path.to_path_buf(),
        source,
    })
}
