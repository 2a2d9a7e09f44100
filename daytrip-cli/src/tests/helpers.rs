//! Test helpers for writing catalog and decision table inputs.

use std::collections::BTreeSet;

use camino::Utf8PathBuf;
use tempfile::TempDir;

use crate::catalog::PoiRecord;
use crate::plan::PlanArgs;

pub(super) fn write_utf8(path: &Utf8PathBuf, contents: &[u8]) {
    std::fs::write(path.as_std_path(), contents).expect("write test input");
}

fn record(id: u64, category: u8, duration: u32, latitude: f64, tags: &[u32]) -> PoiRecord {
    PoiRecord {
        id,
        name: format!("poi-{id}"),
        category,
        duration,
        latitude,
        longitude: 126.53,
        tags: tags.iter().copied().collect::<BTreeSet<_>>(),
    }
}

/// A sight, a restaurant tagged `5` and an accommodation, a few hundred
/// metres apart along one meridian.
pub(super) fn scenario_records() -> Vec<PoiRecord> {
    vec![
        record(1, 0, 1, 33.500, &[]),
        record(2, 1, 1, 33.505, &[5]),
        record(3, 3, 0, 33.510, &[]),
    ]
}

/// Table preferring the restaurant from the sight and the accommodation
/// from the restaurant.
pub(super) fn scenario_table() -> Vec<Vec<f64>> {
    vec![
        vec![0.0, 1.0, 0.0],
        vec![0.0, 0.0, 1.0],
        vec![0.0, 0.0, 0.0],
    ]
}

/// Temporary directory holding a catalog and decision table.
pub(super) struct Inputs {
    pub(super) dir: TempDir,
    pub(super) catalog: Utf8PathBuf,
    pub(super) decision_table: Utf8PathBuf,
}

impl Inputs {
    pub(super) fn new() -> Self {
        Self::with(&scenario_records(), &scenario_table())
    }

    pub(super) fn with(records: &[PoiRecord], table: &[Vec<f64>]) -> Self {
        let dir = TempDir::new().expect("tempdir");
        let root = Utf8PathBuf::from_path_buf(dir.path().to_path_buf()).expect("utf-8 workspace");
        let catalog = root.join("catalog.json");
        let decision_table = root.join("decision_table.json");
        write_utf8(
            &catalog,
            &serde_json::to_vec(records).expect("serialise catalog"),
        );
        write_utf8(
            &decision_table,
            &serde_json::to_vec(table).expect("serialise table"),
        );
        Self {
            dir,
            catalog,
            decision_table,
        }
    }

    pub(super) fn path(&self, name: &str) -> Utf8PathBuf {
        Utf8PathBuf::from_path_buf(self.dir.path().join(name)).expect("utf-8 path")
    }

    /// Arguments planning one day from the sight for tag `5`.
    pub(super) fn args(&self) -> PlanArgs {
        PlanArgs {
            catalog: Some(self.catalog.clone()),
            decision_table: Some(self.decision_table.clone()),
            tags: Some("5".to_owned()),
            threshold: Some(50),
            start_poi: Some(1),
            ..PlanArgs::default()
        }
    }
}
