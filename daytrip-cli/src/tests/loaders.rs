//! Unit tests for the catalog and decision table loaders.

use super::helpers::{Inputs, scenario_records, scenario_table, write_utf8};
use super::*;
use crate::catalog::{load_catalog, load_decision_table};
use daytrip_core::{CatalogError, Category, ConfigError};
use rstest::rstest;

#[rstest]
fn load_catalog_decodes_records() {
    let inputs = Inputs::new();
    let catalog = load_catalog(&inputs.catalog).expect("catalog should load");

    assert_eq!(catalog.len(), 3);
    let restaurant = catalog.get(1).expect("restaurant");
    assert_eq!(restaurant.name, "poi-2");
    assert_eq!(restaurant.category, Category::Restaurant);
    assert_eq!(restaurant.duration_hours, 1);
    assert!(restaurant.tags.contains(&5));
    assert_eq!(catalog.accommodations(), &[2]);
}

#[rstest]
fn load_catalog_defaults_optional_fields() {
    let inputs = Inputs::new();
    let path = inputs.path("minimal.json");
    write_utf8(
        &path,
        br#"[
            {"id": 7, "category": 0, "latitude": 33.5, "longitude": 126.5},
            {"id": 8, "category": 3, "latitude": 33.6, "longitude": 126.5}
        ]"#,
    );

    let catalog = load_catalog(&path).expect("catalog should load");
    let first = catalog.get(0).expect("first poi");
    assert!(first.name.is_empty());
    assert_eq!(first.duration_hours, 0);
    assert!(first.tags.is_empty());
}

#[rstest]
fn load_catalog_rejects_invalid_json() {
    let inputs = Inputs::new();
    let path = inputs.path("broken.json");
    write_utf8(&path, b"[{ not json");

    match load_catalog(&path).expect_err("invalid json should error") {
        CliError::ParseInput { path: reported, .. } => assert_eq!(reported, path),
        other => panic!("expected ParseInput, found {other:?}"),
    }
}

#[rstest]
fn load_catalog_requires_an_accommodation() {
    let records: Vec<_> = scenario_records()
        .into_iter()
        .filter(|record| record.category != 3)
        .collect();
    let inputs = Inputs::with(&records, &scenario_table());

    match load_catalog(&inputs.catalog).expect_err("catalog without accommodation") {
        CliError::InvalidCatalog { source, .. } => {
            assert_eq!(source, CatalogError::NoAccommodationAvailable);
        }
        other => panic!("expected InvalidCatalog, found {other:?}"),
    }
}

#[rstest]
fn load_catalog_reports_missing_file() {
    let inputs = Inputs::new();
    let path = inputs.path("absent.json");

    match load_catalog(&path).expect_err("missing file should error") {
        CliError::ReadInput { path: reported, .. } => assert_eq!(reported, path),
        other => panic!("expected ReadInput, found {other:?}"),
    }
}

#[rstest]
fn load_decision_table_rejects_ragged_rows() {
    let inputs = Inputs::with(&scenario_records(), &[vec![0.0, 1.0], vec![1.0]]);

    match load_decision_table(&inputs.decision_table).expect_err("ragged table") {
        CliError::InvalidDecisionTable { source, .. } => assert_eq!(
            source,
            ConfigError::DecisionTableNotSquare {
                row: 1,
                expected: 2,
                found: 1
            }
        ),
        other => panic!("expected InvalidDecisionTable, found {other:?}"),
    }
}
