//! Dataset File Tests
//!
//! Loading datasets from disk:
//! - Static snapshots are read once and ignore later file changes
//! - Request-scoped datasets pick up replacements and degrade on failure
//! - Malformed files surface as DataUnavailable

use std::fs;
use std::path::Path;

use serde_json::json;
use tempfile::TempDir;

use vehicle_catalog::catalog::{CatalogError, DatasetProvider, FileDataset, StaticDataset};
use vehicle_catalog::config::CatalogConfig;

// =============================================================================
// Helper Functions
// =============================================================================

fn write_dataset(path: &Path, manufacturers: &[(&str, &str)]) {
    let records: Vec<_> = manufacturers
        .iter()
        .map(|(id, manufacturer)| {
            json!({
                "id": id,
                "manufacturer": manufacturer,
                "model": "Test",
                "year": 2021,
                "type": "suv",
                "price": 20000,
                "fuelType": "petrol",
                "transmission": "Automatic",
                "mileage": 1000,
                "features": [],
                "description": ""
            })
        })
        .collect();
    fs::write(path, serde_json::to_string(&records).unwrap()).unwrap();
}

// =============================================================================
// Static Snapshot
// =============================================================================

#[test]
fn test_static_snapshot_ignores_later_changes() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("vehicles.json");
    write_dataset(&path, &[("1", "Kia")]);

    let dataset = StaticDataset::load(&path).unwrap();
    write_dataset(&path, &[("1", "Kia"), ("2", "Fiat")]);

    assert_eq!(dataset.list_all().unwrap().len(), 1);
    assert!(dataset.get_by_id("2").is_none());
}

#[test]
fn test_static_load_of_missing_file_fails() {
    let tmp = TempDir::new().unwrap();
    let result = StaticDataset::load(&tmp.path().join("missing.json"));
    assert!(matches!(result, Err(CatalogError::DataUnavailable(_))));
}

#[test]
fn test_negative_price_rejected() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("vehicles.json");
    fs::write(
        &path,
        r#"[{"id": "1", "manufacturer": "Kia", "model": "Rio", "year": 2020, "type": "sedan",
             "price": -10, "fuelType": "petrol", "transmission": "Manual"}]"#,
    )
    .unwrap();

    assert!(matches!(
        StaticDataset::load(&path),
        Err(CatalogError::DataUnavailable(_))
    ));
}

// =============================================================================
// Request-Scoped File
// =============================================================================

#[test]
fn test_file_dataset_rereads() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("vehicles.json");
    write_dataset(&path, &[("1", "Kia")]);

    let dataset = FileDataset::new(&path);
    assert_eq!(dataset.list_manufacturers().unwrap(), vec!["Kia"]);

    write_dataset(&path, &[("1", "Kia"), ("2", "Fiat")]);
    assert_eq!(dataset.list_manufacturers().unwrap(), vec!["Fiat", "Kia"]);
    assert_eq!(dataset.get_by_id("2").unwrap().manufacturer, "Fiat");
}

#[test]
fn test_file_dataset_degrades_when_corrupted() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("vehicles.json");
    write_dataset(&path, &[("1", "Kia")]);

    let dataset = FileDataset::new(&path);
    assert!(dataset.get_by_id("1").is_some());

    fs::write(&path, "[{").unwrap();
    assert!(matches!(
        dataset.list_all(),
        Err(CatalogError::DataUnavailable(_))
    ));
    assert!(dataset.get_by_id("1").is_none());
}

// =============================================================================
// Configuration
// =============================================================================

#[test]
fn test_config_selects_provider() {
    let tmp = TempDir::new().unwrap();
    let data_path = tmp.path().join("vehicles.json");
    write_dataset(&data_path, &[("1", "Kia")]);

    let config_path = tmp.path().join("catalog.json");
    fs::write(
        &config_path,
        serde_json::to_string(&json!({
            "dataset_path": data_path,
            "request_scoped_dataset": true,
            "page_size": 5
        }))
        .unwrap(),
    )
    .unwrap();

    let config = CatalogConfig::load(&config_path).unwrap();
    let dataset = config.open_dataset().unwrap();
    assert_eq!(dataset.list_all().unwrap().len(), 1);

    write_dataset(&data_path, &[("1", "Kia"), ("2", "Seat")]);
    assert_eq!(dataset.list_all().unwrap().len(), 2);
}
