//! Dataset providers
//!
//! A provider exposes the full, read-only vehicle collection. Records are
//! always returned ordered by manufacturer name (byte-wise, case-sensitive),
//! with records of the same manufacturer kept in dataset order.
//!
//! Two providers exist:
//! - [`StaticDataset`] loads once and serves an immutable snapshot for the
//!   rest of the process lifetime.
//! - [`FileDataset`] re-reads its file on every call, for request-scoped
//!   deployments where the file may be replaced while the server runs.

use std::collections::{BTreeSet, HashSet};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{debug, info, warn};

use super::errors::{CatalogError, CatalogResult};
use super::model::VehicleRecord;

/// Dataset compiled into the binary
pub const BUILTIN_DATASET: &str = include_str!("../../data/vehicles.json");

/// Read-only access to the vehicle collection
pub trait DatasetProvider: Send + Sync {
    /// Every record, ordered by manufacturer ascending.
    fn list_all(&self) -> CatalogResult<Vec<VehicleRecord>>;

    /// Exact identifier match.
    ///
    /// Never fails: a lookup that cannot be served degrades to `None`.
    fn get_by_id(&self, id: &str) -> Option<VehicleRecord>;

    /// Distinct manufacturer names, sorted ascending.
    fn list_manufacturers(&self) -> CatalogResult<Vec<String>>;

    /// Oldest and newest model year, or `None` for an empty dataset.
    fn year_bounds(&self) -> CatalogResult<Option<(i32, i32)>> {
        Ok(year_bounds_of(&self.list_all()?))
    }
}

/// Parse a JSON array of records and put it into canonical order.
pub fn parse_records(json: &str) -> CatalogResult<Vec<VehicleRecord>> {
    let records: Vec<VehicleRecord> = serde_json::from_str(json)
        .map_err(|e| CatalogError::unavailable(format!("Invalid dataset JSON: {}", e)))?;
    prepare(records)
}

/// Validate records and order them by manufacturer.
fn prepare(mut records: Vec<VehicleRecord>) -> CatalogResult<Vec<VehicleRecord>> {
    let mut seen = HashSet::with_capacity(records.len());
    for record in &records {
        record.validate().map_err(CatalogError::DataUnavailable)?;
        if !seen.insert(record.id.as_str()) {
            return Err(CatalogError::unavailable(format!(
                "Duplicate vehicle id: {}",
                record.id
            )));
        }
    }

    // Vec::sort_by is stable
    records.sort_by(|a, b| a.manufacturer.cmp(&b.manufacturer));
    Ok(records)
}

/// Distinct manufacturer names in `records`, sorted ascending
pub fn manufacturers_of(records: &[VehicleRecord]) -> Vec<String> {
    records
        .iter()
        .map(|r| r.manufacturer.clone())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

pub fn year_bounds_of(records: &[VehicleRecord]) -> Option<(i32, i32)> {
    let min = records.iter().map(|r| r.year).min()?;
    let max = records.iter().map(|r| r.year).max()?;
    Some((min, max))
}

fn read_dataset_file(path: &Path) -> CatalogResult<Vec<VehicleRecord>> {
    let content = fs::read_to_string(path).map_err(|e| {
        CatalogError::unavailable(format!("Failed to read {}: {}", path.display(), e))
    })?;
    parse_records(&content)
}

// ==================
// Static snapshot
// ==================

/// Process-lifetime snapshot of the dataset
#[derive(Debug, Clone)]
pub struct StaticDataset {
    records: Arc<[VehicleRecord]>,
}

impl StaticDataset {
    /// The dataset shipped with the binary
    pub fn builtin() -> CatalogResult<Self> {
        Self::from_json_str(BUILTIN_DATASET)
    }

    pub fn from_json_str(json: &str) -> CatalogResult<Self> {
        Ok(Self::from_prepared(parse_records(json)?))
    }

    pub fn from_records(records: Vec<VehicleRecord>) -> CatalogResult<Self> {
        Ok(Self::from_prepared(prepare(records)?))
    }

    /// Load a JSON dataset file once
    pub fn load(path: &Path) -> CatalogResult<Self> {
        let records = read_dataset_file(path)?;
        info!(path = %path.display(), records = records.len(), "dataset loaded");
        Ok(Self::from_prepared(records))
    }

    fn from_prepared(records: Vec<VehicleRecord>) -> Self {
        Self {
            records: records.into(),
        }
    }

    /// Borrow the ordered records without cloning
    pub fn records(&self) -> &[VehicleRecord] {
        &self.records
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl DatasetProvider for StaticDataset {
    fn list_all(&self) -> CatalogResult<Vec<VehicleRecord>> {
        Ok(self.records.to_vec())
    }

    fn get_by_id(&self, id: &str) -> Option<VehicleRecord> {
        self.records.iter().find(|r| r.id == id).cloned()
    }

    fn list_manufacturers(&self) -> CatalogResult<Vec<String>> {
        Ok(manufacturers_of(&self.records))
    }

    fn year_bounds(&self) -> CatalogResult<Option<(i32, i32)>> {
        Ok(year_bounds_of(&self.records))
    }
}

// ==================
// Request-scoped file
// ==================

/// Dataset read from disk on every call
#[derive(Debug, Clone)]
pub struct FileDataset {
    path: PathBuf,
}

impl FileDataset {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn read(&self) -> CatalogResult<Vec<VehicleRecord>> {
        let records = read_dataset_file(&self.path)?;
        debug!(path = %self.path.display(), records = records.len(), "dataset re-read");
        Ok(records)
    }
}

impl DatasetProvider for FileDataset {
    fn list_all(&self) -> CatalogResult<Vec<VehicleRecord>> {
        self.read()
    }

    fn get_by_id(&self, id: &str) -> Option<VehicleRecord> {
        match self.read() {
            Ok(records) => records.into_iter().find(|r| r.id == id),
            Err(e) => {
                warn!(id, error = %e, "lookup degraded to not found");
                None
            }
        }
    }

    fn list_manufacturers(&self) -> CatalogResult<Vec<String>> {
        Ok(manufacturers_of(&self.read()?))
    }
}
