//! # Catalog Module
//!
//! The read-only vehicle dataset: record types, providers and errors.

pub mod dataset;
pub mod errors;
pub mod model;

pub use dataset::{
    manufacturers_of, parse_records, year_bounds_of, DatasetProvider, FileDataset, StaticDataset,
    BUILTIN_DATASET,
};
pub use errors::{CatalogError, CatalogResult};
pub use model::{UnknownVehicleType, VehicleRecord, VehicleType};
