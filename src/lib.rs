//! vehicle-catalog - A read-only vehicle catalog
//!
//! Lists vehicles from a static dataset with manufacturer/type/year filters,
//! price/year sorting and pagination, plus a per-vehicle detail view.

pub mod catalog;
pub mod cli;
pub mod config;
pub mod http_server;
pub mod logging;
pub mod query;
