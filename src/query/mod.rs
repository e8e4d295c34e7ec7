//! # Query Engine
//!
//! Turns listing query strings into parameters, and parameters into a
//! filtered, sorted page of records.

pub mod engine;
pub mod params;

pub use engine::{apply, total_pages, QueryPage, DEFAULT_PAGE_SIZE};
pub use params::{QueryParameters, SortKey, SortOrder, SortSpec, DEFAULT_PAGE};
