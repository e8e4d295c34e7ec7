//! # Vehicle Catalog HTTP Server
//!
//! Thin presentation layer over the catalog and query engine.
//!
//! # Endpoints
//!
//! - `/health` - Health check
//! - `/` - HTML listing (filters, sort, pagination via query string)
//! - `/vehicles/:id` - HTML detail page
//! - `/api/*` - JSON listing, record lookup and manufacturer list

pub mod config;
pub mod errors;
pub mod routes;
pub mod server;
pub mod views;

pub use config::HttpServerConfig;
pub use errors::{HttpError, HttpResult};
pub use routes::CatalogState;
pub use server::HttpServer;
