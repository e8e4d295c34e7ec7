//! CLI command implementations
//!
//! `query`, `show` and `manufacturers` evaluate against the configured
//! dataset and print JSON to stdout. `serve` boots the HTTP server.

use std::path::Path;

use tracing::info;

use crate::catalog::VehicleRecord;
use crate::config::CatalogConfig;
use crate::http_server::HttpServer;
use crate::logging;
use crate::query::{self, QueryPage, QueryParameters};

use super::args::{Cli, Command};
use super::errors::{CliError, CliResult};
use super::io::write_json;

/// Main CLI entry point
///
/// Parses arguments, installs logging and dispatches to the command.
/// This is the only function that main.rs should call.
pub fn run() -> CliResult<()> {
    let cli = Cli::parse_args();
    let config = load_config(cli.command.config_path())?;
    logging::init_logger(&config.log_filter, cli.json_logs);
    run_command(cli.command, config)
}

/// Load the configuration, using defaults when the file does not exist
pub fn load_config(path: &Path) -> CliResult<CatalogConfig> {
    Ok(CatalogConfig::load_or_default(path)?)
}

/// Run the appropriate command based on CLI args
pub fn run_command(cmd: Command, config: CatalogConfig) -> CliResult<()> {
    match cmd {
        Command::Serve { port, .. } => serve(config, port),
        Command::Query { query, .. } => write_json(&query_page(&config, &query)?),
        Command::Show { id, .. } => write_json(&show(&config, &id)?),
        Command::Manufacturers { .. } => write_json(&manufacturers(&config)?),
    }
}

/// Evaluate one listing query
pub fn query_page(config: &CatalogConfig, raw_query: &str) -> CliResult<QueryPage<VehicleRecord>> {
    let dataset = config.open_dataset()?;
    let params = QueryParameters::from_query_string(raw_query.trim_start_matches('?'));
    let records = dataset.list_all()?;
    Ok(query::apply(&records, &params, config.page_size))
}

/// Look up one vehicle by identifier
pub fn show(config: &CatalogConfig, id: &str) -> CliResult<VehicleRecord> {
    let dataset = config.open_dataset()?;
    dataset.get_by_id(id).ok_or_else(|| CliError::not_found(id))
}

/// Distinct manufacturer names
pub fn manufacturers(config: &CatalogConfig) -> CliResult<Vec<String>> {
    Ok(config.open_dataset()?.list_manufacturers()?)
}

/// Start the HTTP server and block until it stops
pub fn serve(config: CatalogConfig, port: Option<u16>) -> CliResult<()> {
    let mut http_config = config.http_config();
    if let Some(port) = port {
        http_config.port = port;
    }

    let dataset = config.open_dataset()?;
    let source = config
        .dataset_path
        .as_deref()
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| "builtin".to_string());
    info!(
        dataset = %source,
        request_scoped = config.request_scoped_dataset,
        "dataset ready"
    );

    let server = HttpServer::with_dataset(http_config, dataset);

    let rt = tokio::runtime::Runtime::new()
        .map_err(|e| CliError::serve_failed(format!("Failed to create tokio runtime: {}", e)))?;

    rt.block_on(async {
        server
            .start()
            .await
            .map_err(|e| CliError::serve_failed(format!("HTTP server failed: {}", e)))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::errors::CliErrorCode;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn config_with_dataset(json: &str) -> (NamedTempFile, CatalogConfig) {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(json.as_bytes()).unwrap();

        let config = CatalogConfig {
            dataset_path: Some(file.path().to_path_buf()),
            page_size: 2,
            ..CatalogConfig::default()
        };
        (file, config)
    }

    const SMALL_DATASET: &str = r#"[
        {"id": "t1", "manufacturer": "Toyota", "model": "Yaris", "year": 2020, "type": "hatchback",
         "price": 15000, "fuelType": "petrol", "transmission": "Manual"},
        {"id": "h1", "manufacturer": "Honda", "model": "Civic", "year": 2018, "type": "sedan",
         "price": 18000, "fuelType": "petrol", "transmission": "CVT"},
        {"id": "t2", "manufacturer": "Toyota", "model": "Prius", "year": 2020, "type": "sedan",
         "price": 21000, "fuelType": "hybrid", "transmission": "Automatic"}
    ]"#;

    #[test]
    fn test_query_page_uses_config_page_size() {
        let (_file, config) = config_with_dataset(SMALL_DATASET);

        let page = query_page(&config, "?page=2").unwrap();
        assert_eq!(page.total_pages, 2);
        assert_eq!(page.current_page, 2);
        assert_eq!(page.items.len(), 1);
    }

    #[test]
    fn test_query_page_filters() {
        let (_file, config) = config_with_dataset(SMALL_DATASET);

        let page = query_page(&config, "manufacturer=Toyota&sort=price-desc").unwrap();
        let ids: Vec<_> = page.items.iter().map(|v| v.id.as_str()).collect();
        assert_eq!(ids, vec!["t2", "t1"]);
    }

    #[test]
    fn test_show() {
        let (_file, config) = config_with_dataset(SMALL_DATASET);

        assert_eq!(show(&config, "h1").unwrap().model, "Civic");

        let err = show(&config, "zz").unwrap_err();
        assert_eq!(err.code(), &CliErrorCode::NotFound);
    }

    #[test]
    fn test_manufacturers() {
        let (_file, config) = config_with_dataset(SMALL_DATASET);
        assert_eq!(manufacturers(&config).unwrap(), vec!["Honda", "Toyota"]);
    }

    #[test]
    fn test_missing_dataset_is_unavailable() {
        let config = CatalogConfig {
            dataset_path: Some("/nonexistent/vehicles.json".into()),
            ..CatalogConfig::default()
        };

        let err = manufacturers(&config).unwrap_err();
        assert_eq!(err.code(), &CliErrorCode::DataUnavailable);
    }
}
