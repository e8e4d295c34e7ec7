//! # HTTP Server
//!
//! Main HTTP server combining the page, API and health routers.

use std::io;
use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use tokio::net::TcpListener;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::catalog::{CatalogResult, DatasetProvider, StaticDataset};

use super::config::HttpServerConfig;
use super::routes::{api_routes, health_routes, page_routes, CatalogState};

/// HTTP Server for the vehicle catalog
pub struct HttpServer {
    config: HttpServerConfig,
    router: Router,
}

impl HttpServer {
    /// Create a server over the built-in dataset with default configuration
    pub fn new() -> CatalogResult<Self> {
        let dataset = StaticDataset::builtin()?;
        Ok(Self::with_dataset(HttpServerConfig::default(), Arc::new(dataset)))
    }

    /// Create a server over the given dataset
    pub fn with_dataset(config: HttpServerConfig, dataset: Arc<dyn DatasetProvider>) -> Self {
        let router = Self::build_router(&config, dataset);
        Self { config, router }
    }

    /// Build the combined router with all endpoints
    fn build_router(config: &HttpServerConfig, dataset: Arc<dyn DatasetProvider>) -> Router {
        let state = Arc::new(CatalogState::new(dataset, config.page_size));

        let cors = if config.cors_origins.is_empty() {
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any)
        } else {
            let origins: Vec<_> = config
                .cors_origins
                .iter()
                .filter_map(|s| s.parse().ok())
                .collect();

            CorsLayer::new()
                .allow_origin(AllowOrigin::list(origins))
                .allow_methods(Any)
                .allow_headers(Any)
        };

        Router::new()
            .merge(health_routes())
            .merge(page_routes(state.clone()))
            .nest("/api", api_routes(state))
            .layer(TraceLayer::new_for_http())
            .layer(cors)
    }

    /// Get the socket address
    pub fn socket_addr(&self) -> String {
        self.config.socket_addr()
    }

    /// Get the router (for testing)
    pub fn router(self) -> Router {
        self.router
    }

    /// Start the HTTP server
    pub async fn start(self) -> Result<(), io::Error> {
        let addr: SocketAddr = self
            .config
            .socket_addr()
            .parse()
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))?;

        let listener = TcpListener::bind(addr).await?;
        info!(%addr, page_size = self.config.page_size, "vehicle catalog listening");

        axum::serve(listener, self.router).await?;

        Ok(())
    }
}
