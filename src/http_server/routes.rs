//! Catalog HTTP Routes
//!
//! HTML pages for browsing and JSON endpoints exposing the same data.

use std::sync::Arc;

use axum::{
    extract::{Path, RawQuery, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::Serialize;
use tracing::{debug, error};

use crate::catalog::{self, DatasetProvider, VehicleRecord};
use crate::query::{self, QueryPage, QueryParameters};

use super::errors::{HttpError, HttpResult};
use super::views::{self, ListingView};

// ==================
// Shared State
// ==================

/// Catalog state shared across handlers
pub struct CatalogState {
    pub dataset: Arc<dyn DatasetProvider>,
    pub page_size: usize,
}

impl CatalogState {
    pub fn new(dataset: Arc<dyn DatasetProvider>, page_size: usize) -> Self {
        Self { dataset, page_size }
    }

    /// Evaluate a raw query string against the current dataset
    pub fn query(&self, raw_query: Option<&str>) -> HttpResult<QueryPage<VehicleRecord>> {
        let params = QueryParameters::from_query_string(raw_query.unwrap_or_default());
        let records = self.dataset.list_all()?;
        Ok(query::apply(&records, &params, self.page_size))
    }
}

type SharedState = Arc<CatalogState>;

// ==================
// Response Types
// ==================

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

#[derive(Debug, Serialize)]
pub struct ManufacturersResponse {
    pub manufacturers: Vec<String>,
    pub count: usize,
}

// ==================
// Routers
// ==================

/// HTML pages
pub fn page_routes(state: SharedState) -> Router {
    Router::new()
        .route("/", get(listing_handler))
        .route("/vehicles/:id", get(detail_handler))
        .with_state(state)
}

/// JSON endpoints
pub fn api_routes(state: SharedState) -> Router {
    Router::new()
        .route("/vehicles", get(api_list_handler))
        .route("/vehicles/:id", get(api_get_handler))
        .route("/manufacturers", get(api_manufacturers_handler))
        .with_state(state)
}

/// Health check route
pub fn health_routes() -> Router {
    Router::new().route("/health", get(health_handler))
}

// ==================
// Handlers
// ==================

async fn health_handler() -> impl IntoResponse {
    let response = HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    };

    (StatusCode::OK, Json(response))
}

/// Listing page; a dataset failure renders the "try again later" page
async fn listing_handler(
    State(state): State<SharedState>,
    RawQuery(raw_query): RawQuery,
) -> Response {
    let params = QueryParameters::from_query_string(raw_query.as_deref().unwrap_or_default());

    // One load per request; the form options derive from the same records
    let records = match state.dataset.list_all() {
        Ok(records) => records,
        Err(e) => {
            error!(error = %e, "failed to load catalog for listing");
            return (
                StatusCode::SERVICE_UNAVAILABLE,
                Html(views::unavailable_page()),
            )
                .into_response();
        }
    };

    let manufacturers = catalog::manufacturers_of(&records);
    let year_bounds = catalog::year_bounds_of(&records);

    let page = query::apply(&records, &params, state.page_size);
    debug!(
        query = raw_query.as_deref().unwrap_or(""),
        page = page.current_page,
        "listing rendered"
    );

    Html(views::listing_page(&ListingView {
        page: &page,
        params: &params,
        manufacturers: &manufacturers,
        year_bounds,
    }))
    .into_response()
}

async fn detail_handler(State(state): State<SharedState>, Path(id): Path<String>) -> Response {
    match state.dataset.get_by_id(&id) {
        Some(vehicle) => Html(views::detail_page(&vehicle)).into_response(),
        None => {
            debug!(%id, "vehicle not found");
            (StatusCode::NOT_FOUND, Html(views::not_found_page())).into_response()
        }
    }
}

async fn api_list_handler(
    State(state): State<SharedState>,
    RawQuery(raw_query): RawQuery,
) -> HttpResult<Json<QueryPage<VehicleRecord>>> {
    Ok(Json(state.query(raw_query.as_deref())?))
}

async fn api_get_handler(
    State(state): State<SharedState>,
    Path(id): Path<String>,
) -> HttpResult<Json<VehicleRecord>> {
    state
        .dataset
        .get_by_id(&id)
        .map(Json)
        .ok_or(HttpError::NotFound(id))
}

async fn api_manufacturers_handler(
    State(state): State<SharedState>,
) -> HttpResult<Json<ManufacturersResponse>> {
    let manufacturers = state.dataset.list_manufacturers()?;
    let count = manufacturers.len();
    Ok(Json(ManufacturersResponse {
        manufacturers,
        count,
    }))
}
