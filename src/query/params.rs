//! # Query Parameter Parser
//!
//! Parses listing query strings into [`QueryParameters`].
//!
//! Recognised keys:
//! - `manufacturer` (repeatable)
//! - `type`
//! - `year`
//! - `sort` (`<field>-<order>`, field is `price` or `year`)
//! - `page`
//!
//! Apart from `manufacturer`, a repeated key keeps its first non-empty value.
//! Invalid values never fail the query. They are ignored, or clamped in the
//! case of `page`.

use std::fmt;

use serde::Serialize;
use url::form_urlencoded;

use crate::catalog::VehicleType;

/// Page shown when none (or an unusable one) is requested
pub const DEFAULT_PAGE: usize = 1;

/// Field a listing can be sorted by
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SortKey {
    Price,
    Year,
}

impl SortKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortKey::Price => "price",
            SortKey::Year => "year",
        }
    }

    /// Resolve a field name, `None` for fields that cannot be sorted on
    pub fn parse(field: &str) -> Option<Self> {
        match field {
            "price" => Some(SortKey::Price),
            "year" => Some(SortKey::Year),
            _ => None,
        }
    }
}

/// Sort direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl SortOrder {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortOrder::Asc => "asc",
            SortOrder::Desc => "desc",
        }
    }

    /// Only `desc` selects descending order
    pub fn parse(order: &str) -> Self {
        if order == "desc" {
            SortOrder::Desc
        } else {
            SortOrder::Asc
        }
    }
}

/// Sort clause
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SortSpec {
    pub key: SortKey,
    pub order: SortOrder,
}

impl SortSpec {
    pub fn asc(key: SortKey) -> Self {
        Self {
            key,
            order: SortOrder::Asc,
        }
    }

    pub fn desc(key: SortKey) -> Self {
        Self {
            key,
            order: SortOrder::Desc,
        }
    }

    /// Parse a `sort` value such as `price-desc`.
    ///
    /// Unknown fields yield `None`, so sorting becomes a no-op.
    pub fn parse(value: &str) -> Option<Self> {
        let (field, order) = match value.split_once('-') {
            Some((field, order)) => (field, order),
            None => (value, ""),
        };

        Some(Self {
            key: SortKey::parse(field)?,
            order: SortOrder::parse(order),
        })
    }
}

impl fmt::Display for SortSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.key.as_str(), self.order.as_str())
    }
}

/// User-controlled filter, sort and page selection
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QueryParameters {
    /// Selected manufacturers, empty for no filter
    pub manufacturers: Vec<String>,
    pub vehicle_type: Option<VehicleType>,
    pub year: Option<i32>,
    pub sort: Option<SortSpec>,
    /// Requested page (1-based, clamped by the engine)
    pub page: usize,
}

impl Default for QueryParameters {
    fn default() -> Self {
        Self {
            manufacturers: Vec::new(),
            vehicle_type: None,
            year: None,
            sort: None,
            page: DEFAULT_PAGE,
        }
    }
}

impl QueryParameters {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a raw query string (without the leading `?`)
    pub fn from_query_string(query: &str) -> Self {
        Self::from_pairs(
            form_urlencoded::parse(query.as_bytes())
                .map(|(k, v)| (k.into_owned(), v.into_owned())),
        )
    }

    /// Parse decoded key/value pairs, preserving repeated keys
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut result = Self::default();
        // Single-valued keys already decided by an earlier occurrence
        let mut seen: Vec<&'static str> = Vec::new();

        for (key, value) in pairs {
            let value = value.as_ref().trim();
            if value.is_empty() {
                continue;
            }

            let key = match key.as_ref() {
                "manufacturer" => {
                    if !result.manufacturers.iter().any(|m| m == value) {
                        result.manufacturers.push(value.to_string());
                    }
                    continue;
                }
                "type" => "type",
                "year" => "year",
                "sort" => "sort",
                "page" => "page",
                _ => continue,
            };
            if seen.contains(&key) {
                continue;
            }
            seen.push(key);

            match key {
                "type" => {
                    result.vehicle_type = value.parse().ok();
                }
                "year" => {
                    result.year = value.parse().ok();
                }
                "sort" => {
                    result.sort = SortSpec::parse(value);
                }
                "page" => {
                    result.page = parse_page(value);
                }
                _ => {}
            }
        }

        result
    }

    /// Render the canonical query string
    pub fn to_query_string(&self) -> String {
        let mut serializer = form_urlencoded::Serializer::new(String::new());

        for manufacturer in &self.manufacturers {
            serializer.append_pair("manufacturer", manufacturer);
        }
        if let Some(vehicle_type) = self.vehicle_type {
            serializer.append_pair("type", vehicle_type.as_str());
        }
        if let Some(year) = self.year {
            serializer.append_pair("year", &year.to_string());
        }
        if let Some(sort) = self.sort {
            serializer.append_pair("sort", &sort.to_string());
        }
        serializer.append_pair("page", &self.page.to_string());

        serializer.finish()
    }

    /// Whether any filter is active
    pub fn has_filters(&self) -> bool {
        !self.manufacturers.is_empty() || self.vehicle_type.is_some() || self.year.is_some()
    }

    // ==================
    // Transitions
    // ==================
    //
    // Every filter or sort change starts over at the first page.

    pub fn with_manufacturers(&self, manufacturers: Vec<String>) -> Self {
        Self {
            manufacturers,
            page: DEFAULT_PAGE,
            ..self.clone()
        }
    }

    /// Add the manufacturer if absent, remove it otherwise
    pub fn toggle_manufacturer(&self, manufacturer: &str) -> Self {
        let mut manufacturers = self.manufacturers.clone();
        if let Some(pos) = manufacturers.iter().position(|m| m == manufacturer) {
            manufacturers.remove(pos);
        } else {
            manufacturers.push(manufacturer.to_string());
        }
        self.with_manufacturers(manufacturers)
    }

    pub fn with_type(&self, vehicle_type: Option<VehicleType>) -> Self {
        Self {
            vehicle_type,
            page: DEFAULT_PAGE,
            ..self.clone()
        }
    }

    pub fn with_year(&self, year: Option<i32>) -> Self {
        Self {
            year,
            page: DEFAULT_PAGE,
            ..self.clone()
        }
    }

    pub fn with_sort(&self, sort: Option<SortSpec>) -> Self {
        Self {
            sort,
            page: DEFAULT_PAGE,
            ..self.clone()
        }
    }

    /// Move to another page, keeping filters and sort
    pub fn with_page(&self, page: usize) -> Self {
        Self {
            page: page.max(1),
            ..self.clone()
        }
    }
}

/// Non-numeric values fall back to the first page, values below 1 clamp to 1
fn parse_page(value: &str) -> usize {
    match value.parse::<i64>() {
        Ok(n) if n >= 1 => usize::try_from(n).unwrap_or(usize::MAX),
        _ => DEFAULT_PAGE,
    }
}
