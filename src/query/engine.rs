//! Query evaluation
//!
//! Filters, sorts and paginates a borrowed record slice. The input is never
//! mutated: every evaluation builds a new view.

use std::cmp::Ordering;

use serde::Serialize;
use tracing::debug;

use super::params::{QueryParameters, SortKey, SortOrder, SortSpec};
use crate::catalog::VehicleRecord;

/// Records per page in the listing
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// One page of a filtered, sorted view
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QueryPage<T> {
    pub items: Vec<T>,
    pub current_page: usize,
    /// At least 1, even for an empty result
    pub total_pages: usize,
    /// Matching records before pagination
    pub total_count: usize,
    pub page_size: usize,
}

impl<T> QueryPage<T> {
    /// Whether nothing matched the filters
    pub fn is_empty(&self) -> bool {
        self.total_count == 0
    }

    pub fn has_previous(&self) -> bool {
        self.current_page > 1
    }

    pub fn has_next(&self) -> bool {
        self.current_page < self.total_pages
    }
}

/// Check a record against every active filter.
///
/// Filters are AND-combined; the manufacturer set matches any of its members.
pub fn matches(record: &VehicleRecord, params: &QueryParameters) -> bool {
    if !params.manufacturers.is_empty()
        && !params.manufacturers.iter().any(|m| *m == record.manufacturer)
    {
        return false;
    }

    if let Some(vehicle_type) = params.vehicle_type {
        if record.vehicle_type != vehicle_type {
            return false;
        }
    }

    if let Some(year) = params.year {
        if record.year != year {
            return false;
        }
    }

    true
}

/// Sorts records by a numeric key.
///
/// The sort is stable: equal keys keep their relative order.
pub fn sort_records(records: &mut [&VehicleRecord], spec: &SortSpec) {
    records.sort_by(|a, b| {
        let ordering = compare_by_key(a, b, spec.key);
        match spec.order {
            SortOrder::Asc => ordering,
            SortOrder::Desc => ordering.reverse(),
        }
    });
}

fn compare_by_key(a: &VehicleRecord, b: &VehicleRecord, key: SortKey) -> Ordering {
    match key {
        SortKey::Price => a.price.total_cmp(&b.price),
        SortKey::Year => a.year.cmp(&b.year),
    }
}

/// Number of pages for `count` items, never less than 1
pub fn total_pages(count: usize, page_size: usize) -> usize {
    count.div_ceil(page_size.max(1)).max(1)
}

/// Evaluate a query against a record collection.
///
/// A `page_size` of 0 is treated as 1. The requested page is clamped into
/// `[1, total_pages]`.
pub fn apply(
    records: &[VehicleRecord],
    params: &QueryParameters,
    page_size: usize,
) -> QueryPage<VehicleRecord> {
    let page_size = page_size.max(1);

    let mut view: Vec<&VehicleRecord> = records.iter().filter(|r| matches(r, params)).collect();

    if let Some(spec) = &params.sort {
        sort_records(&mut view, spec);
    }

    let total_count = view.len();
    let total_pages = total_pages(total_count, page_size);
    let current_page = params.page.clamp(1, total_pages);

    let start = (current_page - 1) * page_size;
    let items: Vec<VehicleRecord> = view
        .into_iter()
        .skip(start)
        .take(page_size)
        .cloned()
        .collect();

    debug!(
        matched = total_count,
        page = current_page,
        total_pages,
        returned = items.len(),
        "query evaluated"
    );

    QueryPage {
        items,
        current_page,
        total_pages,
        total_count,
        page_size,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::VehicleType;

    fn make_record(id: &str, manufacturer: &str, year: i32, price: f64) -> VehicleRecord {
        VehicleRecord {
            id: id.to_string(),
            manufacturer: manufacturer.to_string(),
            model: format!("Model {}", id),
            year,
            vehicle_type: VehicleType::Sedan,
            price,
            fuel_type: "petrol".to_string(),
            transmission: "Automatic".to_string(),
            mileage: Some(1000.0),
            features: Vec::new(),
            description: String::new(),
        }
    }

    fn ids(page: &QueryPage<VehicleRecord>) -> Vec<&str> {
        page.items.iter().map(|r| r.id.as_str()).collect()
    }

    #[test]
    fn test_total_pages() {
        assert_eq!(total_pages(0, 10), 1);
        assert_eq!(total_pages(10, 10), 1);
        assert_eq!(total_pages(11, 10), 2);
        assert_eq!(total_pages(5, 0), 5);
    }

    #[test]
    fn test_matches_and_combines_filters() {
        let record = make_record("1", "Kia", 2020, 100.0);

        let params = QueryParameters::new()
            .with_manufacturers(vec!["Kia".to_string()])
            .with_year(Some(2020));
        assert!(matches(&record, &params));

        let params = params.with_type(Some(VehicleType::Truck));
        assert!(!matches(&record, &params));
    }

    #[test]
    fn test_year_filter_is_exact() {
        let records = vec![
            make_record("1", "Kia", 2019, 1.0),
            make_record("2", "Kia", 2020, 1.0),
            make_record("3", "Kia", 2021, 1.0),
        ];

        let page = apply(&records, &QueryParameters::new().with_year(Some(2020)), 10);
        assert_eq!(ids(&page), vec!["2"]);
    }

    #[test]
    fn test_sort_by_price_ascending() {
        let records = vec![
            make_record("a", "Kia", 2020, 300.0),
            make_record("b", "Kia", 2020, 100.0),
            make_record("c", "Kia", 2020, 200.0),
        ];
        let params = QueryParameters::new().with_sort(Some(SortSpec::asc(SortKey::Price)));

        let page = apply(&records, &params, 10);
        assert_eq!(ids(&page), vec!["b", "c", "a"]);
    }

    #[test]
    fn test_sort_is_stable_in_both_directions() {
        let records = vec![
            make_record("a", "Kia", 2020, 200.0),
            make_record("b", "Kia", 2020, 100.0),
            make_record("c", "Kia", 2020, 200.0),
        ];

        let asc = apply(
            &records,
            &QueryParameters::new().with_sort(Some(SortSpec::asc(SortKey::Price))),
            10,
        );
        assert_eq!(ids(&asc), vec!["b", "a", "c"]);

        let desc = apply(
            &records,
            &QueryParameters::new().with_sort(Some(SortSpec::desc(SortKey::Price))),
            10,
        );
        assert_eq!(ids(&desc), vec!["a", "c", "b"]);
    }

    #[test]
    fn test_input_is_not_mutated() {
        let records = vec![
            make_record("a", "Kia", 2022, 3.0),
            make_record("b", "Kia", 2020, 1.0),
        ];
        let before = records.clone();

        let params = QueryParameters::new().with_sort(Some(SortSpec::asc(SortKey::Year)));
        let _ = apply(&records, &params, 1);

        assert_eq!(records, before);
    }

    #[test]
    fn test_page_is_clamped() {
        let records: Vec<_> = (0..25)
            .map(|i| make_record(&i.to_string(), "Kia", 2020, i as f64))
            .collect();

        let beyond = apply(&records, &QueryParameters::new().with_page(99), 10);
        assert_eq!(beyond.current_page, 3);
        assert_eq!(beyond.items.len(), 5);
        assert!(!beyond.has_next());
        assert!(beyond.has_previous());

        let params = QueryParameters {
            page: 0,
            ..QueryParameters::default()
        };
        let below = apply(&records, &params, 10);
        assert_eq!(below.current_page, 1);
        assert_eq!(below.items.len(), 10);
        assert!(!below.has_previous());
    }

    #[test]
    fn test_empty_result() {
        let records = vec![make_record("1", "Kia", 2020, 1.0)];
        let params = QueryParameters::new()
            .with_manufacturers(vec!["Lada".to_string()])
            .with_page(3);

        let page = apply(&records, &params, 10);
        assert!(page.items.is_empty());
        assert!(page.is_empty());
        assert_eq!(page.total_pages, 1);
        assert_eq!(page.current_page, 1);
        assert_eq!(page.total_count, 0);
    }

    #[test]
    fn test_zero_page_size_treated_as_one() {
        let records = vec![
            make_record("1", "Kia", 2020, 1.0),
            make_record("2", "Kia", 2020, 1.0),
        ];
        let page = apply(&records, &QueryParameters::new().with_page(2), 0);
        assert_eq!(page.page_size, 1);
        assert_eq!(page.total_pages, 2);
        assert_eq!(ids(&page), vec!["2"]);
    }
}
