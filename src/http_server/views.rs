//! HTML views
//!
//! Server-rendered pages for the listing, the detail view and the two
//! degraded outcomes (not found, dataset unavailable). All interpolated text
//! goes through [`escape_html`].

use url::form_urlencoded;

use crate::catalog::{VehicleRecord, VehicleType};
use crate::query::{QueryPage, QueryParameters, SortKey, SortSpec};

/// Everything the listing page needs
pub struct ListingView<'a> {
    pub page: &'a QueryPage<VehicleRecord>,
    pub params: &'a QueryParameters,
    pub manufacturers: &'a [String],
    pub year_bounds: Option<(i32, i32)>,
}

/// Sort options offered by the form, with their labels
const SORT_OPTIONS: [(SortKey, bool, &str); 4] = [
    (SortKey::Price, false, "Price: Low to High"),
    (SortKey::Price, true, "Price: High to Low"),
    (SortKey::Year, false, "Year: Oldest First"),
    (SortKey::Year, true, "Year: Newest First"),
];

pub fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            c => out.push(c),
        }
    }
    out
}

/// Uppercase the first character, lowercase the rest
pub fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}

/// Format a number with thousands separators, e.g. `28,500` or `1,234.5`
pub fn format_number(value: f64) -> String {
    let rendered = format!("{:.2}", value.abs());
    let (int_part, frac_part) = rendered.split_once('.').unwrap_or((rendered.as_str(), ""));

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, c) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }

    let frac = frac_part.trim_end_matches('0');
    let sign = if value < 0.0 { "-" } else { "" };
    if frac.is_empty() {
        format!("{}{}", sign, grouped)
    } else {
        format!("{}{}.{}", sign, grouped, frac)
    }
}

/// Path of the detail page for a record
pub fn detail_href(id: &str) -> String {
    // byte_serialize emits '+' only for spaces
    let encoded: String = form_urlencoded::byte_serialize(id.as_bytes()).collect();
    format!("/vehicles/{}", encoded.replace('+', "%20"))
}

fn layout(title: &str, body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
         <title>{}</title>\n</head>\n<body>\n<main class=\"container\">\n{}</main>\n</body>\n</html>\n",
        escape_html(title),
        body
    )
}

pub fn listing_page(view: &ListingView<'_>) -> String {
    let mut body = String::new();
    body.push_str("<h1>Vehicles</h1>\n");
    body.push_str(&filter_form(view));

    if view.page.is_empty() {
        body.push_str("<p class=\"no-results\">No vehicles found.</p>\n");
    } else {
        body.push_str(&vehicle_table(&view.page.items));
    }

    body.push_str(&pager(view.page, view.params));
    layout("Vehicles", &body)
}

fn filter_form(view: &ListingView<'_>) -> String {
    let params = view.params;
    let mut out = String::new();
    out.push_str("<form method=\"get\" action=\"/\" class=\"filters\">\n");

    out.push_str("<fieldset class=\"manufacturers\">\n<legend>Brands</legend>\n");
    for manufacturer in view.manufacturers {
        let checked = if params.manufacturers.contains(manufacturer) {
            " checked"
        } else {
            ""
        };
        out.push_str(&format!(
            "<label><input type=\"checkbox\" name=\"manufacturer\" value=\"{0}\"{1}> {0}</label>\n",
            escape_html(manufacturer),
            checked
        ));
    }
    out.push_str("</fieldset>\n");

    out.push_str("<select name=\"type\">\n<option value=\"\">All Types</option>\n");
    for vehicle_type in VehicleType::ALL {
        let selected = if params.vehicle_type == Some(vehicle_type) {
            " selected"
        } else {
            ""
        };
        out.push_str(&format!(
            "<option value=\"{}\"{}>{}</option>\n",
            vehicle_type.as_str(),
            selected,
            capitalize(vehicle_type.as_str())
        ));
    }
    out.push_str("</select>\n");

    let year = params.year.map(|y| y.to_string()).unwrap_or_default();
    let (min, max) = match view.year_bounds {
        Some((min, max)) => (format!(" min=\"{}\"", min), format!(" max=\"{}\"", max)),
        None => (String::new(), String::new()),
    };
    out.push_str(&format!(
        "<input type=\"number\" name=\"year\" placeholder=\"Year\" value=\"{}\"{}{}>\n",
        year, min, max
    ));

    out.push_str("<select name=\"sort\">\n<option value=\"\">Sort By</option>\n");
    for (key, descending, label) in SORT_OPTIONS {
        let spec = if descending {
            SortSpec::desc(key)
        } else {
            SortSpec::asc(key)
        };
        let selected = if params.sort == Some(spec) {
            " selected"
        } else {
            ""
        };
        out.push_str(&format!(
            "<option value=\"{}\"{}>{}</option>\n",
            spec, selected, label
        ));
    }
    out.push_str("</select>\n");

    out.push_str("<button type=\"submit\">Apply</button>\n");
    if params.has_filters() || params.sort.is_some() {
        out.push_str("<a href=\"/\" class=\"clear\">Clear All</a>\n");
    }
    out.push_str("</form>\n");
    out
}

fn vehicle_table(vehicles: &[VehicleRecord]) -> String {
    let mut out = String::new();
    out.push_str(
        "<table class=\"vehicles\">\n<thead>\n<tr><th>Brand</th><th>Model</th><th>Year</th>\
         <th>Type</th><th>Price</th><th></th></tr>\n</thead>\n<tbody>\n",
    );

    for vehicle in vehicles {
        out.push_str(&format!(
            "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>${}</td>\
             <td><a href=\"{}\">View Details</a></td></tr>\n",
            escape_html(&vehicle.manufacturer),
            escape_html(&vehicle.model),
            vehicle.year,
            vehicle.vehicle_type,
            format_number(vehicle.price),
            escape_html(&detail_href(&vehicle.id)),
        ));
    }

    out.push_str("</tbody>\n</table>\n");
    out
}

fn pager(page: &QueryPage<VehicleRecord>, params: &QueryParameters) -> String {
    if page.total_pages <= 1 {
        return String::new();
    }

    let link = |n: usize| escape_html(&format!("/?{}", params.with_page(n).to_query_string()));

    let mut out = String::from("<nav class=\"pagination\">\n");
    if page.has_previous() {
        out.push_str(&format!(
            "<a href=\"{}\" rel=\"prev\">Previous</a>\n",
            link(page.current_page - 1)
        ));
    }
    for n in 1..=page.total_pages {
        if n == page.current_page {
            out.push_str(&format!("<span class=\"current\">{}</span>\n", n));
        } else {
            out.push_str(&format!("<a href=\"{}\">{}</a>\n", link(n), n));
        }
    }
    if page.has_next() {
        out.push_str(&format!(
            "<a href=\"{}\" rel=\"next\">Next</a>\n",
            link(page.current_page + 1)
        ));
    }
    out.push_str("</nav>\n");
    out
}

pub fn detail_page(vehicle: &VehicleRecord) -> String {
    let name = vehicle.display_name();
    let mileage = match vehicle.mileage {
        Some(m) => format!("{} km", format_number(m)),
        None => "N/A".to_string(),
    };

    let body = format!(
        "<article class=\"vehicle\">\n<h2>{name}</h2>\n<p class=\"description\">{description}</p>\n\
         <dl>\n\
         <dt>Year</dt><dd>{year}</dd>\n\
         <dt>Type</dt><dd>{vehicle_type}</dd>\n\
         <dt>Fuel Type</dt><dd>{fuel}</dd>\n\
         <dt>Features</dt><dd>{features}</dd>\n\
         <dt>Price</dt><dd>${price}</dd>\n\
         <dt>Transmission</dt><dd>{transmission}</dd>\n\
         <dt>Mileage</dt><dd>{mileage}</dd>\n\
         </dl>\n<a href=\"/\">Back to Vehicles</a>\n</article>\n",
        name = escape_html(&name),
        description = escape_html(&vehicle.description),
        year = vehicle.year,
        vehicle_type = capitalize(vehicle.vehicle_type.as_str()),
        fuel = escape_html(&capitalize(&vehicle.fuel_type)),
        features = escape_html(&vehicle.features.join(" | ")),
        price = format_number(vehicle.price),
        transmission = escape_html(&vehicle.transmission),
        mileage = mileage,
    );

    layout(&name, &body)
}

pub fn not_found_page() -> String {
    layout(
        "Vehicle Not Found",
        "<h1>Vehicle Not Found</h1>\n\
         <p>Sorry, we couldn't find the vehicle you're looking for.</p>\n\
         <a href=\"/\">Back to Home</a>\n",
    )
}

pub fn unavailable_page() -> String {
    layout(
        "Vehicles",
        "<h1>There was an issue loading the vehicles and manufacturers.</h1>\n\
         <p>Please try again later.</p>\n",
    )
}
