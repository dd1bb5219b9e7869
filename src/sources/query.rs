//! Web of Science advanced-search query construction.
//!
//! A request becomes a single query-language string with clauses in a fixed
//! order: the field clause, then `PY=`, then `DT=`. Keeping the order stable
//! makes the upstream query string reproducible.

use chrono::{Datelike, Local};

use crate::models::{DocumentType, SearchRequest};

/// First year of an open-start range like "-2015"
pub const EARLIEST_YEAR: i32 = 1900;

/// Build the upstream query string, resolving open-ended year ranges
/// against the current local year.
pub fn build_query(request: &SearchRequest) -> String {
    build_query_at(request, Local::now().year())
}

/// Same as [`build_query`] with an explicit current year
pub fn build_query_at(request: &SearchRequest, current_year: i32) -> String {
    let mut query = format!("{}=({})", request.query_type.code(), request.query);

    if let Some(year) = request.year.as_deref() {
        query.push_str(&format!(" AND PY=({})", resolve_year(year, current_year)));
    }

    if request.document_type != DocumentType::All {
        query.push_str(&format!(" AND DT=({})", request.document_type.as_str()));
    }

    query
}

/// Resolve a year filter to a single year or a closed "YYYY-YYYY" range.
///
/// "2020-" becomes "2020-<current_year>", "-2020" becomes "1900-2020";
/// anything else is used verbatim.
pub fn resolve_year(year: &str, current_year: i32) -> String {
    let mut year = year.trim().to_string();
    if year.ends_with('-') {
        year = format!("{}{}", year, current_year);
    }
    if year.starts_with('-') {
        year = format!("{}{}", EARLIEST_YEAR, year);
    }
    year
}
