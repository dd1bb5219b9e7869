//! Mapping of raw Web of Science hits into [`NormalizedDocument`]s.

use chrono::NaiveDate;

use crate::models::{DocumentBuilder, NormalizedDocument, RawDocument, UpstreamPage};

/// Upstream month abbreviations (matched case-sensitively)
const MONTHS: [(&str, &str); 12] = [
    ("JAN", "01"),
    ("FEB", "02"),
    ("MAR", "03"),
    ("APR", "04"),
    ("MAY", "05"),
    ("JUN", "06"),
    ("JUL", "07"),
    ("AUG", "08"),
    ("SEP", "09"),
    ("OCT", "10"),
    ("NOV", "11"),
    ("DEC", "12"),
];

/// Normalize every hit on a page, dropping hits without identifiers
pub fn normalize_page(page: &UpstreamPage) -> Vec<NormalizedDocument> {
    page.hits.iter().filter_map(normalize_document).collect()
}

/// Normalize a single hit. Returns `None` when the `identifiers` block is
/// missing, since such a record cannot be cited downstream.
pub fn normalize_document(raw: &RawDocument) -> Option<NormalizedDocument> {
    raw.identifiers()?;
    let id = |key: &str| raw.text(&["identifiers", key]).unwrap_or_default();

    let year = raw.publish_year();
    let published_date = published_date(year.as_deref(), raw.publish_month().as_deref());

    let document = DocumentBuilder::new(
        raw.uid().unwrap_or_default(),
        raw.text(&["title"]).unwrap_or_default(),
    )
    .abstract_text(raw.text(&["abstract"]).unwrap_or_default())
    .doi(id("doi"))
    .pmid(id("pmid"))
    .year(year.unwrap_or_default())
    .published_date(published_date)
    .types(raw.types().into_vec())
    .authors(raw.author_names())
    .keywords(raw.author_keywords())
    .source(
        raw.text(&["source", "sourceTitle"]).unwrap_or_default(),
        raw.text(&["source", "volume"]).unwrap_or_default(),
        raw.text(&["source", "issue"]).unwrap_or_default(),
    )
    .link(raw.text(&["links", "record"]).unwrap_or_default())
    .build();

    Some(document)
}

/// Start of a month range: "NOV-DEC" -> "NOV"
pub fn month_start(month: &str) -> &str {
    month.split('-').next().unwrap_or(month).trim()
}

/// Numeric form of a month abbreviation, if known
pub fn month_number(abbreviation: &str) -> Option<&'static str> {
    MONTHS
        .iter()
        .find(|(name, _)| *name == abbreviation)
        .map(|(_, number)| *number)
}

/// Reconstruct an ISO date from separate year and month values.
///
/// Unknown abbreviations pass through unchanged and usually fail to parse,
/// which yields `None`, as does a missing year or month.
pub fn published_date(year: Option<&str>, month: Option<&str>) -> Option<String> {
    let year = year.map(str::trim).filter(|y| !y.is_empty())?;
    let month = month.map(month_start).filter(|m| !m.is_empty())?;
    let month = month_number(month).unwrap_or(month);

    NaiveDate::parse_from_str(&format!("{}-{}-01", year, month), "%Y-%m-%d")
        .ok()
        .map(|date| date.format("%Y-%m-%d").to_string())
}
