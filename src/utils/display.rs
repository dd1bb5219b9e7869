//! Terminal output for search results.

use comfy_table::{presets::UTF8_FULL, ContentArrangement, Table};

use crate::models::SearchResult;

const TITLE_WIDTH: usize = 60;
const AUTHORS_WIDTH: usize = 30;
const JOURNAL_WIDTH: usize = 30;

/// Truncate text to at most `max_chars` characters, appending "..." when cut.
///
/// # Examples
///
/// ```
/// use wos_search::utils::truncate_with_ellipsis;
///
/// assert_eq!(truncate_with_ellipsis("Hello World", 8), "Hello...");
/// assert_eq!(truncate_with_ellipsis("Hi", 8), "Hi");
/// ```
pub fn truncate_with_ellipsis(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    if max_chars <= 3 {
        return ".".repeat(max_chars);
    }
    let kept: String = text.chars().take(max_chars - 3).collect();
    format!("{}...", kept.trim_end())
}

/// Render a result as a table with one row per record
pub fn documents_table(result: &SearchResult) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["#", "Title", "Authors", "Journal", "Date", "ID"]);

    for (i, doc) in result.data.iter().enumerate() {
        let date = doc
            .published_date
            .clone()
            .unwrap_or_else(|| doc.year.clone());
        table.add_row(vec![
            (i + 1).to_string(),
            truncate_with_ellipsis(&doc.title, TITLE_WIDTH),
            truncate_with_ellipsis(&doc.author_line(), AUTHORS_WIDTH),
            truncate_with_ellipsis(&doc.journal, JOURNAL_WIDTH),
            date,
            doc.primary_id().to_string(),
        ]);
    }

    table
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::DocumentBuilder;

    #[test]
    fn test_truncate() {
        assert_eq!(truncate_with_ellipsis("abcdef", 6), "abcdef");
        assert_eq!(truncate_with_ellipsis("abcdefgh", 6), "abc...");
        assert_eq!(truncate_with_ellipsis("abcdefgh", 2), "..");
    }

    #[test]
    fn test_table_rows() {
        let result = SearchResult {
            total: 2,
            data: vec![
                DocumentBuilder::new("WOS:1", "First").year("2020").build(),
                DocumentBuilder::new("WOS:2", "Second")
                    .published_date(Some("2021-11-01".to_string()))
                    .build(),
            ],
            partial: false,
        };
        let rendered = documents_table(&result).to_string();
        assert!(rendered.contains("First"));
        assert!(rendered.contains("2020"));
        assert!(rendered.contains("2021-11-01"));
        assert!(rendered.contains("WOS:2"));
    }
}
