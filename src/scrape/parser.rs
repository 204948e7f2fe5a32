//! Schedule table extraction and normalization
//!
//! Turns a raw schedule page into a [`ScheduleTable`]: the first HTML table
//! in the document, with column names and cell values normalized. The parse
//! is a pure function so the retry/concurrency logic never depends on the
//! HTML library.

use scraper::{ElementRef, Html, Selector};

/// The string the API uses as its missing-value marker
const NULL_MARKER: &str = "nan";

/// Normalized tabular record for one course's weekly schedule
///
/// Invariants: column names carry no embedded newlines and no surrounding
/// whitespace; cells are trimmed and never the literal null marker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduleTable {
    /// Ordered column names
    pub columns: Vec<String>,

    /// Rows, each aligned with `columns`
    pub rows: Vec<Vec<String>>,
}

impl ScheduleTable {
    /// Returns whether the table has no data rows
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Parses a schedule page into a table, if it contains one
///
/// Takes the first `<table>` in the document. Column names come from the
/// header cells (or the first row when the table has no `<th>` cells); the
/// remaining rows become data rows, padded or truncated to the column
/// count. Returns `None` when there is no table or no data rows, which the
/// caller treats as "no schedule published".
///
/// # Arguments
///
/// * `html` - The raw page body
///
/// # Returns
///
/// * `Some(ScheduleTable)` - A non-empty normalized table
/// * `None` - No table, or a table with no data rows
pub fn parse_schedule_html(html: &str) -> Option<ScheduleTable> {
    let document = Html::parse_document(html);

    let table_selector = Selector::parse("table").ok()?;
    let row_selector = Selector::parse("tr").ok()?;
    let header_selector = Selector::parse("th").ok()?;
    let cell_selector = Selector::parse("td").ok()?;

    let table = document.select(&table_selector).next()?;

    let mut columns: Vec<String> = table
        .select(&header_selector)
        .map(|th| normalize_column(&cell_text(th)))
        .collect();

    let mut rows = Vec::new();
    for tr in table.select(&row_selector) {
        let cells: Vec<String> = tr
            .select(&cell_selector)
            .map(|td| normalize_cell(&cell_text(td)))
            .collect();

        // Header rows contain only <th> cells and yield nothing here
        if cells.is_empty() {
            continue;
        }

        if columns.is_empty() {
            // Table without header cells: promote the first row
            columns = cells.iter().map(|c| normalize_column(c)).collect();
            continue;
        }

        let mut row = cells;
        row.resize(columns.len(), String::new());
        rows.push(row);
    }

    if columns.is_empty() || rows.is_empty() {
        return None;
    }

    Some(ScheduleTable { columns, rows })
}

/// Collects the full text of an element, links included
fn cell_text(element: ElementRef) -> String {
    element.text().collect::<String>()
}

/// Normalizes one column name
///
/// Commas become semicolons (the legacy export format uses the comma as its
/// separator), newline and carriage-return characters collapse into the
/// surrounding text, and the result is trimmed.
pub fn normalize_column(raw: &str) -> String {
    raw.chars()
        .filter_map(|c| match c {
            ',' => Some(';'),
            '\n' => Some(' '),
            '\r' => None,
            c => Some(c),
        })
        .collect::<String>()
        .trim()
        .to_string()
}

/// Normalizes one cell value: trim, and erase the literal null marker
pub fn normalize_cell(raw: &str) -> String {
    let trimmed = raw.trim();
    if trimmed == NULL_MARKER {
        String::new()
    } else {
        trimmed.to_string()
    }
}
