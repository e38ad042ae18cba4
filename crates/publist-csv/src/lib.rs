//! Parser for citation spreadsheets exported as CSV.
//!
//! The file must have a header row. Columns are matched by name; the ones
//! read are `Year, Authors, Title, Publication, Volume, Number, Pages,
//! Publisher`. Missing columns and short rows read as empty strings, and
//! every value is whitespace-trimmed.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

use publist_core::{Authors, PageRange, Publication, non_empty};

#[derive(Error, Debug)]
pub enum CsvError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct CsvRow {
    #[serde(rename = "Year")]
    year: String,
    #[serde(rename = "Authors")]
    authors: String,
    #[serde(rename = "Title")]
    title: String,
    #[serde(rename = "Publication")]
    publication: String,
    #[serde(rename = "Volume")]
    volume: String,
    #[serde(rename = "Number")]
    number: String,
    #[serde(rename = "Pages")]
    pages: String,
    #[serde(rename = "Publisher")]
    publisher: String,
}

impl From<CsvRow> for Publication {
    fn from(row: CsvRow) -> Self {
        Publication {
            title: Some(row.title.trim().to_string()),
            authors: Authors::Joined(clean_authors(&row.authors)),
            year: non_empty(row.year.trim()),
            venue: non_empty(row.publication.trim()),
            volume: non_empty(row.volume.trim()),
            issue: non_empty(row.number.trim()),
            pages: PageRange::Literal(row.pages.trim().to_string()),
            publisher: non_empty(row.publisher.trim()),
        }
    }
}

/// Trim an author list and drop trailing separators: `"A; B;"` → `"A; B"`.
fn clean_authors(raw: &str) -> String {
    raw.trim().trim_end_matches(';').trim().to_string()
}

/// Parse a CSV file into publication records.
pub fn parse_csv_file(path: &Path) -> Result<Vec<Publication>, CsvError> {
    let file = File::open(path)?;
    parse_csv_reader(file)
}

/// Parse CSV content from a string (useful for testing).
pub fn parse_csv_str(content: &str) -> Result<Vec<Publication>, CsvError> {
    parse_csv_reader(content.as_bytes())
}

/// Parse CSV from any reader. Every row yields a record, including rows
/// with no usable year; those are filtered out at grouping time.
pub fn parse_csv_reader<R: Read>(reader: R) -> Result<Vec<Publication>, CsvError> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = rdr.headers()?.clone();
    let mut records = Vec::new();
    for row in rdr.records() {
        let mut row = row?;
        // Short rows read as empty trailing fields; extra fields are dropped.
        while row.len() < headers.len() {
            row.push_field("");
        }
        row.truncate(headers.len());
        let row: CsvRow = row.deserialize(Some(&headers))?;
        records.push(Publication::from(row));
    }

    tracing::debug!(records = records.len(), "parsed CSV input");
    Ok(records)
}
