use std::path::Path;

use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;

use publist_core::{Authors, PageRange, Publication, non_empty};

#[derive(Error, Debug)]
pub enum RisError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// The RIS tags this parser understands. Anything else is ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Tag {
    /// `TY`: reference type, starts a record.
    Type,
    /// `T1`
    Title,
    /// `A1`, may repeat.
    Author,
    /// `JO`
    Journal,
    /// `VL`
    Volume,
    /// `IS`
    Issue,
    /// `SP`
    StartPage,
    /// `EP`
    EndPage,
    /// `Y1`
    Year,
    /// `PB`
    Publisher,
    /// `ER`: end of record.
    EndOfRecord,
}

impl Tag {
    fn from_code(code: &str) -> Option<Self> {
        Some(match code {
            "TY" => Self::Type,
            "T1" => Self::Title,
            "A1" => Self::Author,
            "JO" => Self::Journal,
            "VL" => Self::Volume,
            "IS" => Self::Issue,
            "SP" => Self::StartPage,
            "EP" => Self::EndPage,
            "Y1" => Self::Year,
            "PB" => Self::Publisher,
            "ER" => Self::EndOfRecord,
            _ => return None,
        })
    }
}

/// Split a trimmed line into its tag and value.
///
/// A tag line is the two-letter code, two spaces, a dash, then the value.
fn parse_line(line: &str) -> Option<(Tag, &str)> {
    static TAG_RE: Lazy<Regex> =
        Lazy::new(|| Regex::new(r"^([A-Z][A-Z0-9])  -(.*)$").unwrap());

    let caps = TAG_RE.captures(line)?;
    let tag = Tag::from_code(caps.get(1)?.as_str())?;
    Some((tag, caps.get(2).map_or("", |m| m.as_str()).trim()))
}

/// Accumulator state between lines.
#[derive(Debug, Default)]
enum State {
    /// No record has been started.
    #[default]
    Idle,
    /// Fields are being collected into a record.
    Accumulating(Publication),
}

/// Line-at-a-time RIS scanner.
///
/// Records are finalised on `ER` or on the next `TY`, whichever comes
/// first. `ER` leaves an empty record accumulating, so a following `TY`
/// flushes that empty record too; such records carry no year and are
/// dropped at grouping time.
#[derive(Debug, Default)]
pub struct RisScanner {
    state: State,
    records: Vec<Publication>,
}

impl RisScanner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed one input line.
    pub fn feed(&mut self, line: &str) {
        let line = line.trim();
        let Some((tag, value)) = parse_line(line) else {
            if !line.is_empty() {
                tracing::trace!(line, "ignoring unrecognised RIS line");
            }
            return;
        };

        match tag {
            Tag::Type => {
                if let State::Accumulating(record) = std::mem::take(&mut self.state) {
                    self.flush(record);
                }
                self.state = State::Accumulating(Publication::default());
            }
            Tag::EndOfRecord => {
                if let State::Accumulating(record) = std::mem::take(&mut self.state) {
                    self.flush(record);
                    self.state = State::Accumulating(Publication::default());
                }
            }
            _ => {
                let mut record = match std::mem::take(&mut self.state) {
                    State::Accumulating(record) => record,
                    State::Idle => Publication::default(),
                };
                set_field(&mut record, tag, value);
                self.state = State::Accumulating(record);
            }
        }
    }

    /// Finish scanning and return every flushed record.
    ///
    /// A trailing record without `ER` is kept only if it has a non-empty title.
    pub fn finish(mut self) -> Vec<Publication> {
        if let State::Accumulating(record) = self.state
            && record.title.as_deref().is_some_and(|t| !t.is_empty())
        {
            self.records.push(record);
        }
        self.records
    }

    fn flush(&mut self, record: Publication) {
        if record.is_blank() {
            tracing::trace!(index = self.records.len(), "flushing empty RIS record");
        }
        self.records.push(record);
    }
}

fn set_field(record: &mut Publication, tag: Tag, value: &str) {
    match tag {
        Tag::Title => record.title = Some(value.to_string()),
        Tag::Author => match &mut record.authors {
            Authors::List(list) => list.push(value.to_string()),
            Authors::Joined(_) => record.authors = Authors::List(vec![value.to_string()]),
        },
        Tag::Journal => record.venue = non_empty(value),
        Tag::Volume => record.volume = non_empty(value),
        Tag::Issue => record.issue = non_empty(value),
        Tag::StartPage => set_page_bound(&mut record.pages, value, true),
        Tag::EndPage => set_page_bound(&mut record.pages, value, false),
        Tag::Year => record.year = non_empty(value),
        Tag::Publisher => record.publisher = non_empty(value),
        Tag::Type | Tag::EndOfRecord => {}
    }
}

fn set_page_bound(pages: &mut PageRange, value: &str, is_start: bool) {
    if let PageRange::Literal(_) = pages {
        *pages = PageRange::default();
    }
    if let PageRange::Bounds { start, end } = pages {
        if is_start {
            *start = non_empty(value);
        } else {
            *end = non_empty(value);
        }
    }
}

/// Parse a RIS file into publication records.
pub fn parse_ris_file(path: &Path) -> Result<Vec<Publication>, RisError> {
    let content = std::fs::read_to_string(path)?;
    Ok(parse_ris_str(&content))
}

/// Parse RIS content from a string (useful for testing).
pub fn parse_ris_str(content: &str) -> Vec<Publication> {
    let content = content.strip_prefix('\u{feff}').unwrap_or(content);

    let mut scanner = RisScanner::new();
    for line in content.lines() {
        scanner.feed(line);
    }
    let records = scanner.finish();

    tracing::debug!(records = records.len(), "parsed RIS input");
    records
}
