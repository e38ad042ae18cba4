use std::fmt;
use std::str::FromStr;

pub mod config_file;
pub mod group;

// Re-export for convenience
pub use config_file::{ConfigError, ConfigFile};
pub use group::{SkipStats, YearGroups, group_by_year};

/// Year value that marks a record as undated.
pub const UNKNOWN_YEAR: &str = "Unknown";

/// Input format a publication list was read from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SourceFormat {
    Csv,
    Ris,
}

impl SourceFormat {
    /// Guess the format from a file extension (case-insensitive).
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "csv" => Some(Self::Csv),
            "ris" => Some(Self::Ris),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Csv => "csv",
            Self::Ris => "ris",
        }
    }
}

impl fmt::Display for SourceFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SourceFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_extension(s).ok_or_else(|| format!("unknown format: {s} (expected csv or ris)"))
    }
}

/// Author information as it appears in the source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Authors {
    /// A single pre-joined string, e.g. `"Doe, J.; Smith, A."` from a CSV column.
    Joined(String),
    /// One entry per author, in source order.
    List(Vec<String>),
}

impl Authors {
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Joined(s) => s.is_empty(),
            Self::List(v) => v.is_empty(),
        }
    }
}

impl Default for Authors {
    fn default() -> Self {
        Self::List(Vec::new())
    }
}

/// Page information as it appears in the source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageRange {
    /// A free-form page string such as `"10-20"`.
    Literal(String),
    /// Separate start and end pages.
    Bounds {
        start: Option<String>,
        end: Option<String>,
    },
}

impl PageRange {
    /// Text for the venue line, or `None` when there is nothing to show.
    ///
    /// An end page without a start page is dropped.
    pub fn display(&self) -> Option<String> {
        match self {
            Self::Literal(s) if s.is_empty() => None,
            Self::Literal(s) => Some(s.clone()),
            Self::Bounds {
                start: Some(start),
                end: Some(end),
            } => Some(format!("{start}-{end}")),
            Self::Bounds {
                start: Some(start),
                end: None,
            } => Some(start.clone()),
            Self::Bounds { start: None, .. } => None,
        }
    }
}

impl Default for PageRange {
    fn default() -> Self {
        Self::Bounds {
            start: None,
            end: None,
        }
    }
}

/// A single bibliographic record parsed from a publication list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Publication {
    /// `None` when the source carried no title at all.
    pub title: Option<String>,
    pub authors: Authors,
    /// Raw year string, used as the grouping key.
    pub year: Option<String>,
    /// Journal or publication name.
    pub venue: Option<String>,
    pub volume: Option<String>,
    pub issue: Option<String>,
    pub pages: PageRange,
    /// Parsed but not rendered.
    pub publisher: Option<String>,
}

impl Publication {
    /// The grouping key, or `None` if the year is missing, empty or `Unknown`.
    pub fn usable_year(&self) -> Option<&str> {
        match self.year.as_deref() {
            Some(y) if !y.is_empty() && y != UNKNOWN_YEAR => Some(y),
            _ => None,
        }
    }

    /// True if no field has been set.
    pub fn is_blank(&self) -> bool {
        *self == Self::default()
    }
}

/// Map an empty string to `None`.
pub fn non_empty(s: impl Into<String>) -> Option<String> {
    let s = s.into();
    if s.is_empty() { None } else { Some(s) }
}
