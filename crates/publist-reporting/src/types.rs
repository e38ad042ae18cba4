use std::path::PathBuf;

use publist_core::SourceFormat;

/// Default cap on rendered authors before ", et al." is appended.
pub const DEFAULT_MAX_AUTHORS: usize = 10;

/// Per-pipeline rendering rules.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderStyle {
    /// Use "publication" for a single entry instead of always "publications".
    pub pluralize_heading: bool,
    /// Emit the author paragraph even when the author text is empty.
    pub always_show_authors: bool,
    /// Emit the venue paragraph even when the venue line is empty.
    pub always_show_venue: bool,
    /// Author lists longer than this are cut and suffixed with "et al.".
    /// Zero disables truncation. Pre-joined author strings are never cut.
    pub max_authors: usize,
    /// Escape `& < > "` in field text.
    pub escape_html: bool,
}

impl RenderStyle {
    /// Rules for spreadsheet exports: fixed plural heading, every paragraph
    /// always present.
    pub fn csv() -> Self {
        Self {
            pluralize_heading: false,
            always_show_authors: true,
            always_show_venue: true,
            max_authors: DEFAULT_MAX_AUTHORS,
            escape_html: false,
        }
    }

    /// Rules for RIS exports: singular/plural heading, empty paragraphs
    /// omitted.
    pub fn ris() -> Self {
        Self {
            pluralize_heading: true,
            always_show_authors: false,
            always_show_venue: false,
            max_authors: DEFAULT_MAX_AUTHORS,
            escape_html: false,
        }
    }

    pub fn for_format(format: SourceFormat) -> Self {
        match format {
            SourceFormat::Csv => Self::csv(),
            SourceFormat::Ris => Self::ris(),
        }
    }

    pub fn with_max_authors(mut self, max_authors: usize) -> Self {
        self.max_authors = max_authors;
        self
    }

    pub fn with_escape_html(mut self, escape_html: bool) -> Self {
        self.escape_html = escape_html;
        self
    }
}

/// What a pipeline run produced, for the summary printed afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportSummary {
    pub format: SourceFormat,
    /// Publications rendered (records with a usable year).
    pub publications: usize,
    pub years: usize,
    /// Records read but left out for lack of a year.
    pub skipped: usize,
    pub output: PathBuf,
}

impl ExportSummary {
    /// Summary lines for standard output.
    pub fn lines(&self) -> Vec<String> {
        match self.format {
            SourceFormat::Csv => vec![
                format!(
                    "Generated HTML for {} publications across {} years",
                    self.publications, self.years
                ),
                format!("Output written to {}", self.output.display()),
            ],
            SourceFormat::Ris => vec![format!(
                "Generated {} publications across {} years with full author information",
                self.publications, self.years
            )],
        }
    }
}
