use std::path::{Path, PathBuf};

use thiserror::Error;

// Re-export domain types for convenience
pub use publist_core::{Publication, SourceFormat, YearGroups, group_by_year};
pub use publist_reporting::{ExportSummary, RenderStyle};

/// Default input and output locations, relative to the working directory.
pub const DEFAULT_CSV_INPUT: &str = "docs/citations.csv";
pub const DEFAULT_CSV_OUTPUT: &str = "publications_section.html";
pub const DEFAULT_RIS_INPUT: &str = "docs/citations.ris";
pub const DEFAULT_RIS_OUTPUT: &str = "publications_section_with_authors.html";

#[derive(Error, Debug)]
pub enum IngestError {
    #[error("CSV extraction error: {0}")]
    Csv(#[from] publist_csv::CsvError),
    #[error("RIS extraction error: {0}")]
    Ris(#[from] publist_ris::RisError),
    #[error("output error: {0}")]
    Report(#[from] publist_reporting::ReportError),
    #[error("cannot tell the format of {0} (expected a .csv or .ris file)")]
    UnknownFormat(PathBuf),
}

/// Default `(input, output)` paths for `format`.
pub fn default_paths(format: SourceFormat) -> (&'static str, &'static str) {
    match format {
        SourceFormat::Csv => (DEFAULT_CSV_INPUT, DEFAULT_CSV_OUTPUT),
        SourceFormat::Ris => (DEFAULT_RIS_INPUT, DEFAULT_RIS_OUTPUT),
    }
}

/// Work out the format of `path` from its extension.
pub fn detect_format(path: &Path) -> Result<SourceFormat, IngestError> {
    path.extension()
        .and_then(|e| e.to_str())
        .and_then(SourceFormat::from_extension)
        .ok_or_else(|| IngestError::UnknownFormat(path.to_path_buf()))
}

/// Read publications from a CSV or RIS file.
///
/// Dispatches to the matching parser; with `format` unset the file
/// extension decides.
pub fn read_publications(
    path: &Path,
    format: Option<SourceFormat>,
) -> Result<Vec<Publication>, IngestError> {
    let format = match format {
        Some(f) => f,
        None => detect_format(path)?,
    };

    match format {
        SourceFormat::Csv => publist_csv::parse_csv_file(path).map_err(IngestError::Csv),
        SourceFormat::Ris => publist_ris::parse_ris_file(path).map_err(IngestError::Ris),
    }
}

/// One parse, group, render run.
#[derive(Debug, Clone)]
pub struct Pipeline {
    pub format: SourceFormat,
    pub input: PathBuf,
    pub output: PathBuf,
    pub style: RenderStyle,
    /// Parse and group but leave the output file alone.
    pub dry_run: bool,
}

impl Pipeline {
    /// A pipeline with the default paths and rendering rules for `format`.
    pub fn for_format(format: SourceFormat) -> Self {
        let (input, output) = default_paths(format);
        Self {
            format,
            input: PathBuf::from(input),
            output: PathBuf::from(output),
            style: RenderStyle::for_format(format),
            dry_run: false,
        }
    }

    /// Parse and group the input without rendering.
    pub fn load(&self) -> Result<YearGroups, IngestError> {
        let publications = read_publications(&self.input, Some(self.format))?;
        Ok(group_by_year(publications))
    }

    pub fn run(&self) -> Result<(YearGroups, ExportSummary), IngestError> {
        tracing::info!(
            format = %self.format,
            input = %self.input.display(),
            output = %self.output.display(),
            dry_run = self.dry_run,
            "running pipeline"
        );

        let groups = self.load()?;
        if groups.skip_stats.skipped() > 0 {
            tracing::debug!(
                no_year = groups.skip_stats.no_year,
                unknown_year = groups.skip_stats.unknown_year,
                "records left out of the output"
            );
        }

        let summary = if self.dry_run {
            publist_reporting::summarize(&groups, self.format, &self.output)
        } else {
            publist_reporting::export_html(&groups, self.format, &self.style, &self.output)?
        };
        Ok((groups, summary))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_format() {
        assert_eq!(
            detect_format(Path::new("docs/citations.csv")).unwrap(),
            SourceFormat::Csv
        );
        assert_eq!(
            detect_format(Path::new("export.RIS")).unwrap(),
            SourceFormat::Ris
        );
        assert!(matches!(
            detect_format(Path::new("refs.bib")),
            Err(IngestError::UnknownFormat(_))
        ));
        assert!(matches!(
            detect_format(Path::new("no_extension")),
            Err(IngestError::UnknownFormat(_))
        ));
    }

    #[test]
    fn test_default_pipelines() {
        let csv = Pipeline::for_format(SourceFormat::Csv);
        assert_eq!(csv.input, PathBuf::from("docs/citations.csv"));
        assert_eq!(csv.output, PathBuf::from("publications_section.html"));
        assert_eq!(csv.style, RenderStyle::csv());
        assert!(!csv.dry_run);

        let ris = Pipeline::for_format(SourceFormat::Ris);
        assert_eq!(ris.input, PathBuf::from("docs/citations.ris"));
        assert_eq!(
            ris.output,
            PathBuf::from("publications_section_with_authors.html")
        );
        assert_eq!(ris.style, RenderStyle::ris());
    }
}
