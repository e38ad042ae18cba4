use std::path::{Path, PathBuf};

use thiserror::Error;

use publist_core::{Authors, Publication, SourceFormat, YearGroups};

use crate::types::{ExportSummary, RenderStyle};

/// Placeholder for records that never had a title.
const UNTITLED: &str = "Untitled";

const HEADING_STYLE: &str =
    "color: var(--secondary-color); font-size: 1.2rem; margin-top: 2rem; margin-bottom: 1rem;";
const TITLE_STYLE: &str = "margin-bottom: 0.25rem;";
const AUTHORS_STYLE: &str = "font-size: 0.9rem; color: #666; margin-bottom: 0.25rem;";
const VENUE_STYLE: &str = "font-size: 0.9rem; color: #666;";

#[derive(Error, Debug)]
pub enum ReportError {
    #[error("failed to write {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Render grouped publications and write the fragment to `path`.
pub fn export_html(
    groups: &YearGroups,
    format: SourceFormat,
    style: &RenderStyle,
    path: &Path,
) -> Result<ExportSummary, ReportError> {
    let content = render_html(groups, style);
    write_output(path, &content)?;
    tracing::info!(path = %path.display(), bytes = content.len(), "wrote publication list");

    Ok(summarize(groups, format, path))
}

/// Summary for a run without writing anything.
pub fn summarize(groups: &YearGroups, format: SourceFormat, path: &Path) -> ExportSummary {
    ExportSummary {
        format,
        publications: groups.total(),
        years: groups.year_count(),
        skipped: groups.skip_stats.skipped(),
        output: path.to_path_buf(),
    }
}

/// Write the whole fragment in one go, replacing any existing file.
pub fn write_output(path: &Path, content: &str) -> Result<(), ReportError> {
    std::fs::write(path, content).map_err(|source| ReportError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Render every year bucket, newest first, as one HTML fragment.
pub fn render_html(groups: &YearGroups, style: &RenderStyle) -> String {
    let mut out = String::with_capacity(groups.total() * 400);

    for (year, pubs) in groups.iter() {
        write_heading(&mut out, year, pubs.len(), style);
        for publication in pubs {
            write_item(&mut out, publication, style);
        }
    }

    out
}

fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

fn text(s: &str, style: &RenderStyle) -> String {
    if style.escape_html {
        html_escape(s)
    } else {
        s.to_string()
    }
}

fn write_heading(out: &mut String, year: &str, count: usize, style: &RenderStyle) {
    let noun = if style.pluralize_heading && count == 1 {
        "publication"
    } else {
        "publications"
    };
    out.push_str(&format!(
        "<h3 style=\"{}\">{} ({} {})</h3>\n",
        HEADING_STYLE,
        text(year, style),
        count,
        noun
    ));
}

fn write_item(out: &mut String, publication: &Publication, style: &RenderStyle) {
    let title = publication.title.as_deref().unwrap_or(UNTITLED);
    let authors = author_text(&publication.authors, style.max_authors);
    let venue = venue_line(publication);

    out.push_str("<div class=\"cv-item\">\n");
    out.push_str(&format!(
        "    <p style=\"{}\"><strong>{}</strong></p>\n",
        TITLE_STYLE,
        text(title, style)
    ));
    if style.always_show_authors || !authors.is_empty() {
        out.push_str(&format!(
            "    <p style=\"{}\">{}</p>\n",
            AUTHORS_STYLE,
            text(&authors, style)
        ));
    }
    if style.always_show_venue || !venue.is_empty() {
        out.push_str(&format!(
            "    <p style=\"{}\"><em>{}</em></p>\n",
            VENUE_STYLE,
            text(&venue, style)
        ));
    }
    out.push_str("</div>\n\n");
}

/// Author line text.
///
/// Lists longer than `max_authors` keep the first `max_authors` names and
/// end in ", et al."; `max_authors == 0` keeps everyone.
fn author_text(authors: &Authors, max_authors: usize) -> String {
    match authors {
        Authors::Joined(s) => s.clone(),
        Authors::List(list) if max_authors > 0 && list.len() > max_authors => {
            format!("{}, et al.", list[..max_authors].join(", "))
        }
        Authors::List(list) => list.join(", "),
    }
}

/// Venue name followed by whichever of volume, issue and pages are present:
/// `Journal X, 5(2), 10-20`.
fn venue_line(publication: &Publication) -> String {
    let mut line = publication.venue.clone().unwrap_or_default();
    if let Some(volume) = &publication.volume {
        line.push_str(&format!(", {volume}"));
    }
    if let Some(issue) = &publication.issue {
        line.push_str(&format!("({issue})"));
    }
    if let Some(pages) = publication.pages.display() {
        line.push_str(&format!(", {pages}"));
    }
    line
}
