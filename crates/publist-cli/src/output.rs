use std::io::Write;

use owo_colors::OwoColorize;
use publist_core::YearGroups;
use publist_reporting::ExportSummary;

/// Whether to use colored output.
#[derive(Debug, Clone, Copy)]
pub struct ColorMode(pub bool);

impl ColorMode {
    pub fn enabled(&self) -> bool {
        self.0
    }
}

/// Print the summary lines for a finished run.
pub fn print_summary(
    w: &mut dyn Write,
    summary: &ExportSummary,
    color: ColorMode,
) -> std::io::Result<()> {
    for line in summary.lines() {
        if color.enabled() {
            writeln!(w, "{}", line.green())?;
        } else {
            writeln!(w, "{}", line)?;
        }
    }
    Ok(())
}

/// Print what a dry run found: one line per year, then what was left out.
pub fn print_dry_run(
    w: &mut dyn Write,
    summary: &ExportSummary,
    groups: &YearGroups,
    color: ColorMode,
) -> std::io::Result<()> {
    for (year, pubs) in groups.iter() {
        writeln!(w, "  {}: {}", year, pubs.len())?;
    }

    let stats = &groups.skip_stats;
    if summary.skipped > 0 {
        let note = format!(
            "(Skipped {} records: {} without a year, {} marked Unknown)",
            summary.skipped, stats.no_year, stats.unknown_year
        );
        if color.enabled() {
            writeln!(w, "{}", note.dimmed())?;
        } else {
            writeln!(w, "{}", note)?;
        }
    }

    print_summary(w, summary, color)?;

    let note = format!("Dry run: {} not written", summary.output.display());
    if color.enabled() {
        writeln!(w, "{}", note.yellow())?;
    } else {
        writeln!(w, "{}", note)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    use publist_core::{Publication, SourceFormat, group_by_year};

    fn make_pub(year: Option<&str>) -> Publication {
        Publication {
            title: Some("t".into()),
            year: year.map(str::to_string),
            ..Default::default()
        }
    }

    fn summary_for(groups: &YearGroups, format: SourceFormat) -> ExportSummary {
        publist_reporting::summarize(groups, format, &PathBuf::from("out.html"))
    }

    #[test]
    fn test_print_summary_plain() {
        let groups = group_by_year(vec![make_pub(Some("2020")), make_pub(Some("2021"))]);
        let mut buf = Vec::new();
        print_summary(&mut buf, &summary_for(&groups, SourceFormat::Csv), ColorMode(false))
            .unwrap();
        assert_eq!(
            String::from_utf8(buf).unwrap(),
            "Generated HTML for 2 publications across 2 years\nOutput written to out.html\n"
        );
    }

    #[test]
    fn test_print_dry_run() {
        let groups = group_by_year(vec![
            make_pub(Some("2020")),
            make_pub(Some("2022")),
            make_pub(Some("2020")),
            make_pub(None),
            make_pub(Some("Unknown")),
        ]);
        let mut buf = Vec::new();
        print_dry_run(
            &mut buf,
            &summary_for(&groups, SourceFormat::Ris),
            &groups,
            ColorMode(false),
        )
        .unwrap();
        let out = String::from_utf8(buf).unwrap();
        assert_eq!(
            out,
            "  2022: 1\n  2020: 2\n\
             (Skipped 2 records: 1 without a year, 1 marked Unknown)\n\
             Generated 3 publications across 2 years with full author information\n\
             Dry run: out.html not written\n"
        );
    }
}
