//! Year bucketing.
//!
//! Records are grouped by their raw year string. Keys are compared as
//! strings, so `"2023"` sorts after `"2021"` but `"999"` also sorts after
//! `"2023"`; well-formed four-digit years come out in numeric order.

use std::collections::BTreeMap;

use crate::{Publication, UNKNOWN_YEAR};

/// Counts of records that did not make it into a year bucket.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SkipStats {
    /// Records handed to the grouper.
    pub total_raw: usize,
    /// No year field, or an empty one.
    pub no_year: usize,
    /// Year field was the literal `Unknown`.
    pub unknown_year: usize,
}

impl SkipStats {
    pub fn skipped(&self) -> usize {
        self.no_year + self.unknown_year
    }
}

/// Publications bucketed by year.
#[derive(Debug, Clone, Default)]
pub struct YearGroups {
    buckets: BTreeMap<String, Vec<Publication>>,
    pub skip_stats: SkipStats,
}

impl YearGroups {
    /// Year keys, newest first.
    pub fn years(&self) -> Vec<&str> {
        self.buckets.keys().rev().map(String::as_str).collect()
    }

    /// `(year, records)` pairs, newest year first. Records keep input order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[Publication])> {
        self.buckets
            .iter()
            .rev()
            .map(|(year, pubs)| (year.as_str(), pubs.as_slice()))
    }

    pub fn get(&self, year: &str) -> Option<&[Publication]> {
        self.buckets.get(year).map(Vec::as_slice)
    }

    /// Number of distinct years.
    pub fn year_count(&self) -> usize {
        self.buckets.len()
    }

    /// Number of grouped publications across all years.
    pub fn total(&self) -> usize {
        self.buckets.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }
}

/// Bucket publications by year, dropping those without a usable year.
pub fn group_by_year(publications: Vec<Publication>) -> YearGroups {
    let mut groups = YearGroups {
        skip_stats: SkipStats {
            total_raw: publications.len(),
            ..Default::default()
        },
        ..Default::default()
    };

    for publication in publications {
        let Some(year) = publication.usable_year().map(str::to_owned) else {
            if publication.year.as_deref() == Some(UNKNOWN_YEAR) {
                groups.skip_stats.unknown_year += 1;
            } else {
                groups.skip_stats.no_year += 1;
            }
            tracing::debug!(
                title = publication.title.as_deref().unwrap_or(""),
                "skipping record without a usable year"
            );
            continue;
        };
        groups.buckets.entry(year).or_default().push(publication);
    }

    tracing::debug!(
        grouped = groups.total(),
        years = groups.year_count(),
        skipped = groups.skip_stats.skipped(),
        "grouped publications by year"
    );
    groups
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_pub(title: &str, year: Option<&str>) -> Publication {
        Publication {
            title: Some(title.to_string()),
            year: year.map(str::to_string),
            ..Default::default()
        }
    }

    #[test]
    fn test_years_descending_without_duplicates() {
        let groups = group_by_year(vec![
            make_pub("a", Some("2019")),
            make_pub("b", Some("2023")),
            make_pub("c", Some("2019")),
            make_pub("d", Some("2021")),
        ]);
        assert_eq!(groups.years(), vec!["2023", "2021", "2019"]);
        assert_eq!(groups.year_count(), 3);
        assert_eq!(groups.total(), 4);
    }

    #[test]
    fn test_insertion_order_within_year() {
        let groups = group_by_year(vec![
            make_pub("first", Some("2020")),
            make_pub("other", Some("2022")),
            make_pub("second", Some("2020")),
        ]);
        let titles: Vec<_> = groups
            .get("2020")
            .unwrap()
            .iter()
            .map(|p| p.title.as_deref().unwrap())
            .collect();
        assert_eq!(titles, vec!["first", "second"]);
    }

    #[test]
    fn test_unusable_years_are_counted_and_dropped() {
        let groups = group_by_year(vec![
            make_pub("no year", None),
            make_pub("empty", Some("")),
            make_pub("unknown", Some("Unknown")),
            make_pub("kept", Some("2018")),
        ]);
        assert_eq!(groups.years(), vec!["2018"]);
        assert_eq!(groups.skip_stats.total_raw, 4);
        assert_eq!(groups.skip_stats.no_year, 2);
        assert_eq!(groups.skip_stats.unknown_year, 1);
        assert_eq!(groups.skip_stats.skipped(), 3);
    }

    #[test]
    fn test_string_ordering_not_numeric() {
        let groups = group_by_year(vec![
            make_pub("a", Some("999")),
            make_pub("b", Some("2023")),
            make_pub("c", Some("2023/05/01/")),
        ]);
        assert_eq!(groups.years(), vec!["999", "2023/05/01/", "2023"]);
    }

    #[test]
    fn test_iter_matches_years() {
        let groups = group_by_year(vec![
            make_pub("a", Some("2001")),
            make_pub("b", Some("2002")),
            make_pub("c", Some("2002")),
        ]);
        let collected: Vec<_> = groups.iter().map(|(y, p)| (y, p.len())).collect();
        assert_eq!(collected, vec![("2002", 2), ("2001", 1)]);
    }

    #[test]
    fn test_empty_input() {
        let groups = group_by_year(Vec::new());
        assert!(groups.is_empty());
        assert_eq!(groups.total(), 0);
        assert!(groups.years().is_empty());
    }
}
