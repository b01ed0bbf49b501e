use std::collections::BTreeMap;

use catalog::LaunchRecord;
use chrono::{DateTime, Datelike, Duration, Utc};

/// Trailing window the launch charts aggregate over.
pub const TRAILING_WINDOW_DAYS: i64 = 365;

/// Which launch-log column a count is grouped by.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum CountBy {
    State,
    Owner,
    Site,
}

/// A grouped count, ordered for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyCount {
    pub key: String,
    pub count: usize,
}

/// Records whose launch date falls within the trailing window ending at
/// `end` (inclusive on both bounds).
pub fn records_in_window<'a>(
    records: &'a [LaunchRecord],
    end: DateTime<Utc>,
) -> impl Iterator<Item = &'a LaunchRecord> {
    let start = end - Duration::days(TRAILING_WINDOW_DAYS);
    records
        .iter()
        .filter(move |r| r.launch_date >= start && r.launch_date <= end)
}

/// Top `limit` grouped counts over the trailing window ending at `end`.
///
/// Sorted by descending count, then by key so equal counts have a stable
/// order across evaluations of the same window.
pub fn top_counts(
    records: &[LaunchRecord],
    by: CountBy,
    end: DateTime<Utc>,
    limit: usize,
) -> Vec<KeyCount> {
    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    for record in records_in_window(records, end) {
        let key = match by {
            CountBy::State => record.state.as_str(),
            CountBy::Owner => record.owner.as_str(),
            CountBy::Site => record.site.as_str(),
        };
        *counts.entry(key).or_insert(0) += 1;
    }

    let mut out: Vec<KeyCount> = counts
        .into_iter()
        .map(|(key, count)| KeyCount {
            key: key.to_string(),
            count,
        })
        .collect();
    out.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.key.cmp(&b.key)));
    out.truncate(limit);
    out
}

/// Launches per calendar year over the whole log, ascending by year.
pub fn yearly_counts(records: &[LaunchRecord]) -> Vec<(i32, usize)> {
    let mut counts: BTreeMap<i32, usize> = BTreeMap::new();
    for record in records {
        *counts.entry(record.launch_date.year()).or_insert(0) += 1;
    }
    counts.into_iter().collect()
}
