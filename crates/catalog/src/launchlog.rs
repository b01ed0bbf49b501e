use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::group::NameRule;

/// Columns a launch-log row must carry to be usable; rows missing any of
/// these are dropped during parsing.
const REQUIRED_COLUMNS: [&str; 9] = [
    "#Launch_Tag",
    "Launch_Date",
    "Piece",
    "Name",
    "PLName",
    "SatOwner",
    "SatState",
    "Launch_Site",
    "LVState",
];

/// One row of the historical launch log.
///
/// These records are the provenance join target for parsed orbital objects;
/// a single launch may correspond to several objects or to none at all.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LaunchRecord {
    pub launch_tag: String,
    pub launch_date: DateTime<Utc>,
    pub piece: String,
    pub name: String,
    pub payload_name: String,
    pub owner: String,
    pub state: String,
    pub site: String,
    pub vehicle_state: String,
}

/// Parse the log's textual date format, `YYYY Mon DD HHMM`.
///
/// The source data is hand-curated: dates may carry `?` markers for
/// uncertain digits, trailing seconds, or no time-of-day at all (midnight
/// is assumed). Anything still unparseable after normalization is `None`.
pub fn parse_launch_date(raw: &str) -> Option<DateTime<Utc>> {
    let mut cleaned: String = raw.chars().filter(|c| *c != '?').take(16).collect();
    if cleaned.len() < 12 {
        cleaned.push_str(" 0000");
    }
    NaiveDateTime::parse_from_str(cleaned.trim(), "%Y %b %d %H%M")
        .ok()
        .map(|dt| dt.and_utc())
}

/// Parse the tab-separated launch log into records.
///
/// Rows are dropped, never partially kept: comment rows (tag starting with
/// `#`), rows with an unparseable date, and rows with any required column
/// empty all vanish with a warning.
pub fn parse_launch_log(text: &str) -> Vec<LaunchRecord> {
    let mut lines = text.lines();
    let Some(header) = lines.next() else {
        return Vec::new();
    };

    let columns: Vec<&str> = header.split('\t').map(str::trim).collect();
    let Some(idx) = column_indices(&columns) else {
        tracing::warn!("launch log header is missing required columns");
        return Vec::new();
    };

    let mut records = Vec::new();
    for line in lines {
        let fields: Vec<&str> = line.split('\t').map(str::trim).collect();
        let Some(raw) = idx.extract(&fields) else {
            continue;
        };
        if raw.iter().any(|v| v.is_empty()) {
            continue;
        }
        // Tag rows starting with '#' are comments interleaved with data.
        if raw[0].starts_with('#') {
            continue;
        }
        let Some(launch_date) = parse_launch_date(raw[1]) else {
            tracing::warn!(date = raw[1], "skipping launch-log row with bad date");
            continue;
        };
        records.push(LaunchRecord {
            launch_tag: raw[0].to_string(),
            launch_date,
            piece: raw[2].to_string(),
            name: raw[3].to_string(),
            payload_name: raw[4].to_string(),
            owner: raw[5].to_string(),
            state: raw[6].to_string(),
            site: raw[7].to_string(),
            vehicle_state: raw[8].to_string(),
        });
    }
    records
}

/// Find the launch record whose rule-selected column equals `key`,
/// case-insensitively. Linear scan; the log is a few tens of thousands of
/// rows and lookups happen once per parsed object at load time.
pub fn find_provenance<'a>(
    records: &'a [LaunchRecord],
    rule: NameRule,
    key: &str,
) -> Option<&'a LaunchRecord> {
    records
        .iter()
        .find(|r| rule.join_value(r).eq_ignore_ascii_case(key))
}

struct ColumnIndices([usize; REQUIRED_COLUMNS.len()]);

impl ColumnIndices {
    fn extract<'a>(&self, fields: &[&'a str]) -> Option<[&'a str; REQUIRED_COLUMNS.len()]> {
        let mut out = [""; REQUIRED_COLUMNS.len()];
        for (slot, &col) in out.iter_mut().zip(self.0.iter()) {
            *slot = *fields.get(col)?;
        }
        Some(out)
    }
}

fn column_indices(columns: &[&str]) -> Option<ColumnIndices> {
    let mut idx = [0usize; REQUIRED_COLUMNS.len()];
    for (slot, name) in idx.iter_mut().zip(REQUIRED_COLUMNS.iter()) {
        *slot = columns.iter().position(|c| c == name)?;
    }
    Some(ColumnIndices(idx))
}
