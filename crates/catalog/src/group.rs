use serde::{Deserialize, Serialize};

use crate::launchlog::LaunchRecord;

/// How a group's raw display names are reduced to a launch-log join key.
///
/// Each satellite family formats its catalog names differently, so the
/// matching rule is part of the group's configuration rather than a chain of
/// branches in the parser.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum NameRule {
    /// `STARLINK-1008` -> `STARLINK 1008`, matched against the log's
    /// satellite name column.
    DashedPair,
    /// `BEIDOU-2 M4 (C12)` -> `BEIDOU-2 M4`, matched against the log's
    /// payload name column.
    PayloadPair,
}

impl NameRule {
    /// Reduce a raw display-name line to its canonical join key.
    pub fn normalize(&self, raw: &str) -> String {
        match self {
            NameRule::DashedPair => {
                let spaced = raw.trim().replace('-', " ");
                spaced
                    .split_whitespace()
                    .take(2)
                    .collect::<Vec<_>>()
                    .join(" ")
            }
            NameRule::PayloadPair => raw
                .trim()
                .split_whitespace()
                .take(2)
                .collect::<Vec<_>>()
                .join(" "),
        }
    }

    /// The launch-log column this rule's key is compared against.
    pub fn join_value<'a>(&self, record: &'a LaunchRecord) -> &'a str {
        match self {
            NameRule::DashedPair => &record.name,
            NameRule::PayloadPair => &record.payload_name,
        }
    }
}

/// Static configuration for one satellite family.
///
/// Created once at startup; `selected` is the only field mutated afterwards
/// (user toggles the group on and off).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupConfig {
    pub id: String,
    pub name: String,
    /// Display color as an `#rrggbb` string, consumed by the renderer.
    pub display_color: String,
    pub cache_key: String,
    pub url: String,
    pub rule: NameRule,
    pub selected: bool,
}

impl GroupConfig {
    pub fn starlink(url: impl Into<String>) -> Self {
        Self {
            id: "starlink".to_string(),
            name: "Starlink".to_string(),
            display_color: "#ff4500".to_string(),
            cache_key: "starlink_tle_cache".to_string(),
            url: url.into(),
            rule: NameRule::DashedPair,
            selected: true,
        }
    }

    pub fn beidou(url: impl Into<String>) -> Self {
        Self {
            id: "beidou".to_string(),
            name: "BEIDOU".to_string(),
            display_color: "#9acd32".to_string(),
            cache_key: "beidou_tle_cache".to_string(),
            url: url.into(),
            rule: NameRule::PayloadPair,
            selected: true,
        }
    }
}
