use std::collections::BTreeSet;

use crate::group::GroupConfig;
use crate::launchlog::{find_provenance, LaunchRecord};
use crate::record::{classify_orbit, ObjectRecord};

/// Outcome of parsing one group's element text.
///
/// Parsing is per-record and non-fatal: malformed windows and duplicate
/// catalog numbers are counted and skipped, unresolved provenance joins are
/// counted and kept.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct ParsedGroup {
    pub records: Vec<ObjectRecord>,
    pub skipped: usize,
    pub unresolved: usize,
}

/// Parse a raw element feed into canonical records.
///
/// The feed is a repeating 3-line pattern: display name, element line 1,
/// element line 2. Each line pair is validated by constructing the
/// propagation model for it, so a record that survives parsing is known to
/// be propagatable later.
pub fn parse_group(
    text: &str,
    group: &GroupConfig,
    launch_log: &[LaunchRecord],
) -> ParsedGroup {
    let cleaned = text.replace('\r', "");
    let lines: Vec<&str> = cleaned.split('\n').collect();

    let mut out = ParsedGroup::default();
    let mut seen_ids = BTreeSet::new();

    let mut idx = 0;
    while idx + 2 < lines.len() {
        let name = lines[idx].trim();
        let line1 = lines[idx + 1].trim();
        let line2 = lines[idx + 2].trim();
        idx += 3;

        if line1.is_empty() || line2.is_empty() {
            tracing::warn!(group = %group.id, name, "incomplete element window, skipping");
            out.skipped += 1;
            continue;
        }

        let elements = match sgp4::Elements::from_tle(
            Some(name.to_string()),
            line1.as_bytes(),
            line2.as_bytes(),
        ) {
            Ok(elements) => elements,
            Err(e) => {
                tracing::warn!(group = %group.id, name, error = %e, "bad element lines, skipping");
                out.skipped += 1;
                continue;
            }
        };

        // A record must be propagatable, not just lexically well-formed.
        if let Err(e) = sgp4::Constants::from_elements(&elements) {
            tracing::warn!(group = %group.id, name, error = %e, "unpropagatable elements, skipping");
            out.skipped += 1;
            continue;
        }

        if !seen_ids.insert(elements.norad_id) {
            tracing::warn!(group = %group.id, name, norad_id = elements.norad_id, "duplicate catalog number, skipping");
            out.skipped += 1;
            continue;
        }

        let key = group.rule.normalize(name);
        let provenance = find_provenance(launch_log, group.rule, &key);
        if provenance.is_none() {
            tracing::debug!(group = %group.id, name, key, "no launch-log match, provenance unresolved");
            out.unresolved += 1;
        }

        out.records.push(ObjectRecord {
            id: elements.norad_id,
            display_name: name.to_string(),
            line1: line1.to_string(),
            line2: line2.to_string(),
            launch_date: provenance.map(|r| r.launch_date),
            launch_state: provenance.map(|r| r.state.clone()),
            orbit_class: classify_orbit(elements.mean_motion, elements.inclination),
            group_id: group.id.clone(),
        });
    }

    tracing::info!(
        group = %group.id,
        records = out.records.len(),
        skipped = out.skipped,
        unresolved = out.unresolved,
        "parsed element feed"
    );
    out
}
