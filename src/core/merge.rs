//! Combining live records with the seasonal table, one result per spot.

use crate::domain::model::{CatchRecord, LocationEntry, MergedLocationResult, SourcedCatch};
use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MergePolicy {
    /// Live records needed before the seasonal table is left out.
    pub min_evidence: usize,
    pub max_records: usize,
}

impl Default for MergePolicy {
    fn default() -> Self {
        Self {
            min_evidence: 3,
            max_records: 15,
        }
    }
}

/// Merge one location. Live records always lead and keep their order.
pub fn merge_location(
    location_id: &str,
    scraped: &[CatchRecord],
    seasonal: &[CatchRecord],
    policy: MergePolicy,
) -> MergedLocationResult {
    let mut records: Vec<CatchRecord> = scraped.iter().take(policy.max_records).cloned().collect();
    let live_count = records.len();

    if scraped.len() < policy.min_evidence {
        let room = policy.max_records.saturating_sub(records.len());
        records.extend(seasonal.iter().take(room).cloned());
    }

    MergedLocationResult {
        location_id: location_id.to_string(),
        records,
        live_count,
    }
}

/// One result per configured location, in configured order. Keys of either
/// map that are not configured locations are ignored.
pub fn merge(
    scraped: &HashMap<String, Vec<CatchRecord>>,
    seasonal: &HashMap<String, Vec<CatchRecord>>,
    locations: &[LocationEntry],
    policy: MergePolicy,
) -> Vec<MergedLocationResult> {
    locations
        .iter()
        .map(|location| {
            let live = scraped.get(&location.id).map(Vec::as_slice).unwrap_or(&[]);
            let fallback = seasonal.get(&location.id).map(Vec::as_slice).unwrap_or(&[]);
            merge_location(&location.id, live, fallback, policy)
        })
        .collect()
}

/// Group emitted records by location, preserving emission order.
pub fn group_by_location(
    catches: impl IntoIterator<Item = SourcedCatch>,
) -> HashMap<String, Vec<CatchRecord>> {
    let mut grouped: HashMap<String, Vec<CatchRecord>> = HashMap::new();
    for catch in catches {
        grouped.entry(catch.location_id).or_default().push(catch.record);
    }
    grouped
}
