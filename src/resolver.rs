//! ZIP → rate-area resolution.
//!
//! A zipcode can span multiple counties and land in multiple rate areas. Such
//! a zipcode cannot be priced, so any zipcode that appears more than once in
//! the reference table is treated as ambiguous.

use std::collections::HashMap;
use std::collections::hash_map::Entry;

use tracing::debug;

use crate::tables::{RateAreaId, TargetRow, ZipRow};

/// Outcome of collapsing a zipcode's reference rows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// The zipcode appeared exactly once; it belongs to this rate area.
    Unique(RateAreaId),
    /// The zipcode appeared more than once. Ambiguity is permanent: a repeat
    /// marks the zipcode even when it names the same rate area again, and no
    /// later row can restore it.
    Ambiguous,
}

/// Collapses the ZIP reference table into a zipcode → [`Resolution`] map.
pub fn map_zips_to_rate_areas(rows: &[ZipRow]) -> HashMap<String, Resolution> {
    let mut map: HashMap<String, Resolution> = HashMap::with_capacity(rows.len());

    for row in rows {
        match map.entry(row.zipcode.clone()) {
            Entry::Vacant(e) => {
                e.insert(Resolution::Unique(row.rate_area_id()));
            }
            Entry::Occupied(mut e) => {
                e.insert(Resolution::Ambiguous);
            }
        }
    }

    let ambiguous = map
        .values()
        .filter(|r| **r == Resolution::Ambiguous)
        .count();
    debug!(
        zipcodes = map.len(),
        ambiguous, "ZIP table collapsed to rate-area map"
    );

    map
}

/// A target zipcode paired with its rate area, if one could be determined.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedTarget {
    pub zipcode: String,
    pub rate_area: Option<RateAreaId>,
}

/// Looks up each target zipcode in the rate-area map, preserving the input
/// order and any duplicates. Unknown and ambiguous zipcodes carry no rate
/// area and will produce an empty rate downstream.
pub fn resolve_targets(
    targets: &[TargetRow],
    map: &HashMap<String, Resolution>,
) -> Vec<ResolvedTarget> {
    targets
        .iter()
        .map(|t| {
            let rate_area = match map.get(&t.zipcode) {
                Some(Resolution::Unique(area)) => Some(area.clone()),
                Some(Resolution::Ambiguous) | None => None,
            };
            ResolvedTarget {
                zipcode: t.zipcode.clone(),
                rate_area,
            }
        })
        .collect()
}
