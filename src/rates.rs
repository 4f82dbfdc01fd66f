//! Silver-rate aggregation and second-lowest selection.

use std::collections::HashMap;

use anyhow::{Context, Result};
use tracing::debug;

use crate::tables::{PlanRow, RateAreaId};

/// Metal level that participates in SLCSP. Matching is exact; the source
/// data uses this capitalization throughout.
const SILVER: &str = "Silver";

/// Groups silver-plan rates by rate area, keeping rates as the raw decimal
/// strings from the plans table. Non-silver rows are dropped.
pub fn silver_rates_by_area(plans: &[PlanRow]) -> HashMap<RateAreaId, Vec<String>> {
    let mut by_area: HashMap<RateAreaId, Vec<String>> = HashMap::new();

    for plan in plans {
        if plan.metal_level == SILVER {
            by_area
                .entry(plan.rate_area_id())
                .or_default()
                .push(plan.rate.clone());
        }
    }

    debug!(
        rate_areas = by_area.len(),
        plans = plans.len(),
        "Silver rates grouped by rate area"
    );

    by_area
}

/// Picks the second-lowest distinct rate from a rate area's silver rates.
///
/// Rates are deduplicated on the raw string as written, then ordered by
/// numeric value. Returns `None` when fewer than two distinct rates exist.
///
/// # Errors
///
/// Returns an error if a rate is not a parseable decimal.
pub fn second_lowest(rates: &[String]) -> Result<Option<String>> {
    let mut distinct: Vec<(f64, &str)> = Vec::with_capacity(rates.len());

    for rate in rates {
        if distinct.iter().any(|(_, seen)| *seen == rate.as_str()) {
            continue;
        }
        let value: f64 = rate
            .parse()
            .with_context(|| format!("invalid plan rate {rate:?}"))?;
        distinct.push((value, rate));
    }

    distinct.sort_by(|(a, _), (b, _)| a.total_cmp(b));

    Ok(distinct.get(1).map(|(_, rate)| (*rate).to_string()))
}
