//! CSV deserialization for the three reference tables.
//!
//! All tables are comma-delimited UTF-8 with a header row. Columns beyond the
//! ones modeled here (county names in the ZIP table, plan ids, a stale `rate`
//! column in the target list) are ignored by serde.

use std::fmt;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;
use tracing::debug;

/// A `(state, rate_area)` pair, the join key between the ZIP table and the
/// plans table. The rate area code is kept as a string; it is an opaque
/// identifier, not a number we ever do arithmetic on.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RateAreaId {
    pub state: String,
    pub rate_area: String,
}

impl RateAreaId {
    pub fn new(state: impl Into<String>, rate_area: impl Into<String>) -> Self {
        RateAreaId {
            state: state.into(),
            rate_area: rate_area.into(),
        }
    }
}

impl fmt::Display for RateAreaId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.state, self.rate_area)
    }
}

/// One row of the ZIP → rate-area reference table.
#[derive(Debug, Clone, Deserialize)]
pub struct ZipRow {
    pub zipcode: String,
    pub state: String,
    pub rate_area: String,
}

impl ZipRow {
    pub fn rate_area_id(&self) -> RateAreaId {
        RateAreaId::new(self.state.clone(), self.rate_area.clone())
    }
}

/// One row of the plans table. The rate is kept as the raw decimal string
/// from the file so the output reproduces it exactly (no float round-trip).
#[derive(Debug, Clone, Deserialize)]
pub struct PlanRow {
    pub state: String,
    pub rate_area: String,
    pub metal_level: String,
    pub rate: String,
}

impl PlanRow {
    pub fn rate_area_id(&self) -> RateAreaId {
        RateAreaId::new(self.state.clone(), self.rate_area.clone())
    }
}

/// One row of the target list: a zipcode needing SLCSP resolution.
#[derive(Debug, Clone, Deserialize)]
pub struct TargetRow {
    pub zipcode: String,
}

/// Deserializes all rows of a headered CSV stream.
pub fn read_rows<T, R>(rdr: R) -> Result<Vec<T>>
where
    T: for<'de> Deserialize<'de>,
    R: Read,
{
    let mut reader = csv::Reader::from_reader(rdr);
    let mut rows = Vec::new();
    for row in reader.deserialize() {
        rows.push(row?);
    }
    Ok(rows)
}

/// Loads a headered CSV table from disk. Fails fast if the file is missing,
/// unreadable, or a row does not match the expected columns.
pub fn load_table<T>(path: &Path) -> Result<Vec<T>>
where
    T: for<'de> Deserialize<'de>,
{
    let file =
        File::open(path).with_context(|| format!("opening input table {}", path.display()))?;
    let rows: Vec<T> =
        read_rows(file).with_context(|| format!("reading rows from {}", path.display()))?;
    debug!(path = %path.display(), rows = rows.len(), "Table loaded");
    Ok(rows)
}
