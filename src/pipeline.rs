//! End-to-end SLCSP resolution: load the three tables, join, select.

use std::path::Path;

use anyhow::Result;
use serde::Serialize;
use tracing::info;

use crate::rates::{second_lowest, silver_rates_by_area};
use crate::resolver::{map_zips_to_rate_areas, resolve_targets};
use crate::tables::{PlanRow, TargetRow, ZipRow, load_table};

/// One output row: a target zipcode and its SLCSP rate, if one exists.
/// A `None` rate serializes as an empty CSV field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SlcspRecord {
    pub zipcode: String,
    pub rate: Option<String>,
}

/// Runs the full pipeline over the given input tables and returns one record
/// per target zipcode, in target-list order.
///
/// Fails before producing any records if an input file is missing or a row
/// is malformed; ambiguous and unknown zipcodes are not errors and come back
/// with an empty rate.
pub fn run(zips_path: &Path, plans_path: &Path, targets_path: &Path) -> Result<Vec<SlcspRecord>> {
    let zip_rows: Vec<ZipRow> = load_table(zips_path)?;
    let plan_rows: Vec<PlanRow> = load_table(plans_path)?;
    let target_rows: Vec<TargetRow> = load_table(targets_path)?;

    info!(
        zip_rows = zip_rows.len(),
        plan_rows = plan_rows.len(),
        targets = target_rows.len(),
        "Input tables loaded"
    );

    let zip_map = map_zips_to_rate_areas(&zip_rows);
    let resolved = resolve_targets(&target_rows, &zip_map);
    let silver_rates = silver_rates_by_area(&plan_rows);

    let mut records = Vec::with_capacity(resolved.len());
    let mut resolved_count = 0usize;
    let mut rated_count = 0usize;

    for target in resolved {
        let rate = match &target.rate_area {
            Some(area) => {
                resolved_count += 1;
                match silver_rates.get(area) {
                    Some(rates) => second_lowest(rates)?,
                    None => None,
                }
            }
            None => None,
        };

        if rate.is_some() {
            rated_count += 1;
        }

        records.push(SlcspRecord {
            zipcode: target.zipcode,
            rate,
        });
    }

    info!(
        targets = records.len(),
        resolved = resolved_count,
        rated = rated_count,
        "SLCSP resolution complete"
    );

    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::fs;
    use std::path::PathBuf;

    struct Tables {
        zips: PathBuf,
        plans: PathBuf,
        targets: PathBuf,
    }

    fn write_tables(name: &str, zips: &str, plans: &str, targets: &str) -> Tables {
        let dir = env::temp_dir().join(format!("slcsp_pipeline_{name}"));
        fs::create_dir_all(&dir).unwrap();

        let tables = Tables {
            zips: dir.join("zips.csv"),
            plans: dir.join("plans.csv"),
            targets: dir.join("slcsp.csv"),
        };
        fs::write(&tables.zips, zips).unwrap();
        fs::write(&tables.plans, plans).unwrap();
        fs::write(&tables.targets, targets).unwrap();
        tables
    }

    #[test]
    fn test_run_resolves_known_zipcode() {
        let t = write_tables(
            "known",
            "zipcode,state,rate_area\n36749,AL,11\n",
            "state,rate_area,metal_level,rate\n\
             AL,11,Silver,200.00\nAL,11,Silver,250.00\n",
            "zipcode,rate\n36749,\n",
        );

        let records = run(&t.zips, &t.plans, &t.targets).unwrap();

        assert_eq!(
            records,
            vec![SlcspRecord {
                zipcode: "36749".to_string(),
                rate: Some("250.00".to_string()),
            }]
        );
    }

    #[test]
    fn test_run_leaves_unknown_zipcode_unrated() {
        let t = write_tables(
            "unknown",
            "zipcode,state,rate_area\n36749,AL,11\n",
            "state,rate_area,metal_level,rate\n\
             AL,11,Silver,200.00\nAL,11,Silver,250.00\n",
            "zipcode,rate\n99999,\n",
        );

        let records = run(&t.zips, &t.plans, &t.targets).unwrap();

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].zipcode, "99999");
        assert_eq!(records[0].rate, None);
    }

    #[test]
    fn test_run_fails_on_missing_input() {
        let t = write_tables(
            "missing",
            "zipcode,state,rate_area\n",
            "state,rate_area,metal_level,rate\n",
            "zipcode\n",
        );

        let missing = t.zips.with_file_name("absent.csv");
        assert!(run(&missing, &t.plans, &t.targets).is_err());
    }
}
