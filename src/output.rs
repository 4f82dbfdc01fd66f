//! Output formatting and persistence for resolved SLCSP records.
//!
//! Supports stdout echo and CSV file output in the reference format:
//! a `zipcode, rate` header, then `zipcode,rate` rows with CRLF endings
//! and an empty rate field for zipcodes that could not be priced.

use std::fs::File;
use std::path::Path;

use anyhow::{Context, Result};
use csv::{Terminator, WriterBuilder};
use tracing::debug;

use crate::pipeline::SlcspRecord;

/// Prints the header and one row per record to stdout, in record order.
/// Logs stay on stderr, so this is the process's machine-readable output.
pub fn print_records(records: &[SlcspRecord]) {
    println!("zipcode, rate");
    for record in records {
        println!("{},{}", record.zipcode, record.rate.as_deref().unwrap_or(""));
    }
}

/// Writes the records as a CSV file at `path`, overwriting any existing file.
///
/// The whole file is produced in one pass after resolution has succeeded, so
/// a failed run never leaves partial output behind.
pub fn write_records(path: &Path, records: &[SlcspRecord]) -> Result<()> {
    let file =
        File::create(path).with_context(|| format!("creating output file {}", path.display()))?;

    let mut writer = WriterBuilder::new()
        .has_headers(false)
        .terminator(Terminator::CRLF)
        .from_writer(file);

    // The reference output header carries a space after the comma.
    writer.write_record(["zipcode", " rate"])?;
    for record in records {
        writer.serialize(record)?;
    }
    writer
        .flush()
        .with_context(|| format!("flushing output file {}", path.display()))?;

    debug!(path = %path.display(), rows = records.len(), "Output written");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::fs;
    use std::path::PathBuf;

    fn temp_path(name: &str) -> PathBuf {
        env::temp_dir().join(name)
    }

    fn record(zipcode: &str, rate: Option<&str>) -> SlcspRecord {
        SlcspRecord {
            zipcode: zipcode.to_string(),
            rate: rate.map(|r| r.to_string()),
        }
    }

    #[test]
    fn test_print_records_does_not_panic() {
        print_records(&[record("36749", Some("200.00")), record("99999", None)]);
    }

    #[test]
    fn test_write_records_reference_format() {
        let path = temp_path("slcsp_test_format.csv");
        let _ = fs::remove_file(&path); // clean up any prior run

        let records = [record("36749", Some("200.00")), record("99999", None)];
        write_records(&path, &records).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        assert_eq!(content, "zipcode, rate\r\n36749,200.00\r\n99999,\r\n");

        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_write_records_overwrites_previous_output() {
        let path = temp_path("slcsp_test_overwrite.csv");
        let _ = fs::remove_file(&path);

        write_records(&path, &[record("11111", None), record("22222", None)]).unwrap();
        write_records(&path, &[record("36749", Some("200.00"))]).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        assert_eq!(content, "zipcode, rate\r\n36749,200.00\r\n");

        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_write_records_empty_input_writes_header_only() {
        let path = temp_path("slcsp_test_empty.csv");
        let _ = fs::remove_file(&path);

        write_records(&path, &[]).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        assert_eq!(content, "zipcode, rate\r\n");

        fs::remove_file(&path).unwrap();
    }
}
