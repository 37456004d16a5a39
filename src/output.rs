//! Output formatting and persistence for shooting summaries.
//!
//! Supports pretty-printing, a plain text table, JSON files and CSV files.

use anyhow::Result;
use serde::Serialize;
use tracing::{debug, info};

use crate::analyzers::types::{SummaryReport, SummaryRow};
use csv::WriterBuilder;
use std::fs::File;

/// Logs a report using Rust's debug pretty-print format.
pub fn print_pretty(report: &SummaryReport) {
    debug!("{:#?}", report);
}

/// Logs a report as pretty-printed JSON.
pub fn print_json(report: &SummaryReport) -> Result<()> {
    info!("{}", serde_json::to_string_pretty(report)?);
    Ok(())
}

/// Formats summary rows as an aligned two-column text table.
pub fn print_table(rows: &[SummaryRow]) -> String {
    let mut out = format!("{:<12} {:>6} {:>8}\n", "Difficulty", "Games", "Avg FG%");
    for row in rows {
        out.push_str(&format!(
            "{:<12} {:>6} {:>7.1}%\n",
            row.bucket.label(),
            row.games,
            row.mean_shooting_pct * 100.0
        ));
    }
    out
}

/// Writes summary rows to a CSV file, replacing any existing content.
pub fn write_records(path: &str, rows: &[SummaryRow]) -> Result<()> {
    debug!(path, rows = rows.len(), "Writing CSV summary");

    let file = File::create(path)?;
    let mut writer = WriterBuilder::new().has_headers(true).from_writer(file);

    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush()?;

    Ok(())
}

/// Serializes a value as pretty JSON into `path`.
pub fn write_json(path: &str, value: &impl Serialize) -> Result<()> {
    debug!(path, "Writing JSON summary");
    let body = serde_json::to_vec_pretty(value)?;
    std::fs::write(path, body)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzers::types::Bucket;
    use chrono::Utc;
    use std::env;
    use std::fs;

    fn temp_path(name: &str) -> String {
        format!("{}/{}", env::temp_dir().display(), name)
    }

    fn sample_rows() -> Vec<SummaryRow> {
        vec![
            SummaryRow {
                bucket: Bucket::Loss,
                mean_shooting_pct: 0.4,
                games: 1,
            },
            SummaryRow {
                bucket: Bucket::CloseWin,
                mean_shooting_pct: 0.55,
                games: 2,
            },
        ]
    }

    fn sample_report() -> SummaryReport {
        SummaryReport {
            generated_at: Utc::now(),
            source: "fixture".to_string(),
            total_records: 3,
            dropped_records: 0,
            wins: 2,
            losses: 1,
            rows: sample_rows(),
        }
    }

    #[test]
    fn test_print_pretty_does_not_panic() {
        print_pretty(&sample_report());
    }

    #[test]
    fn test_print_json_does_not_panic() {
        print_json(&sample_report()).unwrap();
    }

    #[test]
    fn test_print_table() {
        let table = print_table(&sample_rows());
        let lines: Vec<_> = table.lines().collect();

        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("Difficulty"));
        assert!(lines[1].starts_with("Loss"));
        assert!(lines[1].ends_with("40.0%"));
        assert!(lines[2].starts_with("Close Win"));
        assert!(lines[2].ends_with("55.0%"));
    }

    #[test]
    fn test_write_records_uses_labels() {
        let path = temp_path("shooting_splits_test_rows.csv");
        let _ = fs::remove_file(&path);

        write_records(&path, &sample_rows()).unwrap();
        // Writing twice replaces rather than appends
        write_records(&path, &sample_rows()).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        let lines: Vec<_> = content.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], "bucket,mean_shooting_pct,games");
        assert_eq!(lines[1], "Loss,0.4,1");
        assert_eq!(lines[2], "Close Win,0.55,2");

        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_write_json() {
        let path = temp_path("shooting_splits_test_report.json");
        let _ = fs::remove_file(&path);

        write_json(&path, &sample_report()).unwrap();

        let value: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(value["rows"][1]["bucket"], "Close Win");
        assert_eq!(value["wins"], 2);

        fs::remove_file(&path).unwrap();
    }
}
