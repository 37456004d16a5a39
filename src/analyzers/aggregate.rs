use crate::analyzers::types::{Bucket, GameOutcome, GameRecord, SummaryReport, SummaryRow};
use crate::analyzers::utility::mean;
use crate::error::DataFormatError;
use crate::parser::GameTable;
use chrono::Utc;
use std::collections::BTreeMap;
use tracing::debug;

/// Groups games by difficulty bucket and averages shooting percentage.
///
/// Only observed buckets are emitted, in axis order. Games without a bucket
/// or without a shooting percentage do not contribute to any mean.
pub fn summarize(records: &[GameRecord]) -> Vec<SummaryRow> {
    let mut series: BTreeMap<Bucket, Vec<f64>> = BTreeMap::new();

    for record in records {
        let (Some(bucket), Some(pct)) = (record.bucket(), record.shooting_pct) else {
            continue;
        };
        series.entry(bucket).or_default().push(pct);
    }

    series
        .into_iter()
        .map(|(bucket, pcts)| SummaryRow {
            bucket,
            mean_shooting_pct: mean(&pcts),
            games: pcts.len(),
        })
        .collect()
}

/// Runs the full pipeline on a table: column extraction, bucketing and
/// per-bucket mean of `FG_PCT`.
///
/// # Errors
///
/// Returns a [`DataFormatError`] if `Diff` or `FG_PCT` is missing or holds
/// non-numeric text. No rows are produced in that case.
pub fn fg_pct_by_difficulty(table: &GameTable) -> Result<Vec<SummaryRow>, DataFormatError> {
    Ok(summarize(&table.records()?))
}

/// Runs the pipeline and collects the counts displayed next to the chart.
pub fn build_report(source: &str, table: &GameTable) -> Result<SummaryReport, DataFormatError> {
    let records = table.records()?;
    let rows = summarize(&records);

    let dropped_records = records.iter().filter(|r| r.bucket().is_none()).count();
    if dropped_records > 0 {
        debug!(dropped_records, "Games outside the differential range were skipped");
    }

    let wins = records
        .iter()
        .filter(|r| r.outcome() == Some(GameOutcome::Win))
        .count();
    let losses = records
        .iter()
        .filter(|r| r.outcome() == Some(GameOutcome::Loss))
        .count();

    Ok(SummaryReport {
        generated_at: Utc::now(),
        source: source.to_string(),
        total_records: records.len(),
        dropped_records,
        wins,
        losses,
        rows,
    })
}
