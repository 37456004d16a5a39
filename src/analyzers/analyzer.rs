use crate::analyzers::aggregate::build_report;
use crate::analyzers::types::SummaryReport;
use crate::fetch::load_source;
use crate::parser::parse_table;
use anyhow::{Context, Result};
use tracing::info;

/// Loads the game table from `source` and runs the aggregation pipeline.
///
/// Data is read exactly once; the returned report is what callers keep in
/// memory for the rest of the process.
#[tracing::instrument]
pub async fn analyze(source: &str) -> Result<SummaryReport> {
    let bytes = load_source(source).await?;
    let table = parse_table(&bytes).with_context(|| format!("failed to read table from '{source}'"))?;
    let report = build_report(source, &table)
        .with_context(|| format!("'{source}' is not a usable game log"))?;

    info!(
        games = report.total_records,
        dropped = report.dropped_records,
        buckets = report.rows.len(),
        "Summary computed"
    );
    Ok(report)
}
