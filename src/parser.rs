//! CSV parser for per-game statistics tables.

use csv::{ReaderBuilder, StringRecord, Trim};
use tracing::{debug, warn};

use crate::analyzers::types::{GameOutcome, GameRecord};
use crate::error::DataFormatError;

/// Source column holding the final point differential.
pub const DIFF_COLUMN: &str = "Diff";
/// Source column holding field-goal percentage.
pub const FG_PCT_COLUMN: &str = "FG_PCT";
/// Optional source column holding the game result flag.
pub const WIN_COLUMN: &str = "Win";

/// A header row plus raw string cells, as read from the source.
#[derive(Debug, Clone, Default)]
pub struct GameTable {
    headers: StringRecord,
    rows: Vec<StringRecord>,
}

/// Decodes a CSV table with a header row from raw bytes.
///
/// # Errors
///
/// Returns [`DataFormatError::Csv`] if the bytes are not readable CSV.
pub fn parse_table(bytes: &[u8]) -> Result<GameTable, DataFormatError> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(bytes);

    let headers = rdr.headers()?.clone();
    let rows = rdr.records().collect::<Result<Vec<_>, _>>()?;

    debug!(columns = headers.len(), rows = rows.len(), "Table parsed");
    Ok(GameTable { headers, rows })
}

impl GameTable {
    fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }

    /// Reads a column as numbers.
    ///
    /// Empty cells, short rows and non-finite values are missing. Any other text
    /// that does not parse is an error rather than being coerced.
    pub fn numeric_column(&self, name: &str) -> Result<Vec<Option<f64>>, DataFormatError> {
        let idx = self
            .column_index(name)
            .ok_or_else(|| DataFormatError::MissingColumn(name.to_string()))?;

        self.rows
            .iter()
            .enumerate()
            .map(|(row, record)| match record.get(idx).unwrap_or("") {
                "" => Ok(None),
                cell => cell
                    .parse::<f64>()
                    .map(|v| v.is_finite().then_some(v))
                    .map_err(|_| DataFormatError::NonNumeric {
                        column: name.to_string(),
                        row: row + 1,
                        value: cell.to_string(),
                    }),
            })
            .collect()
    }

    /// Reads an optional result column. Absent column yields all `None`.
    ///
    /// The result flag is a passenger: an unrecognized spelling is logged and
    /// treated as missing instead of failing the whole table.
    fn outcome_column(&self, name: &str) -> Vec<Option<GameOutcome>> {
        let Some(idx) = self.column_index(name) else {
            return vec![None; self.rows.len()];
        };

        self.rows
            .iter()
            .enumerate()
            .map(|(row, record)| match record.get(idx).unwrap_or("") {
                "" => None,
                cell => {
                    let outcome = GameOutcome::parse(cell);
                    if outcome.is_none() {
                        warn!(
                            column = name,
                            row = row + 1,
                            value = cell,
                            "Unrecognized game result"
                        );
                    }
                    outcome
                }
            })
            .collect()
    }

    /// Builds typed records from the `Diff`, `FG_PCT` and optional `Win`
    /// columns. Only the two required columns can fail, and both are
    /// validated before any record is produced.
    pub fn records(&self) -> Result<Vec<GameRecord>, DataFormatError> {
        let diffs = self.numeric_column(DIFF_COLUMN)?;
        let pcts = self.numeric_column(FG_PCT_COLUMN)?;
        let outcomes = self.outcome_column(WIN_COLUMN);

        Ok(diffs
            .into_iter()
            .zip(pcts)
            .zip(outcomes)
            .map(|((differential, shooting_pct), outcome)| GameRecord {
                differential,
                shooting_pct,
                outcome,
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_header_only() {
        let table = parse_table(b"Date,Diff,FG_PCT\n").unwrap();
        assert!(table.records().unwrap().is_empty());
    }

    #[test]
    fn test_numeric_column_reads_ints_and_floats() {
        let table = parse_table(b"Diff,FG_PCT\n5,0.5\n-25.0,.4\n").unwrap();
        let diffs = table.numeric_column("Diff").unwrap();
        assert_eq!(diffs, vec![Some(5.0), Some(-25.0)]);
        let pcts = table.numeric_column("FG_PCT").unwrap();
        assert_eq!(pcts, vec![Some(0.5), Some(0.4)]);
    }

    #[test]
    fn test_empty_and_nan_cells_are_missing() {
        let table = parse_table(b"Diff,FG_PCT\n3,\n4,NaN\n5\n").unwrap();
        let pcts = table.numeric_column("FG_PCT").unwrap();
        assert_eq!(pcts, vec![None, None, None]);
    }

    #[test]
    fn test_missing_column() {
        let table = parse_table(b"Diff,PTS\n5,30\n").unwrap();
        let err = table.records().unwrap_err();
        assert!(matches!(err, DataFormatError::MissingColumn(ref c) if c == "FG_PCT"));
    }

    #[test]
    fn test_non_numeric_cell() {
        let table = parse_table(b"Diff,FG_PCT\n5,0.5\nW,0.4\n").unwrap();
        match table.numeric_column("Diff").unwrap_err() {
            DataFormatError::NonNumeric { column, row, value } => {
                assert_eq!(column, "Diff");
                assert_eq!(row, 2);
                assert_eq!(value, "W");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_outcome_column() {
        let table = parse_table(b"Diff,FG_PCT,Win\n5,0.5,1\n-3,0.4,0\n2,0.3,\n").unwrap();
        let records = table.records().unwrap();
        assert_eq!(records[0].outcome, Some(GameOutcome::Win));
        assert_eq!(records[1].outcome, Some(GameOutcome::Loss));
        assert_eq!(records[2].outcome, None);
    }

    #[test]
    fn test_unrecognized_outcome_is_missing() {
        let table = parse_table(b"Diff,FG_PCT,Win\n5,0.5,1.0\n-25,0.4,T\n3,0.3,W\n").unwrap();
        let records = table.records().unwrap();

        assert_eq!(records.len(), 3);
        assert_eq!(records[0].outcome, None);
        assert_eq!(records[1].outcome, None);
        assert_eq!(records[2].outcome, Some(GameOutcome::Win));
        assert_eq!(records[1].differential, Some(-25.0));
        assert_eq!(records[1].shooting_pct, Some(0.4));
    }

    #[test]
    fn test_extra_columns_ignored() {
        let table = parse_table(b"Date,PTS,Diff,AST,FG_PCT\n1990-01-01,40,12,5,0.55\n").unwrap();
        let records = table.records().unwrap();
        assert_eq!(records, vec![GameRecord::new(12.0, 0.55)]);
    }
}
