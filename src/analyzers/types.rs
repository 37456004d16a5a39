//! Data types used by the aggregation pipeline.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fmt;

/// Lower edge, internal boundaries and upper edge of the differential axis.
pub const BUCKET_EDGES: [f64; 7] = [-50.0, -20.0, -10.0, 0.0, 10.0, 20.0, 50.0];

/// Game difficulty derived from the final point differential.
///
/// Variants are declared in axis order, so the derived `Ord` is the order
/// buckets appear on a chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum Bucket {
    #[serde(rename = "Big Loss")]
    BigLoss,
    #[serde(rename = "Loss")]
    Loss,
    #[serde(rename = "Close Loss")]
    CloseLoss,
    #[serde(rename = "Close Win")]
    CloseWin,
    #[serde(rename = "Win")]
    Win,
    #[serde(rename = "Big Win")]
    BigWin,
}

impl Bucket {
    pub const ALL: [Bucket; 6] = [
        Bucket::BigLoss,
        Bucket::Loss,
        Bucket::CloseLoss,
        Bucket::CloseWin,
        Bucket::Win,
        Bucket::BigWin,
    ];

    /// Assigns a differential to its right-closed interval.
    ///
    /// | Interval    | Bucket     |
    /// |-------------|------------|
    /// | (-50, -20]  | Big Loss   |
    /// | (-20, -10]  | Loss       |
    /// | (-10, 0]    | Close Loss |
    /// | (0, 10]     | Close Win  |
    /// | (10, 20]    | Win        |
    /// | (20, 50]    | Big Win    |
    ///
    /// Anything outside (-50, 50] (and NaN) has no bucket; the lowest edge
    /// is open like every other left edge.
    pub fn from_differential(diff: f64) -> Option<Bucket> {
        let (lo, hi) = (BUCKET_EDGES[0], BUCKET_EDGES[BUCKET_EDGES.len() - 1]);
        if !(diff > lo && diff <= hi) {
            return None;
        }

        BUCKET_EDGES[1..]
            .iter()
            .position(|&upper| diff <= upper)
            .map(|i| Bucket::ALL[i])
    }

    pub fn label(self) -> &'static str {
        match self {
            Bucket::BigLoss => "Big Loss",
            Bucket::Loss => "Loss",
            Bucket::CloseLoss => "Close Loss",
            Bucket::CloseWin => "Close Win",
            Bucket::Win => "Win",
            Bucket::BigWin => "Big Win",
        }
    }
}

impl fmt::Display for Bucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Final result of a game, decided once when the table is read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum GameOutcome {
    Win,
    Loss,
}

impl GameOutcome {
    /// Parses the spellings game logs use for a result flag.
    pub fn parse(raw: &str) -> Option<GameOutcome> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "1" | "w" | "win" | "true" => Some(GameOutcome::Win),
            "0" | "l" | "loss" | "false" => Some(GameOutcome::Loss),
            _ => None,
        }
    }
}

/// One game from the source table. Missing cells are `None`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GameRecord {
    pub differential: Option<f64>,
    pub shooting_pct: Option<f64>,
    pub outcome: Option<GameOutcome>,
}

impl GameRecord {
    pub fn new(differential: f64, shooting_pct: f64) -> Self {
        Self {
            differential: Some(differential),
            shooting_pct: Some(shooting_pct),
            outcome: None,
        }
    }

    pub fn bucket(&self) -> Option<Bucket> {
        self.differential.and_then(Bucket::from_differential)
    }

    /// Recorded outcome, falling back to the sign of the differential.
    pub fn outcome(&self) -> Option<GameOutcome> {
        self.outcome.or_else(|| match self.differential {
            Some(d) if d > 0.0 => Some(GameOutcome::Win),
            Some(d) if d < 0.0 => Some(GameOutcome::Loss),
            _ => None,
        })
    }
}

/// Mean shooting percentage for one observed bucket.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryRow {
    pub bucket: Bucket,
    pub mean_shooting_pct: f64,
    pub games: usize,
}

/// Pipeline output plus the bookkeeping shown alongside the chart.
#[derive(Debug, Serialize)]
pub struct SummaryReport {
    pub generated_at: DateTime<Utc>,
    pub source: String,
    pub total_records: usize,
    pub dropped_records: usize,
    pub wins: usize,
    pub losses: usize,
    pub rows: Vec<SummaryRow>,
}
