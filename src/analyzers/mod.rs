//! Game difficulty bucketing and shooting aggregation.
//!
//! This module assigns each game to one of six point-differential buckets,
//! reduces field-goal percentage to a per-bucket mean, and wraps the result
//! in a report for output and display.

pub mod aggregate;
pub mod analyzer;
pub mod types;
pub mod utility;
