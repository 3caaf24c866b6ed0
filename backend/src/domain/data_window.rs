//! Trailing-window selection of records.
//!
//! A window keeps every record dated on or after `reference - period`,
//! in source order. Records are never sorted, deduplicated or paginated.

use std::str::FromStr;
use std::sync::Arc;

use chrono::{Local, NaiveDate};
use serde::Deserialize;
use shared::{Period, Record, ServiceError};
use tracing::debug;

use super::RecordSource;

/// Date a window is measured back from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(try_from = "String")]
pub enum ReferencePoint {
    /// The server's local calendar date at request time
    Today,
    /// The most recent record date in the source (today if there are none)
    LatestRecord,
    /// A fixed date, mostly for demos of the 2023 seed data
    Fixed(NaiveDate),
}

impl ReferencePoint {
    pub fn resolve(&self, records: &[Record], today: NaiveDate) -> NaiveDate {
        match self {
            ReferencePoint::Today => today,
            ReferencePoint::LatestRecord => records.iter().map(|r| r.date).max().unwrap_or(today),
            ReferencePoint::Fixed(date) => *date,
        }
    }
}

impl FromStr for ReferencePoint {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "today" | "now" => Ok(ReferencePoint::Today),
            "latest" => Ok(ReferencePoint::LatestRecord),
            other => NaiveDate::parse_from_str(other, "%Y-%m-%d")
                .map(ReferencePoint::Fixed)
                .map_err(|_| {
                    format!("invalid reference date '{}', expected today, latest or YYYY-MM-DD", s)
                }),
        }
    }
}

impl TryFrom<String> for ReferencePoint {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Records from `records` that fall inside `period` measured back from `reference`
pub fn select_window(records: Vec<Record>, period: Period, reference: NaiveDate) -> Vec<Record> {
    let cutoff = period.cutoff(reference);
    records
        .into_iter()
        .filter(|r| r.is_on_or_after(cutoff))
        .collect()
}

#[derive(Clone)]
pub struct DataWindowService {
    source: Arc<dyn RecordSource>,
    reference: ReferencePoint,
}

impl DataWindowService {
    pub fn new(source: Arc<dyn RecordSource>, reference: ReferencePoint) -> Self {
        Self { source, reference }
    }

    /// Records inside the trailing window for `period`
    pub async fn get_window(&self, period: Period) -> Result<Vec<Record>, ServiceError> {
        self.get_window_at(period, Local::now().date_naive()).await
    }

    /// Same as `get_window`, with today's date supplied by the caller
    pub async fn get_window_at(
        &self,
        period: Period,
        today: NaiveDate,
    ) -> Result<Vec<Record>, ServiceError> {
        let records = self.source.load_records().await?;
        let reference = self.reference.resolve(&records, today);
        debug!(
            "Window {} from {} (cutoff {}) over {} records",
            period,
            reference,
            period.cutoff(reference),
            records.len()
        );
        Ok(select_window(records, period, reference))
    }
}
