use chrono::{Days, Months, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

pub mod chart;
pub mod graph_view;

pub use chart::{LineChartModel, Rgb, SeriesModel, TooltipModel, TooltipRow};
pub use graph_view::{
    FetchTicket, GraphDisplay, GraphStatus, GraphView, Resolution, FETCH_ERROR_MESSAGE,
};

/// Id of the element the widget mounts into
pub const WIDGET_CONTAINER_ID: &str = "dashboard-widget-container";

/// REST namespace registered by the plugin
pub const REST_NAMESPACE: &str = "/graph-widget/v1";

/// One dated observation shown on the graph
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    /// Calendar date of the observation (serialized as YYYY-MM-DD)
    pub date: NaiveDate,
    /// Category label, e.g. a course or topic
    pub name: String,
    /// Number of enrolled students
    pub students: u32,
    /// Fees collected
    pub fees: u32,
}

impl Record {
    pub fn new(date: NaiveDate, name: impl Into<String>, students: u32, fees: u32) -> Self {
        Self {
            date,
            name: name.into(),
            students,
            fees,
        }
    }

    /// Whether this record falls inside a window starting at `cutoff` (inclusive)
    pub fn is_on_or_after(&self, cutoff: NaiveDate) -> bool {
        self.date >= cutoff
    }
}

/// Trailing time window selectable in the widget
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Period {
    #[default]
    #[serde(rename = "7days")]
    Last7Days,
    #[serde(rename = "15days")]
    Last15Days,
    #[serde(rename = "1month")]
    Last1Month,
}

impl Period {
    /// All periods in the order the selector lists them
    pub const ALL: [Period; 3] = [Period::Last7Days, Period::Last15Days, Period::Last1Month];

    /// Value used for the `period` query parameter
    pub fn as_query_value(&self) -> &'static str {
        match self {
            Period::Last7Days => "7days",
            Period::Last15Days => "15days",
            Period::Last1Month => "1month",
        }
    }

    /// Human-readable selector label
    pub fn label(&self) -> &'static str {
        match self {
            Period::Last7Days => "Last 7 days",
            Period::Last15Days => "Last 15 days",
            Period::Last1Month => "Last 1 month",
        }
    }

    /// Earliest date included in this window when measured back from `reference`.
    ///
    /// The month window subtracts one calendar month, clamping the day to the
    /// end of a shorter month (2023-03-31 -> 2023-02-28).
    pub fn cutoff(&self, reference: NaiveDate) -> NaiveDate {
        let cutoff = match self {
            Period::Last7Days => reference.checked_sub_days(Days::new(7)),
            Period::Last15Days => reference.checked_sub_days(Days::new(15)),
            Period::Last1Month => reference.checked_sub_months(Months::new(1)),
        };
        cutoff.unwrap_or(NaiveDate::MIN)
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_query_value())
    }
}

/// Returned when a `period` value is not one of the three known windows
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown period '{0}', expected one of 7days, 15days, 1month")]
pub struct ParsePeriodError(pub String);

impl FromStr for Period {
    type Err = ParsePeriodError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Period::ALL
            .into_iter()
            .find(|p| p.as_query_value() == s)
            .ok_or_else(|| ParsePeriodError(s.to_string()))
    }
}

/// Failure reaching the record source, whichever side it happened on
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ServiceError {
    #[error("network error: {0}")]
    Transport(String),
    #[error("server returned status {status}: {body}")]
    Status { status: u16, body: String },
    #[error("malformed response body: {0}")]
    Malformed(String),
    #[error("storage error: {0}")]
    Storage(String),
}

/// JSON body returned by the REST layer on non-2xx responses
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiErrorBody {
    pub error: String,
    pub message: String,
}

/// Log line forwarded from the browser to the server
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogRequest {
    pub level: String,
    pub message: String,
    pub component: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogResponse {
    pub success: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn test_period_query_values_round_trip() {
        for period in Period::ALL {
            assert_eq!(period.as_query_value().parse::<Period>().unwrap(), period);
        }
    }

    #[test]
    fn test_period_rejects_unknown_value() {
        let err = "2weeks".parse::<Period>().unwrap_err();
        assert_eq!(err, ParsePeriodError("2weeks".to_string()));
        assert!("".parse::<Period>().is_err());
        assert!("7Days".parse::<Period>().is_err());
    }

    #[test]
    fn test_period_serde_uses_wire_names() {
        assert_eq!(serde_json::to_string(&Period::Last15Days).unwrap(), "\"15days\"");
        let p: Period = serde_json::from_str("\"1month\"").unwrap();
        assert_eq!(p, Period::Last1Month);
    }

    #[test]
    fn test_cutoff_day_windows() {
        let reference = date("2023-06-19");
        assert_eq!(Period::Last7Days.cutoff(reference), date("2023-06-12"));
        assert_eq!(Period::Last15Days.cutoff(reference), date("2023-06-04"));
    }

    #[test]
    fn test_cutoff_month_window_is_calendar_month() {
        assert_eq!(Period::Last1Month.cutoff(date("2023-08-23")), date("2023-07-23"));
        assert_eq!(Period::Last1Month.cutoff(date("2023-03-31")), date("2023-02-28"));
        assert_eq!(Period::Last1Month.cutoff(date("2024-01-15")), date("2023-12-15"));
    }

    #[test]
    fn test_cutoff_saturates_at_min_date() {
        assert_eq!(Period::Last7Days.cutoff(NaiveDate::MIN), NaiveDate::MIN);
    }

    #[test]
    fn test_record_window_inclusive() {
        let record = Record::new(date("2023-06-12"), "php", 200, 2000);
        assert!(record.is_on_or_after(date("2023-06-12")));
        assert!(!record.is_on_or_after(date("2023-06-13")));
    }

    #[test]
    fn test_record_wire_format() {
        let record = Record::new(date("2023-06-12"), "php", 200, 2000);
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"date": "2023-06-12", "name": "php", "students": 200, "fees": 2000})
        );
    }

    #[test]
    fn test_default_period_is_seven_days() {
        assert_eq!(Period::default(), Period::Last7Days);
        assert_eq!(Period::Last1Month.label(), "Last 1 month");
    }
}
