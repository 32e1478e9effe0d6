//! The trailing date window a report is computed over.

use chrono::{DateTime, Duration, Utc};

/// Reporting window. Anything other than the three known period
/// strings selects all-time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Period {
    Days7,
    Days30,
    Days90,
    AllTime,
}

impl Period {
    /// Parse the `period` query parameter; absent means the default
    /// 7-day window.
    pub fn parse(value: Option<&str>) -> Self {
        match value {
            None | Some("7days") => Period::Days7,
            Some("30days") => Period::Days30,
            Some("90days") => Period::Days90,
            Some(_) => Period::AllTime,
        }
    }

    /// Window length in days; `None` for all-time.
    pub fn days(&self) -> Option<i64> {
        match self {
            Period::Days7 => Some(7),
            Period::Days30 => Some(30),
            Period::Days90 => Some(90),
            Period::AllTime => None,
        }
    }

    /// Lower bound of the window; `None` for all-time.
    pub fn window_start(&self, now: DateTime<Utc>) -> Option<DateTime<Utc>> {
        self.days().map(|d| now - Duration::days(d))
    }

    /// Number of per-day buckets in the time series. All-time charts
    /// cap out at the 90-day view.
    pub fn bucket_days(&self) -> i64 {
        self.days().unwrap_or(90)
    }
}
