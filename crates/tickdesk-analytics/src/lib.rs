//! Tickdesk Analytics — pure read-side aggregation.
//!
//! Everything here is a function of its inputs: the caller fetches the
//! tickets created inside the window plus the user collection, and the
//! aggregator derives counts, rates, a per-day time series, and a
//! per-agent performance table. Nothing is cached — reports are
//! recomputed in full on every request.

pub mod period;
pub mod report;

pub use period::Period;
pub use report::{
    AgentPerformance, AnalyticsReport, DayBucket, PerformanceStats, PriorityCounts, RoleCounts,
    StatusCounts, TicketStats, UserStats, build_report, time_series,
};
