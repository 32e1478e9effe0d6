//! Report types and the aggregation itself.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use tickdesk_core::models::ticket::{Priority, Status, Ticket};
use tickdesk_core::models::user::{Role, User};

use crate::period::Period;

/// Mean time-to-first-response, in hours.
///
/// TODO: derive from the timestamp of the first support-agent comment
/// on each ticket instead of this constant.
const PLACEHOLDER_RESPONSE_TIME_HOURS: f64 = 2.5;

/// Overall satisfaction percentage. Placeholder — there is no feedback
/// entity to derive it from yet.
const PLACEHOLDER_SATISFACTION_PCT: u32 = 92;

/// Per-agent satisfaction percentage. Same gap as above; a constant
/// keeps responses deterministic.
const PLACEHOLDER_AGENT_SATISFACTION_PCT: u32 = 90;

/// Tickets bucketed by status. Field names are the wire enum values.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StatusCounts {
    pub open: u64,
    pub in_progress: u64,
    pub resolved: u64,
    pub closed: u64,
}

impl StatusCounts {
    pub fn total(&self) -> u64 {
        self.open + self.in_progress + self.resolved + self.closed
    }
}

/// Tickets bucketed by priority.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PriorityCounts {
    pub high: u64,
    pub medium: u64,
    pub low: u64,
}

/// Users bucketed by role.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RoleCounts {
    pub admin: u64,
    pub support_agent: u64,
    pub user: u64,
}

/// One calendar day of the time series.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayBucket {
    /// ISO date (`YYYY-MM-DD`, UTC).
    pub date: String,
    pub count: u64,
    /// Relative for the 7-day window ("Today", "1d", …), otherwise the
    /// bucket's own calendar date ("Aug 7").
    pub label: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TicketStats {
    pub total: u64,
    pub by_status: StatusCounts,
    pub by_priority: PriorityCounts,
    pub by_day: Vec<DayBucket>,
    /// Placeholder constant, not a measurement.
    pub response_time: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserStats {
    pub total: u64,
    pub by_role: RoleCounts,
    /// Users who logged in within the trailing 30 days (independent of
    /// the report window).
    pub active_users: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PerformanceStats {
    /// Percentage of in-window tickets that are resolved or closed,
    /// rounded to the nearest integer. 0 when the window is empty.
    pub resolution_rate: u32,
    /// Mean days from creation to last update over resolved/closed
    /// tickets, rounded to one decimal.
    pub avg_resolution_time: f64,
    /// Placeholder constant, not a measurement.
    pub satisfaction: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AgentPerformance {
    pub agent_name: String,
    pub agent_email: String,
    pub assigned_tickets: u64,
    pub resolved_tickets: u64,
    pub resolution_rate: u32,
    pub avg_resolution_time: f64,
    /// Placeholder constant, not a measurement.
    pub satisfaction: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsReport {
    pub tickets: TicketStats,
    pub users: UserStats,
    pub performance: PerformanceStats,
    pub agent_performance: Vec<AgentPerformance>,
}

/// Build the full report.
///
/// `tickets` must already be restricted to the window (the repository's
/// `list_created_between` does that); `users` is the whole collection.
pub fn build_report(
    tickets: &[Ticket],
    users: &[User],
    period: Period,
    now: DateTime<Utc>,
) -> AnalyticsReport {
    let mut by_status = StatusCounts::default();
    let mut by_priority = PriorityCounts::default();
    for ticket in tickets {
        match ticket.status {
            Status::Open => by_status.open += 1,
            Status::InProgress => by_status.in_progress += 1,
            Status::Resolved => by_status.resolved += 1,
            Status::Closed => by_status.closed += 1,
        }
        match ticket.priority {
            Priority::High => by_priority.high += 1,
            Priority::Medium => by_priority.medium += 1,
            Priority::Low => by_priority.low += 1,
        }
    }

    let (resolution_rate, avg_resolution_time) = resolution_metrics(tickets);

    let mut by_role = RoleCounts::default();
    for user in users {
        match user.role {
            Role::Admin => by_role.admin += 1,
            Role::SupportAgent => by_role.support_agent += 1,
            Role::User => by_role.user += 1,
        }
    }
    let active_cutoff = now - Duration::days(30);
    let active_users = users
        .iter()
        .filter(|u| u.last_login.is_some_and(|at| at > active_cutoff))
        .count() as u64;

    let agent_performance = agent_performance(tickets, users);

    AnalyticsReport {
        tickets: TicketStats {
            total: tickets.len() as u64,
            by_status,
            by_priority,
            by_day: time_series(tickets, period, now),
            response_time: PLACEHOLDER_RESPONSE_TIME_HOURS,
        },
        users: UserStats {
            total: users.len() as u64,
            by_role,
            active_users,
        },
        performance: PerformanceStats {
            resolution_rate,
            avg_resolution_time,
            satisfaction: PLACEHOLDER_SATISFACTION_PCT,
        },
        agent_performance,
    }
}

/// One bucket per calendar day (UTC), oldest first, ending today.
pub fn time_series(tickets: &[Ticket], period: Period, now: DateTime<Utc>) -> Vec<DayBucket> {
    let days = period.bucket_days();
    let mut buckets = Vec::with_capacity(days as usize);

    for offset in (0..days).rev() {
        let day = (now - Duration::days(offset)).date_naive();
        let count = tickets
            .iter()
            .filter(|t| t.created_at.date_naive() == day)
            .count() as u64;

        let label = if days == 7 {
            if offset == 0 {
                "Today".to_string()
            } else {
                format!("{offset}d")
            }
        } else {
            day.format("%b %-d").to_string()
        };

        buckets.push(DayBucket {
            date: day.format("%Y-%m-%d").to_string(),
            count,
            label,
        });
    }

    buckets
}

/// Resolution rate (rounded percent) and mean resolution time in days
/// (one decimal) over the settled subset. Empty input yields zeros —
/// no division by zero.
fn resolution_metrics(tickets: &[Ticket]) -> (u32, f64) {
    let total = tickets.len();
    let settled: Vec<&Ticket> = tickets.iter().filter(|t| t.status.is_settled()).collect();

    let rate = if total > 0 {
        ((settled.len() as f64 / total as f64) * 100.0).round() as u32
    } else {
        0
    };

    let avg = if settled.is_empty() {
        0.0
    } else {
        let total_days: f64 = settled
            .iter()
            .map(|t| (t.updated_at - t.created_at).num_seconds() as f64 / 86_400.0)
            .sum();
        round1(total_days / settled.len() as f64)
    };

    (rate, avg)
}

fn agent_performance(tickets: &[Ticket], users: &[User]) -> Vec<AgentPerformance> {
    users
        .iter()
        .filter(|u| u.role == Role::SupportAgent)
        .map(|agent| {
            let assigned: Vec<Ticket> = tickets
                .iter()
                .filter(|t| t.assigned_to == Some(agent.id))
                .cloned()
                .collect();
            let resolved = assigned.iter().filter(|t| t.status.is_settled()).count() as u64;
            let (resolution_rate, avg_resolution_time) = resolution_metrics(&assigned);

            AgentPerformance {
                agent_name: agent.name.clone(),
                agent_email: agent.email.clone(),
                assigned_tickets: assigned.len() as u64,
                resolved_tickets: resolved,
                resolution_rate,
                avg_resolution_time,
                satisfaction: PLACEHOLDER_AGENT_SATISFACTION_PCT,
            }
        })
        .collect()
}

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
