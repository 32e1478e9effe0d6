//! Analytics endpoints — staff only.
//!
//! Reports are recomputed in full per request: one window query over
//! tickets, one fetch of the user collection, then pure aggregation.

use axum::Json;
use axum::extract::{Query, State};
use chrono::Utc;
use tickdesk_analytics::{AgentPerformance, AnalyticsReport, DayBucket, Period, build_report};
use tickdesk_core::TickdeskError;
use tickdesk_core::models::user::User;
use tickdesk_core::policy;
use tickdesk_core::repository::{TicketRepository, UserRepository};

use crate::dto::AnalyticsQuery;
use crate::error::ApiResult;
use crate::extract::CurrentUser;
use crate::state::AppState;

/// `GET /api/analytics?period=7days|30days|90days`
pub async fn report(
    State(state): State<AppState>,
    CurrentUser(caller): CurrentUser,
    Query(query): Query<AnalyticsQuery>,
) -> ApiResult<Json<AnalyticsReport>> {
    let report = compute(&state, &caller, query.period.as_deref()).await?;
    Ok(Json(report))
}

/// `GET /api/analytics/tickets-over-time?period=…` — just the chart
/// series.
pub async fn tickets_over_time(
    State(state): State<AppState>,
    CurrentUser(caller): CurrentUser,
    Query(query): Query<AnalyticsQuery>,
) -> ApiResult<Json<Vec<DayBucket>>> {
    let report = compute(&state, &caller, query.period.as_deref()).await?;
    Ok(Json(report.tickets.by_day))
}

/// `GET /api/analytics/agent-performance` — the agent table over all
/// time.
pub async fn agent_performance(
    State(state): State<AppState>,
    CurrentUser(caller): CurrentUser,
) -> ApiResult<Json<Vec<AgentPerformance>>> {
    let report = compute(&state, &caller, Some("all")).await?;
    Ok(Json(report.agent_performance))
}

async fn compute(
    state: &AppState,
    caller: &User,
    period: Option<&str>,
) -> ApiResult<AnalyticsReport> {
    if !policy::can_view_analytics(caller.role) {
        return Err(TickdeskError::forbidden("analytics are staff-only").into());
    }

    let period = Period::parse(period);
    let now = Utc::now();

    let tickets = state
        .ticket_repo
        .list_created_between(period.window_start(now), now)
        .await?;
    let users = state.users.list().await?;

    Ok(build_report(&tickets, &users, period, now))
}
