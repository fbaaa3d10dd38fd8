use axum::{Json, extract::Query};

use crate::adapters::inbound::http::session::CurrentSession;
use crate::application::query_handlers::stats_queries;
use crate::core::stats::{GameHistory, SeasonStats, StatsFilter};

pub async fn season(
    CurrentSession(session): CurrentSession,
    Query(filter): Query<StatsFilter>,
) -> Json<SeasonStats> {
    Json(stats_queries::stats(&session, &filter).await)
}

pub async fn history(CurrentSession(session): CurrentSession) -> Json<GameHistory> {
    Json(stats_queries::history(&session).await)
}
