use axum::{
    Json,
    extract::{Path, State},
};
use chrono::Utc;
use serde::Deserialize;

use crate::adapters::inbound::http::session::CurrentSession;
use crate::application::errors::ApplicationError;
use crate::core::game::decider::add_event::command::RecordGameEvent;
use crate::core::game::decider::remove_last_event::command::RemoveLastEvent;
use crate::core::game::event::{EventType, GameEventKind};
use crate::core::game::sheet::GameSheet;
use crate::core::game::state::Side;
use crate::shell::state::AppState;

#[derive(Deserialize)]
pub struct RecordEventBody {
    pub side: Side,
    pub kind: GameEventKind,
    /// Overrides the clock reading, for entering events after the fact.
    pub game_seconds: Option<u32>,
    #[serde(default)]
    pub confirmed: bool,
}

#[derive(Deserialize)]
pub struct RemoveLastEventBody {
    pub side: Side,
    pub event_type: EventType,
    #[serde(default)]
    pub confirmed: bool,
}

pub async fn record(
    State(state): State<AppState>,
    CurrentSession(session): CurrentSession,
    Path(game_id): Path<String>,
    Json(body): Json<RecordEventBody>,
) -> Result<Json<GameSheet>, ApplicationError> {
    let command = RecordGameEvent {
        game_id,
        side: body.side,
        kind: body.kind,
        at: Utc::now().timestamp_millis(),
        game_seconds: body.game_seconds,
        confirmed: body.confirmed,
    };
    Ok(Json(state.events.add_event(&session, command).await?))
}

pub async fn remove_last(
    State(state): State<AppState>,
    CurrentSession(session): CurrentSession,
    Path(game_id): Path<String>,
    Json(body): Json<RemoveLastEventBody>,
) -> Result<Json<GameSheet>, ApplicationError> {
    let command = RemoveLastEvent {
        game_id,
        side: body.side,
        event_type: body.event_type,
        confirmed: body.confirmed,
    };
    Ok(Json(state.events.remove_last_event(&session, command).await?))
}
