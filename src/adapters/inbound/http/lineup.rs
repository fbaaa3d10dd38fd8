// In-game lineup routes: moves, substitutions and the lineup reset.

use axum::{
    Json,
    extract::{Path, State},
};
use chrono::Utc;
use serde::Deserialize;

use crate::adapters::inbound::http::session::CurrentSession;
use crate::application::errors::ApplicationError;
use crate::core::game::decider::move_player::command::{MovePlayerInGame, SubstitutePlayers};
use crate::core::game::lineup::{Location, Position};
use crate::core::game::sheet::GameSheet;
use crate::shell::state::AppState;

#[derive(Deserialize)]
pub struct MoveBody {
    pub player_id: String,
    pub from: Location,
    pub to: Location,
    pub position: Option<Position>,
    #[serde(default)]
    pub confirmed: bool,
}

#[derive(Deserialize)]
pub struct SubstitutionBody {
    pub player_out_id: String,
    pub player_in_id: String,
    #[serde(default)]
    pub confirmed: bool,
}

#[derive(Deserialize)]
pub struct ResetBody {
    #[serde(default)]
    pub confirmed: bool,
}

pub async fn move_player(
    State(state): State<AppState>,
    CurrentSession(session): CurrentSession,
    Path(game_id): Path<String>,
    Json(body): Json<MoveBody>,
) -> Result<Json<GameSheet>, ApplicationError> {
    let command = MovePlayerInGame {
        game_id,
        player_id: body.player_id,
        from: body.from,
        to: body.to,
        position: body.position.map(|position| Position::new(position.x, position.y)),
        at: Utc::now().timestamp_millis(),
        confirmed: body.confirmed,
    };
    Ok(Json(state.lineup.move_player(&session, command).await?))
}

pub async fn substitute(
    State(state): State<AppState>,
    CurrentSession(session): CurrentSession,
    Path(game_id): Path<String>,
    Json(body): Json<SubstitutionBody>,
) -> Result<Json<GameSheet>, ApplicationError> {
    let command = SubstitutePlayers {
        game_id,
        player_out_id: body.player_out_id,
        player_in_id: body.player_in_id,
        at: Utc::now().timestamp_millis(),
        confirmed: body.confirmed,
    };
    Ok(Json(state.lineup.substitute(&session, command).await?))
}

pub async fn reset(
    State(state): State<AppState>,
    CurrentSession(session): CurrentSession,
    Path(game_id): Path<String>,
    Json(body): Json<ResetBody>,
) -> Result<Json<GameSheet>, ApplicationError> {
    Ok(Json(
        state.lineup.reset(&session, &game_id, body.confirmed).await?,
    ))
}
