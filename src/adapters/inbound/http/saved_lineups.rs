use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde::Deserialize;

use crate::adapters::inbound::http::session::CurrentSession;
use crate::application::errors::ApplicationError;
use crate::core::roster::decider::saved_lineup::command::LoadLineup;
use crate::core::roster::player::Player;
use crate::core::roster::saved_lineup::SavedLineup;
use crate::shell::state::AppState;

#[derive(Deserialize)]
pub struct SaveLineupBody {
    pub name: String,
    #[serde(default)]
    pub overwrite: bool,
}

pub async fn list(CurrentSession(session): CurrentSession) -> Json<Vec<SavedLineup>> {
    Json(session.snapshot().await.saved_lineups)
}

pub async fn save(
    State(state): State<AppState>,
    CurrentSession(session): CurrentSession,
    Json(body): Json<SaveLineupBody>,
) -> Result<(StatusCode, Json<SavedLineup>), ApplicationError> {
    let saved = state
        .saved_lineups
        .save(&session, &body.name, body.overwrite)
        .await?;
    Ok((StatusCode::CREATED, Json(saved)))
}

pub async fn load(
    State(state): State<AppState>,
    CurrentSession(session): CurrentSession,
    Path(lineup_id): Path<String>,
) -> Result<Json<Vec<Player>>, ApplicationError> {
    let command = LoadLineup { lineup_id };
    Ok(Json(state.saved_lineups.load(&session, command).await?))
}

pub async fn delete(
    State(state): State<AppState>,
    CurrentSession(session): CurrentSession,
    Path(lineup_id): Path<String>,
) -> Result<StatusCode, ApplicationError> {
    state.saved_lineups.delete(&session, &lineup_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
