// Roster and team profile routes.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde::Deserialize;

use crate::adapters::inbound::http::session::CurrentSession;
use crate::application::errors::ApplicationError;
use crate::core::game::lineup::Position;
use crate::core::roster::decider::placement::command::{MoveRosterPlayer, SwapRosterPlayers};
use crate::core::roster::decider::player::command::UpdatePlayer;
use crate::core::roster::decider::team_profile::command::UpdateTeamProfile;
use crate::core::roster::player::{Player, PlayerDetails, PlayerPlacement, RosterLocation};
use crate::core::team::Team;
use crate::shell::state::AppState;

#[derive(Deserialize)]
pub struct RosterMoveBody {
    pub player_id: String,
    pub to: RosterLocation,
    pub position: Option<Position>,
}

#[derive(Deserialize)]
pub struct SwapBody {
    pub first_player_id: String,
    pub second_player_id: String,
}

#[derive(Deserialize)]
pub struct TeamProfileBody {
    pub name: Option<String>,
    /// Absent leaves the logo alone, null removes it.
    #[serde(default, with = "double_option")]
    pub logo_url: Option<Option<String>>,
}

mod double_option {
    use serde::{Deserialize, Deserializer};

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<Option<String>>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Option::<String>::deserialize(deserializer).map(Some)
    }
}

pub async fn list(CurrentSession(session): CurrentSession) -> Json<Vec<Player>> {
    Json(session.roster().await)
}

pub async fn add(
    State(state): State<AppState>,
    CurrentSession(session): CurrentSession,
    Json(details): Json<PlayerDetails>,
) -> Result<(StatusCode, Json<Player>), ApplicationError> {
    let player = state.roster.add_player(&session, details).await?;
    Ok((StatusCode::CREATED, Json(player)))
}

pub async fn update(
    State(state): State<AppState>,
    CurrentSession(session): CurrentSession,
    Path(player_id): Path<String>,
    Json(details): Json<PlayerDetails>,
) -> Result<Json<Player>, ApplicationError> {
    let command = UpdatePlayer { player_id, details };
    Ok(Json(state.roster.update_player(&session, command).await?))
}

pub async fn delete(
    State(state): State<AppState>,
    CurrentSession(session): CurrentSession,
    Path(player_id): Path<String>,
) -> Result<StatusCode, ApplicationError> {
    state.roster.delete_player(&session, &player_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn move_player(
    State(state): State<AppState>,
    CurrentSession(session): CurrentSession,
    Json(body): Json<RosterMoveBody>,
) -> Result<Json<PlayerPlacement>, ApplicationError> {
    let command = MoveRosterPlayer {
        player_id: body.player_id,
        to: body.to,
        position: body.position.map(|position| Position::new(position.x, position.y)),
    };
    Ok(Json(state.roster.move_player(&session, command).await?))
}

pub async fn swap(
    State(state): State<AppState>,
    CurrentSession(session): CurrentSession,
    Json(body): Json<SwapBody>,
) -> Result<Json<[PlayerPlacement; 2]>, ApplicationError> {
    let command = SwapRosterPlayers {
        first_player_id: body.first_player_id,
        second_player_id: body.second_player_id,
    };
    Ok(Json(state.roster.swap(&session, command).await?))
}

pub async fn reset(
    State(state): State<AppState>,
    CurrentSession(session): CurrentSession,
) -> Result<Json<Vec<Player>>, ApplicationError> {
    Ok(Json(state.roster.reset_roster(&session).await?))
}

pub async fn update_team(
    State(state): State<AppState>,
    CurrentSession(session): CurrentSession,
    Json(body): Json<TeamProfileBody>,
) -> Result<Json<Team>, ApplicationError> {
    let command = UpdateTeamProfile {
        name: body.name,
        logo_url: body.logo_url,
    };
    Ok(Json(state.roster.update_team_profile(&session, command).await?))
}
