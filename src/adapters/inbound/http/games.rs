// Game routes: schedule, clock and read views.
//
// Clock actions are stamped with the server's wall clock on arrival.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use chrono::Utc;

use crate::adapters::inbound::http::session::CurrentSession;
use crate::application::errors::ApplicationError;
use crate::application::query_handlers::game_queries;
use crate::core::game::decider::finish::command::FinishGame;
use crate::core::game::decider::schedule::command::UpdateGameDetails;
use crate::core::game::decider::start_timer::command::StartGameTimer;
use crate::core::game::decider::stop_timer::command::StopGameTimer;
use crate::core::game::live::LiveBoard;
use crate::core::game::report::GameSummary;
use crate::core::game::sheet::GameSheet;
use crate::core::game::state::{Game, GameDetails};
use crate::shell::state::AppState;

pub async fn list(CurrentSession(session): CurrentSession) -> Json<Vec<Game>> {
    Json(game_queries::list_games(&session).await)
}

pub async fn create(
    State(state): State<AppState>,
    CurrentSession(session): CurrentSession,
    Json(details): Json<GameDetails>,
) -> Result<(StatusCode, Json<GameSheet>), ApplicationError> {
    let sheet = state.schedule.add_game(&session, details).await?;
    Ok((StatusCode::CREATED, Json(sheet)))
}

pub async fn show(
    CurrentSession(session): CurrentSession,
    Path(game_id): Path<String>,
) -> Result<Json<GameSheet>, ApplicationError> {
    Ok(Json(game_queries::game_sheet(&session, &game_id).await?))
}

pub async fn update(
    State(state): State<AppState>,
    CurrentSession(session): CurrentSession,
    Path(game_id): Path<String>,
    Json(details): Json<GameDetails>,
) -> Result<Json<GameSheet>, ApplicationError> {
    let command = UpdateGameDetails { game_id, details };
    Ok(Json(state.schedule.update_game(&session, command).await?))
}

pub async fn delete(
    State(state): State<AppState>,
    CurrentSession(session): CurrentSession,
    Path(game_id): Path<String>,
) -> Result<StatusCode, ApplicationError> {
    state.schedule.delete_game(&session, &game_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn summary(
    CurrentSession(session): CurrentSession,
    Path(game_id): Path<String>,
) -> Result<Json<GameSummary>, ApplicationError> {
    Ok(Json(game_queries::summary(&session, &game_id).await?))
}

pub async fn live(
    CurrentSession(session): CurrentSession,
    Path(game_id): Path<String>,
) -> Result<Json<LiveBoard>, ApplicationError> {
    let now = Utc::now().timestamp_millis();
    Ok(Json(game_queries::board(&session, &game_id, now).await?))
}

pub async fn start(
    State(state): State<AppState>,
    CurrentSession(session): CurrentSession,
    Path(game_id): Path<String>,
) -> Result<Json<GameSheet>, ApplicationError> {
    let command = StartGameTimer {
        game_id,
        at: Utc::now().timestamp_millis(),
    };
    Ok(Json(state.clock.start(&session, command).await?))
}

pub async fn stop(
    State(state): State<AppState>,
    CurrentSession(session): CurrentSession,
    Path(game_id): Path<String>,
) -> Result<Json<GameSheet>, ApplicationError> {
    let command = StopGameTimer {
        game_id,
        at: Utc::now().timestamp_millis(),
    };
    Ok(Json(state.clock.stop(&session, command).await?))
}

pub async fn finish(
    State(state): State<AppState>,
    CurrentSession(session): CurrentSession,
    Path(game_id): Path<String>,
) -> Result<Json<GameSheet>, ApplicationError> {
    let command = FinishGame {
        game_id,
        at: Utc::now().timestamp_millis(),
    };
    Ok(Json(state.clock.finish(&session, command).await?))
}
