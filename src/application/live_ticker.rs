// Live ticker: one shared background task per watched game.
//
// Purpose
// - Publish the game's LiveBoard every period through a tokio watch channel, so every viewer of
//   a game reads the same snapshot instead of running its own timer.
//
// Responsibilities
// - Spawn a task on the first watch of a game; later watchers subscribe to the same channel.
// - Recompute the board from the mirror on every tick. Nothing is written to the store.
// - Stop the task once no watcher is left or the game is gone from the mirror.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use chrono::Utc;
use tokio::sync::watch;
use tokio::time::MissedTickBehavior;

use crate::application::errors::ApplicationError;
use crate::application::session::TeamSession;
use crate::core::game::live::{LiveBoard, live_board};

type Boards = Arc<Mutex<HashMap<String, watch::Receiver<LiveBoard>>>>;

pub struct LiveTicker {
    period: Duration,
    boards: Boards,
}

fn now_millis() -> i64 {
    Utc::now().timestamp_millis()
}

fn board_key(session: &TeamSession, game_id: &str) -> String {
    format!("{}/{}", session.team_id(), game_id)
}

impl LiveTicker {
    pub fn new(period: Duration) -> Self {
        Self {
            period,
            boards: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Subscribe to the live board of a game, starting its ticker if none runs.
    pub async fn watch(
        &self,
        session: Arc<TeamSession>,
        game_id: &str,
    ) -> Result<watch::Receiver<LiveBoard>, ApplicationError> {
        let key = board_key(&session, game_id);
        // the first board is computed before the lock so the guard never spans an await
        let first = live_board(&session.game_sheet(game_id).await?, now_millis());

        let mut boards = self.boards.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(existing) = boards.get(&key) {
            if existing.has_changed().is_ok() {
                return Ok(existing.clone());
            }
        }
        let (sender, receiver) = watch::channel(first);
        boards.insert(key.clone(), receiver.clone());
        drop(boards);

        tokio::spawn(run_ticker(
            self.period,
            session,
            game_id.to_string(),
            key,
            sender,
            self.boards.clone(),
        ));
        Ok(receiver)
    }

    pub fn watched_games(&self) -> usize {
        self.boards
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
}

async fn run_ticker(
    period: Duration,
    session: Arc<TeamSession>,
    game_id: String,
    key: String,
    sender: watch::Sender<LiveBoard>,
    boards: Boards,
) {
    tracing::debug!(game_id = %game_id, "live ticker started");
    let mut interval = tokio::time::interval(period);
    interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
    interval.tick().await;
    loop {
        interval.tick().await;
        // the registry keeps one receiver of its own
        if sender.receiver_count() <= 1 {
            break;
        }
        match session.game_sheet(&game_id).await {
            Ok(sheet) => {
                sender.send_replace(live_board(&sheet, now_millis()));
            }
            Err(_) => break,
        }
    }
    drop(sender);

    let mut boards = boards.lock().unwrap_or_else(PoisonError::into_inner);
    if boards
        .get(&key)
        .is_some_and(|receiver| receiver.has_changed().is_err())
    {
        boards.remove(&key);
    }
    tracing::debug!(game_id = %game_id, "live ticker stopped");
}
