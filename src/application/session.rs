// Signed-in team session: the explicit application state every handler works against.
//
// Purpose
// - Hold the in-memory mirror of one team's roster, games and saved lineups.
// - Guard against overlapping mutations of the same game or of the roster.
//
// Responsibilities
// - Created on successful authentication, dropped on sign-out (see SessionRegistry).
// - Mirror changes only after the store accepted them.
// - Hand out one busy guard per key. A second mutation on a busy key fails fast with
//   ApplicationError::Busy instead of queueing behind the first.
//
// Boundaries
// - No input or output. Handlers load from and write to the store, then update the mirror here.

use std::collections::{BTreeMap, HashMap, HashSet};
use std::sync::{Arc, Mutex, PoisonError};

use serde::Serialize;
use tokio::sync::RwLock;

use crate::application::errors::ApplicationError;
use crate::core::game::sheet::GameSheet;
use crate::core::roster::player::Player;
use crate::core::roster::saved_lineup::SavedLineup;
use crate::core::team::Team;

/// Busy key for mutations of the roster, team profile and saved lineups.
pub const ROSTER_KEY: &str = "roster";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TeamMirror {
    pub team: Team,
    pub players: Vec<Player>,
    pub games: BTreeMap<String, GameSheet>,
    pub saved_lineups: Vec<SavedLineup>,
}

impl TeamMirror {
    pub fn sheet(&self, game_id: &str) -> Result<&GameSheet, ApplicationError> {
        self.games
            .get(game_id)
            .ok_or_else(|| ApplicationError::NotFound {
                what: "game",
                id: game_id.to_string(),
            })
    }

    pub fn player_mut(&mut self, player_id: &str) -> Option<&mut Player> {
        self.players
            .iter_mut()
            .find(|player| player.player_id == player_id)
    }

    /// Games whose lineup or events mention the player.
    pub fn games_with_player(&self, player_id: &str) -> Vec<String> {
        self.games
            .iter()
            .filter(|(_, sheet)| {
                sheet.lineup.iter().any(|entry| entry.player_id == player_id)
                    || sheet
                        .events
                        .iter()
                        .any(|event| event.kind.player_ids().any(|id| id == player_id))
            })
            .map(|(game_id, _)| game_id.clone())
            .collect()
    }

    pub fn roster_ids(&self) -> Vec<String> {
        self.players
            .iter()
            .map(|player| player.player_id.clone())
            .collect()
    }
}

pub struct TeamSession {
    user_id: String,
    team_id: String,
    mirror: RwLock<TeamMirror>,
    busy: Mutex<HashSet<String>>,
}

/// Releases its busy key on drop.
pub struct BusyGuard<'a> {
    busy: &'a Mutex<HashSet<String>>,
    key: String,
}

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        self.busy
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(&self.key);
    }
}

impl TeamSession {
    pub fn new(user_id: impl Into<String>, mirror: TeamMirror) -> Self {
        Self {
            user_id: user_id.into(),
            team_id: mirror.team.team_id.clone(),
            mirror: RwLock::new(mirror),
            busy: Mutex::new(HashSet::new()),
        }
    }

    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    pub fn team_id(&self) -> &str {
        &self.team_id
    }

    pub fn begin(&self, key: &str) -> Result<BusyGuard<'_>, ApplicationError> {
        let mut busy = self.busy.lock().unwrap_or_else(PoisonError::into_inner);
        if !busy.insert(key.to_string()) {
            tracing::warn!(team_id = %self.team_id, key, "rejected overlapping mutation");
            return Err(ApplicationError::Busy {
                key: key.to_string(),
            });
        }
        Ok(BusyGuard {
            busy: &self.busy,
            key: key.to_string(),
        })
    }

    pub fn is_busy(&self, key: &str) -> bool {
        self.busy
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .contains(key)
    }

    pub async fn snapshot(&self) -> TeamMirror {
        self.mirror.read().await.clone()
    }

    pub async fn game_sheet(&self, game_id: &str) -> Result<GameSheet, ApplicationError> {
        self.mirror.read().await.sheet(game_id).cloned()
    }

    pub async fn roster(&self) -> Vec<Player> {
        self.mirror.read().await.players.clone()
    }

    pub async fn replace_sheet(&self, sheet: GameSheet) {
        self.mirror
            .write()
            .await
            .games
            .insert(sheet.game_id().to_string(), sheet);
    }

    pub async fn replace_mirror(&self, mirror: TeamMirror) {
        *self.mirror.write().await = mirror;
    }

    pub async fn update<R>(&self, change: impl FnOnce(&mut TeamMirror) -> R) -> R {
        let mut mirror = self.mirror.write().await;
        change(&mut mirror)
    }
}

/// Live sessions by signed-in user.
#[derive(Default)]
pub struct SessionRegistry {
    sessions: RwLock<HashMap<String, Arc<TeamSession>>>,
}

impl SessionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn get(&self, user_id: &str) -> Option<Arc<TeamSession>> {
        self.sessions.read().await.get(user_id).cloned()
    }

    /// Keep an existing session for the user, or register the new one.
    pub async fn insert(&self, session: TeamSession) -> Arc<TeamSession> {
        self.sessions
            .write()
            .await
            .entry(session.user_id().to_string())
            .or_insert_with(|| Arc::new(session))
            .clone()
    }

    pub async fn remove(&self, user_id: &str) -> Option<Arc<TeamSession>> {
        self.sessions.write().await.remove(user_id)
    }
}

#[cfg(test)]
mod team_session_tests {
    use super::*;
    use crate::core::game::state::TimerStatus;
    use crate::test_support::fixtures::games::{GameBuilder, sheet};
    use rstest::{fixture, rstest};

    fn team_session() -> TeamSession {
        let game = sheet(GameBuilder::new().build(), vec![]);
        TeamSession::new(
            "user-1",
            TeamMirror {
                team: Team {
                    team_id: "team-1".into(),
                    owner_id: "user-1".into(),
                    name: "Lions".into(),
                    logo_url: None,
                },
                players: vec![],
                games: BTreeMap::from([(game.game_id().to_string(), game)]),
                saved_lineups: vec![],
            },
        )
    }

    #[fixture]
    fn session() -> TeamSession {
        team_session()
    }

    #[rstest]
    fn it_should_reject_a_second_mutation_on_a_busy_key(session: TeamSession) {
        let guard = session.begin("game-1").unwrap();
        assert!(matches!(
            session.begin("game-1"),
            Err(ApplicationError::Busy { key }) if key == "game-1"
        ));
        assert!(session.begin(ROSTER_KEY).is_ok());
        drop(guard);
        assert!(!session.is_busy("game-1"));
        assert!(session.begin("game-1").is_ok());
    }

    #[rstest]
    #[tokio::test]
    async fn it_should_hand_out_copies_of_game_sheets(session: TeamSession) {
        let mut copy = session.game_sheet("game-1").await.unwrap();
        copy.game.timer_status = TimerStatus::Running;
        assert_eq!(
            session.game_sheet("game-1").await.unwrap().game.timer_status,
            TimerStatus::Stopped
        );
        session.replace_sheet(copy).await;
        assert_eq!(
            session.game_sheet("game-1").await.unwrap().game.timer_status,
            TimerStatus::Running
        );
    }

    #[rstest]
    #[tokio::test]
    async fn it_should_report_unknown_games(session: TeamSession) {
        assert!(matches!(
            session.game_sheet("nope").await,
            Err(ApplicationError::NotFound { what: "game", .. })
        ));
    }

    #[rstest]
    #[tokio::test]
    async fn it_should_keep_the_first_session_per_user(session: TeamSession) {
        let registry = SessionRegistry::new();
        let first = registry.insert(session).await;
        let again = registry.insert(team_session()).await;
        assert!(Arc::ptr_eq(&first, &again));
        assert!(registry.remove("user-1").await.is_some());
        assert!(registry.get("user-1").await.is_none());
    }
}
