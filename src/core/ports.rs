// Ports define what the core needs from the outside world, without implementing it.
//
// Purpose
// - Describe persistence per table and authentication as async traits.
//
// Responsibilities
// - Scope every query and write to one team. A row owned by another team is a permission error.
// - Report failures as one closed PersistenceError, classified once by the adapter.
//
// Boundaries
// - No concrete input or output here. Adapters implement these traits in the adapters layer.
// - Each call is atomic on its own. There are no cross-call transactions.
//
// Testing guidance
// - Use the in memory adapter; it can go offline or fail after a number of writes.

use async_trait::async_trait;
use thiserror::Error;

use crate::core::game::change::{GamePatch, LineupPatch};
use crate::core::game::event::{GameEvent, NewGameEvent};
use crate::core::game::lineup::{LineupEntry, NewLineupEntry};
use crate::core::game::state::{Game, GameDetails, NewGame};
use crate::core::roster::player::{NewPlayer, Player, PlayerDetails, PlayerPlacement};
use crate::core::roster::saved_lineup::{NewSavedLineup, SavedLineup};
use crate::core::team::{NewTeam, Team, TeamPatch};

pub const SAVED_LINEUP_NAME_KEY: &str = "saved_lineups_team_id_name_key";

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PersistenceError {
    #[error("unique constraint {constraint} violated")]
    UniqueViolation { constraint: String },

    #[error("foreign key constraint {constraint} violated")]
    ForeignKeyViolation { constraint: String },

    #[error("permission denied on {table}")]
    PermissionDenied { table: String },

    #[error("{table} row {id} not found")]
    NotFound { table: String, id: String },

    #[error("transport error: {0}")]
    Transport(String),
}

#[async_trait]
pub trait TeamStore: Send + Sync {
    async fn find_team_by_owner(&self, owner_id: &str) -> Result<Option<Team>, PersistenceError>;
    async fn insert_team(&self, team: NewTeam) -> Result<Team, PersistenceError>;
    async fn update_team(&self, team_id: &str, patch: &TeamPatch) -> Result<(), PersistenceError>;
}

#[async_trait]
pub trait PlayerStore: Send + Sync {
    async fn list_players(&self, team_id: &str) -> Result<Vec<Player>, PersistenceError>;
    async fn insert_player(&self, player: NewPlayer) -> Result<Player, PersistenceError>;
    async fn update_player_details(
        &self,
        team_id: &str,
        player_id: &str,
        details: &PlayerDetails,
    ) -> Result<(), PersistenceError>;
    async fn update_placement(
        &self,
        team_id: &str,
        placement: &PlayerPlacement,
    ) -> Result<(), PersistenceError>;
    /// Cascades: lineup entries go, event references are nulled, saved-lineup slots are dropped.
    async fn delete_player(&self, team_id: &str, player_id: &str) -> Result<(), PersistenceError>;
}

#[async_trait]
pub trait GameStore: Send + Sync {
    async fn list_games(&self, team_id: &str) -> Result<Vec<Game>, PersistenceError>;
    async fn find_game(&self, team_id: &str, game_id: &str) -> Result<Game, PersistenceError>;
    async fn insert_game(&self, game: NewGame) -> Result<Game, PersistenceError>;
    async fn update_game(
        &self,
        team_id: &str,
        game_id: &str,
        patch: &GamePatch,
    ) -> Result<(), PersistenceError>;
    async fn update_game_details(
        &self,
        team_id: &str,
        game_id: &str,
        details: &GameDetails,
    ) -> Result<(), PersistenceError>;
    /// Cascades to the game's lineup entries and events.
    async fn delete_game(&self, team_id: &str, game_id: &str) -> Result<(), PersistenceError>;
}

#[async_trait]
pub trait LineupStore: Send + Sync {
    async fn list_entries(
        &self,
        team_id: &str,
        game_id: &str,
    ) -> Result<Vec<LineupEntry>, PersistenceError>;
    async fn insert_entries(
        &self,
        team_id: &str,
        entries: Vec<NewLineupEntry>,
    ) -> Result<Vec<LineupEntry>, PersistenceError>;
    /// All patches land in one request; either all rows change or none.
    async fn update_entries(
        &self,
        team_id: &str,
        patches: &[LineupPatch],
    ) -> Result<(), PersistenceError>;
    async fn delete_entries(&self, team_id: &str, game_id: &str) -> Result<(), PersistenceError>;
}

#[async_trait]
pub trait GameEventStore: Send + Sync {
    async fn list_events(
        &self,
        team_id: &str,
        game_id: &str,
    ) -> Result<Vec<GameEvent>, PersistenceError>;
    async fn insert_event(
        &self,
        team_id: &str,
        event: NewGameEvent,
    ) -> Result<GameEvent, PersistenceError>;
    async fn delete_event(&self, team_id: &str, event_id: &str) -> Result<(), PersistenceError>;
    async fn delete_events(&self, team_id: &str, game_id: &str) -> Result<(), PersistenceError>;
}

#[async_trait]
pub trait SavedLineupStore: Send + Sync {
    async fn list_saved_lineups(&self, team_id: &str) -> Result<Vec<SavedLineup>, PersistenceError>;
    /// Fails with a unique violation on SAVED_LINEUP_NAME_KEY when the name is taken.
    async fn insert_saved_lineup(
        &self,
        lineup: NewSavedLineup,
    ) -> Result<SavedLineup, PersistenceError>;
    /// Replaces the slots of a same-named lineup, keyed on (team, name).
    async fn upsert_saved_lineup(
        &self,
        lineup: NewSavedLineup,
    ) -> Result<SavedLineup, PersistenceError>;
    async fn delete_saved_lineup(&self, team_id: &str, lineup_id: &str) -> Result<(), PersistenceError>;
}

/// Every table the application touches, as one handle.
pub trait MatchStore:
    TeamStore + PlayerStore + GameStore + LineupStore + GameEventStore + SavedLineupStore
{
}

impl<T> MatchStore for T where
    T: TeamStore + PlayerStore + GameStore + LineupStore + GameEventStore + SavedLineupStore
{
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AuthError {
    #[error("invalid or expired credentials")]
    InvalidCredentials,

    #[error("authentication backend unavailable: {0}")]
    Unavailable(String),
}

#[async_trait]
pub trait Authenticator: Send + Sync {
    /// Resolve a bearer token to the opaque id of the signed-in user.
    async fn authenticate(&self, token: &str) -> Result<String, AuthError>;
}
