// In memory implementation of every persistence port.
//
// Purpose
// - Support handler tests and local development without a hosted database.
//
// Responsibilities
// - Keep one table per entity behind a tokio RwLock and assign UUID v7 identifiers on insert.
// - Scope every call to a team: rows of another team fail with PermissionDenied.
// - Enforce the constraints the hosted database enforces: unique saved-lineup names per team,
//   foreign keys on insert and the cascades on delete.
// - Apply each call atomically. Nothing spans calls.
//
// Testing guidance
// - toggle_offline makes every call fail with a transport error.
// - fail_writes_after(n) lets n more writes succeed and fails the rest, to exercise
//   partially applied actions.
// - set_write_delay_ms keeps a write in flight long enough to overlap a second action.

use std::sync::atomic::{AtomicBool, AtomicU64, AtomicUsize, Ordering};

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::core::game::change::{GamePatch, LineupPatch};
use crate::core::game::event::{GameEvent, NewGameEvent};
use crate::core::game::lineup::{LineupEntry, NewLineupEntry};
use crate::core::game::state::{Game, GameDetails, NewGame};
use crate::core::ports::{
    GameEventStore, GameStore, LineupStore, PersistenceError, PlayerStore, SAVED_LINEUP_NAME_KEY,
    SavedLineupStore, TeamStore,
};
use crate::core::roster::player::{NewPlayer, Player, PlayerDetails, PlayerPlacement, RosterLocation};
use crate::core::roster::saved_lineup::{NewSavedLineup, SavedLineup};
use crate::core::team::{NewTeam, Team, TeamPatch};

const UNLIMITED: usize = usize::MAX;

#[derive(Default)]
struct Tables {
    teams: Vec<Team>,
    players: Vec<Player>,
    games: Vec<Game>,
    entries: Vec<LineupEntry>,
    events: Vec<GameEvent>,
    saved_lineups: Vec<SavedLineup>,
}

impl Tables {
    fn owned_game(&self, team_id: &str, game_id: &str) -> Result<&Game, PersistenceError> {
        let game = self
            .games
            .iter()
            .find(|game| game.game_id == game_id)
            .ok_or_else(|| not_found("games", game_id))?;
        if game.team_id != team_id {
            return Err(denied("games"));
        }
        Ok(game)
    }

    fn owned_game_mut(&mut self, team_id: &str, game_id: &str) -> Result<&mut Game, PersistenceError> {
        self.owned_game(team_id, game_id)?;
        self.games
            .iter_mut()
            .find(|game| game.game_id == game_id)
            .ok_or_else(|| not_found("games", game_id))
    }

    fn owned_player_mut(
        &mut self,
        team_id: &str,
        player_id: &str,
    ) -> Result<&mut Player, PersistenceError> {
        let player = self
            .players
            .iter_mut()
            .find(|player| player.player_id == player_id)
            .ok_or_else(|| not_found("players", player_id))?;
        if player.team_id != team_id {
            return Err(denied("players"));
        }
        Ok(player)
    }

    fn game_of_entry(&self, entry_id: &str) -> Result<&str, PersistenceError> {
        self.entries
            .iter()
            .find(|entry| entry.entry_id == entry_id)
            .map(|entry| entry.game_id.as_str())
            .ok_or_else(|| not_found("lineup_entries", entry_id))
    }

    fn has_team(&self, team_id: &str) -> bool {
        self.teams.iter().any(|team| team.team_id == team_id)
    }
}

fn not_found(table: &str, id: &str) -> PersistenceError {
    PersistenceError::NotFound {
        table: table.to_string(),
        id: id.to_string(),
    }
}

fn denied(table: &str) -> PersistenceError {
    PersistenceError::PermissionDenied {
        table: table.to_string(),
    }
}

fn foreign_key(constraint: &str) -> PersistenceError {
    PersistenceError::ForeignKeyViolation {
        constraint: constraint.to_string(),
    }
}

fn new_id() -> String {
    Uuid::now_v7().to_string()
}

pub struct InMemoryDatabase {
    tables: RwLock<Tables>,
    is_offline: AtomicBool,
    writes_left: AtomicUsize,
    writes_done: AtomicUsize,
    write_delay_ms: AtomicU64,
}

impl Default for InMemoryDatabase {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryDatabase {
    pub fn new() -> Self {
        Self {
            tables: RwLock::new(Tables::default()),
            is_offline: AtomicBool::new(false),
            writes_left: AtomicUsize::new(UNLIMITED),
            writes_done: AtomicUsize::new(0),
            write_delay_ms: AtomicU64::new(0),
        }
    }

    pub fn toggle_offline(&self) {
        self.is_offline.fetch_xor(true, Ordering::SeqCst);
    }

    /// Let `writes` more writes succeed, then fail every write with a transport error.
    pub fn fail_writes_after(&self, writes: usize) {
        self.writes_left.store(writes, Ordering::SeqCst);
    }

    pub fn set_write_delay_ms(&self, delay_ms: u64) {
        self.write_delay_ms.store(delay_ms, Ordering::SeqCst);
    }

    /// Writes accepted so far.
    pub fn write_count(&self) -> usize {
        self.writes_done.load(Ordering::SeqCst)
    }

    fn ensure_online(&self) -> Result<(), PersistenceError> {
        if self.is_offline.load(Ordering::SeqCst) {
            return Err(PersistenceError::Transport("In-memory database offline".into()));
        }
        Ok(())
    }

    async fn begin_write(&self) -> Result<(), PersistenceError> {
        self.ensure_online()?;
        let delay_ms = self.write_delay_ms.load(Ordering::SeqCst);
        if delay_ms > 0 {
            tokio::time::sleep(std::time::Duration::from_millis(delay_ms)).await;
        }
        self.writes_left
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |left| match left {
                UNLIMITED => Some(UNLIMITED),
                left => left.checked_sub(1),
            })
            .map_err(|_| PersistenceError::Transport("In-memory database write budget exhausted".into()))?;
        self.writes_done.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

#[async_trait]
impl TeamStore for InMemoryDatabase {
    async fn find_team_by_owner(&self, owner_id: &str) -> Result<Option<Team>, PersistenceError> {
        self.ensure_online()?;
        let tables = self.tables.read().await;
        Ok(tables.teams.iter().find(|team| team.owner_id == owner_id).cloned())
    }

    async fn insert_team(&self, team: NewTeam) -> Result<Team, PersistenceError> {
        self.begin_write().await?;
        let mut tables = self.tables.write().await;
        if tables.teams.iter().any(|known| known.owner_id == team.owner_id) {
            return Err(PersistenceError::UniqueViolation {
                constraint: "teams_owner_id_key".into(),
            });
        }
        let row = Team {
            team_id: new_id(),
            owner_id: team.owner_id,
            name: team.name,
            logo_url: None,
        };
        tracing::debug!(team_id = %row.team_id, "inserted team");
        tables.teams.push(row.clone());
        Ok(row)
    }

    async fn update_team(&self, team_id: &str, patch: &TeamPatch) -> Result<(), PersistenceError> {
        self.begin_write().await?;
        let mut tables = self.tables.write().await;
        let team = tables
            .teams
            .iter_mut()
            .find(|team| team.team_id == team_id)
            .ok_or_else(|| not_found("teams", team_id))?;
        patch.apply_to(team);
        Ok(())
    }
}

#[async_trait]
impl PlayerStore for InMemoryDatabase {
    async fn list_players(&self, team_id: &str) -> Result<Vec<Player>, PersistenceError> {
        self.ensure_online()?;
        let tables = self.tables.read().await;
        let mut players: Vec<Player> = tables
            .players
            .iter()
            .filter(|player| player.team_id == team_id)
            .cloned()
            .collect();
        players.sort_by(|a, b| {
            a.last_name
                .cmp(&b.last_name)
                .then_with(|| a.first_name.cmp(&b.first_name))
        });
        Ok(players)
    }

    async fn insert_player(&self, player: NewPlayer) -> Result<Player, PersistenceError> {
        self.begin_write().await?;
        let mut tables = self.tables.write().await;
        if !tables.has_team(&player.team_id) {
            return Err(foreign_key("players_team_id_fkey"));
        }
        let row = Player {
            player_id: new_id(),
            team_id: player.team_id,
            first_name: player.details.first_name,
            last_name: player.details.last_name,
            jersey_number: player.details.jersey_number,
            location: RosterLocation::Bench,
            position: None,
        };
        tracing::debug!(player_id = %row.player_id, "inserted player");
        tables.players.push(row.clone());
        Ok(row)
    }

    async fn update_player_details(
        &self,
        team_id: &str,
        player_id: &str,
        details: &PlayerDetails,
    ) -> Result<(), PersistenceError> {
        self.begin_write().await?;
        let mut tables = self.tables.write().await;
        details.apply_to(tables.owned_player_mut(team_id, player_id)?);
        Ok(())
    }

    async fn update_placement(
        &self,
        team_id: &str,
        placement: &PlayerPlacement,
    ) -> Result<(), PersistenceError> {
        self.begin_write().await?;
        let mut tables = self.tables.write().await;
        placement.apply_to(tables.owned_player_mut(team_id, &placement.player_id)?);
        Ok(())
    }

    async fn delete_player(&self, team_id: &str, player_id: &str) -> Result<(), PersistenceError> {
        self.begin_write().await?;
        let mut tables = self.tables.write().await;
        tables.owned_player_mut(team_id, player_id)?;
        tables.players.retain(|player| player.player_id != player_id);
        tables.entries.retain(|entry| entry.player_id != player_id);
        for event in tables.events.iter_mut() {
            event.kind.forget_player(player_id);
        }
        for lineup in tables.saved_lineups.iter_mut() {
            lineup.forget_player(player_id);
        }
        tracing::debug!(player_id, "deleted player with cascades");
        Ok(())
    }
}

#[async_trait]
impl GameStore for InMemoryDatabase {
    async fn list_games(&self, team_id: &str) -> Result<Vec<Game>, PersistenceError> {
        self.ensure_online()?;
        let tables = self.tables.read().await;
        let mut games: Vec<Game> = tables
            .games
            .iter()
            .filter(|game| game.team_id == team_id)
            .cloned()
            .collect();
        games.sort_by(|a, b| {
            b.game_date
                .cmp(&a.game_date)
                .then_with(|| b.game_time.cmp(&a.game_time))
        });
        Ok(games)
    }

    async fn find_game(&self, team_id: &str, game_id: &str) -> Result<Game, PersistenceError> {
        self.ensure_online()?;
        let tables = self.tables.read().await;
        tables.owned_game(team_id, game_id).cloned()
    }

    async fn insert_game(&self, game: NewGame) -> Result<Game, PersistenceError> {
        self.begin_write().await?;
        let mut tables = self.tables.write().await;
        if !tables.has_team(&game.team_id) {
            return Err(foreign_key("games_team_id_fkey"));
        }
        let row = game.into_game(new_id());
        tracing::debug!(game_id = %row.game_id, "inserted game");
        tables.games.push(row.clone());
        Ok(row)
    }

    async fn update_game(
        &self,
        team_id: &str,
        game_id: &str,
        patch: &GamePatch,
    ) -> Result<(), PersistenceError> {
        self.begin_write().await?;
        let mut tables = self.tables.write().await;
        patch.apply_to(tables.owned_game_mut(team_id, game_id)?);
        Ok(())
    }

    async fn update_game_details(
        &self,
        team_id: &str,
        game_id: &str,
        details: &GameDetails,
    ) -> Result<(), PersistenceError> {
        self.begin_write().await?;
        let mut tables = self.tables.write().await;
        details.apply_to(tables.owned_game_mut(team_id, game_id)?);
        Ok(())
    }

    async fn delete_game(&self, team_id: &str, game_id: &str) -> Result<(), PersistenceError> {
        self.begin_write().await?;
        let mut tables = self.tables.write().await;
        tables.owned_game(team_id, game_id)?;
        tables.games.retain(|game| game.game_id != game_id);
        tables.entries.retain(|entry| entry.game_id != game_id);
        tables.events.retain(|event| event.game_id != game_id);
        tracing::debug!(game_id, "deleted game with cascades");
        Ok(())
    }
}

#[async_trait]
impl LineupStore for InMemoryDatabase {
    async fn list_entries(
        &self,
        team_id: &str,
        game_id: &str,
    ) -> Result<Vec<LineupEntry>, PersistenceError> {
        self.ensure_online()?;
        let tables = self.tables.read().await;
        tables.owned_game(team_id, game_id)?;
        Ok(tables
            .entries
            .iter()
            .filter(|entry| entry.game_id == game_id)
            .cloned()
            .collect())
    }

    async fn insert_entries(
        &self,
        team_id: &str,
        entries: Vec<NewLineupEntry>,
    ) -> Result<Vec<LineupEntry>, PersistenceError> {
        self.begin_write().await?;
        let mut tables = self.tables.write().await;
        for (index, entry) in entries.iter().enumerate() {
            tables.owned_game(team_id, &entry.game_id)?;
            if !tables
                .players
                .iter()
                .any(|player| player.player_id == entry.player_id && player.team_id == team_id)
            {
                return Err(foreign_key("lineup_entries_player_id_fkey"));
            }
            let stored = tables
                .entries
                .iter()
                .any(|known| known.game_id == entry.game_id && known.player_id == entry.player_id);
            let earlier_in_batch = entries[..index]
                .iter()
                .any(|other| other.game_id == entry.game_id && other.player_id == entry.player_id);
            if stored || earlier_in_batch {
                return Err(PersistenceError::UniqueViolation {
                    constraint: "lineup_entries_game_id_player_id_key".into(),
                });
            }
        }
        let rows: Vec<LineupEntry> = entries
            .into_iter()
            .map(|entry| entry.into_entry(new_id()))
            .collect();
        tables.entries.extend(rows.iter().cloned());
        Ok(rows)
    }

    async fn update_entries(
        &self,
        team_id: &str,
        patches: &[LineupPatch],
    ) -> Result<(), PersistenceError> {
        self.begin_write().await?;
        let mut tables = self.tables.write().await;
        for patch in patches {
            let game_id = tables.game_of_entry(&patch.entry_id)?;
            tables.owned_game(team_id, game_id)?;
        }
        for patch in patches {
            if let Some(entry) = tables
                .entries
                .iter_mut()
                .find(|entry| entry.entry_id == patch.entry_id)
            {
                patch.apply_to(entry);
            }
        }
        Ok(())
    }

    async fn delete_entries(&self, team_id: &str, game_id: &str) -> Result<(), PersistenceError> {
        self.begin_write().await?;
        let mut tables = self.tables.write().await;
        tables.owned_game(team_id, game_id)?;
        tables.entries.retain(|entry| entry.game_id != game_id);
        Ok(())
    }
}

#[async_trait]
impl GameEventStore for InMemoryDatabase {
    async fn list_events(
        &self,
        team_id: &str,
        game_id: &str,
    ) -> Result<Vec<GameEvent>, PersistenceError> {
        self.ensure_online()?;
        let tables = self.tables.read().await;
        tables.owned_game(team_id, game_id)?;
        Ok(tables
            .events
            .iter()
            .filter(|event| event.game_id == game_id)
            .cloned()
            .collect())
    }

    async fn insert_event(
        &self,
        team_id: &str,
        event: NewGameEvent,
    ) -> Result<GameEvent, PersistenceError> {
        self.begin_write().await?;
        let mut tables = self.tables.write().await;
        match tables.owned_game(team_id, &event.game_id) {
            Err(PersistenceError::NotFound { .. }) => {
                return Err(foreign_key("game_events_game_id_fkey"));
            }
            other => {
                other?;
            }
        }
        let row = event.into_event(new_id());
        tables.events.push(row.clone());
        Ok(row)
    }

    async fn delete_event(&self, team_id: &str, event_id: &str) -> Result<(), PersistenceError> {
        self.begin_write().await?;
        let mut tables = self.tables.write().await;
        let Some(game_id) = tables
            .events
            .iter()
            .find(|event| event.event_id == event_id)
            .map(|event| event.game_id.clone())
        else {
            return Ok(());
        };
        tables.owned_game(team_id, &game_id)?;
        tables.events.retain(|event| event.event_id != event_id);
        Ok(())
    }

    async fn delete_events(&self, team_id: &str, game_id: &str) -> Result<(), PersistenceError> {
        self.begin_write().await?;
        let mut tables = self.tables.write().await;
        tables.owned_game(team_id, game_id)?;
        tables.events.retain(|event| event.game_id != game_id);
        Ok(())
    }
}

#[async_trait]
impl SavedLineupStore for InMemoryDatabase {
    async fn list_saved_lineups(&self, team_id: &str) -> Result<Vec<SavedLineup>, PersistenceError> {
        self.ensure_online()?;
        let tables = self.tables.read().await;
        let mut lineups: Vec<SavedLineup> = tables
            .saved_lineups
            .iter()
            .filter(|lineup| lineup.team_id == team_id)
            .cloned()
            .collect();
        lineups.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(lineups)
    }

    async fn insert_saved_lineup(
        &self,
        lineup: NewSavedLineup,
    ) -> Result<SavedLineup, PersistenceError> {
        self.begin_write().await?;
        let mut tables = self.tables.write().await;
        if !tables.has_team(&lineup.team_id) {
            return Err(foreign_key("saved_lineups_team_id_fkey"));
        }
        if tables
            .saved_lineups
            .iter()
            .any(|known| known.team_id == lineup.team_id && known.name == lineup.name)
        {
            return Err(PersistenceError::UniqueViolation {
                constraint: SAVED_LINEUP_NAME_KEY.into(),
            });
        }
        let row = SavedLineup {
            lineup_id: new_id(),
            team_id: lineup.team_id,
            name: lineup.name,
            slots: lineup.slots,
        };
        tables.saved_lineups.push(row.clone());
        Ok(row)
    }

    async fn upsert_saved_lineup(
        &self,
        lineup: NewSavedLineup,
    ) -> Result<SavedLineup, PersistenceError> {
        self.begin_write().await?;
        let mut tables = self.tables.write().await;
        if !tables.has_team(&lineup.team_id) {
            return Err(foreign_key("saved_lineups_team_id_fkey"));
        }
        if let Some(known) = tables
            .saved_lineups
            .iter_mut()
            .find(|known| known.team_id == lineup.team_id && known.name == lineup.name)
        {
            known.slots = lineup.slots;
            return Ok(known.clone());
        }
        let row = SavedLineup {
            lineup_id: new_id(),
            team_id: lineup.team_id,
            name: lineup.name,
            slots: lineup.slots,
        };
        tables.saved_lineups.push(row.clone());
        Ok(row)
    }

    async fn delete_saved_lineup(&self, team_id: &str, lineup_id: &str) -> Result<(), PersistenceError> {
        self.begin_write().await?;
        let mut tables = self.tables.write().await;
        let lineup = tables
            .saved_lineups
            .iter()
            .find(|lineup| lineup.lineup_id == lineup_id)
            .ok_or_else(|| not_found("saved_lineups", lineup_id))?;
        if lineup.team_id != team_id {
            return Err(denied("saved_lineups"));
        }
        tables.saved_lineups.retain(|lineup| lineup.lineup_id != lineup_id);
        Ok(())
    }
}
