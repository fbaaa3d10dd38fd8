// Roster command handler: players, planning placements and the team profile.
//
// Responsibilities
// - Serialize every roster mutation behind the roster busy guard.
// - Persist placements one player at a time and mirror each one as it lands. A failure after
//   the first placement is reported as partially applied.
// - Mirror the store's cascades when a player is deleted. Every game the player appears in is
//   held busy for the duration, so no game action can publish a sheet that still has them.

use std::sync::Arc;

use crate::application::errors::ApplicationError;
use crate::application::session::{ROSTER_KEY, TeamSession};
use crate::core::ports::MatchStore;
use crate::core::roster::decider::placement::command::{MoveRosterPlayer, SwapRosterPlayers};
use crate::core::roster::decider::placement::decide::{
    decide_move_roster_player, decide_reset_roster, decide_swap,
};
use crate::core::roster::decider::player::command::{AddPlayer, UpdatePlayer};
use crate::core::roster::decider::player::decide::{decide_add_player, decide_update_player};
use crate::core::roster::decider::team_profile::command::UpdateTeamProfile;
use crate::core::roster::decider::team_profile::decide::decide_team_profile;
use crate::core::roster::player::{Player, PlayerDetails, PlayerPlacement};
use crate::core::team::Team;

/// Persist placements in order, mirroring each accepted one.
pub(crate) async fn apply_placements<TStore>(
    store: &TStore,
    session: &TeamSession,
    action: &'static str,
    placements: Vec<PlayerPlacement>,
) -> Result<(), ApplicationError>
where
    TStore: MatchStore + ?Sized,
{
    let mut applied = 0usize;
    for placement in placements {
        if let Err(source) = store.update_placement(session.team_id(), &placement).await {
            if applied == 0 {
                return Err(source.into());
            }
            tracing::warn!(action, applied, error = %source, "placements partially applied");
            return Err(ApplicationError::PartiallyApplied { action, source });
        }
        session
            .update(|mirror| {
                if let Some(player) = mirror.player_mut(&placement.player_id) {
                    placement.apply_to(player);
                }
            })
            .await;
        applied += 1;
    }
    Ok(())
}

pub struct RosterHandler<TStore>
where
    TStore: MatchStore + 'static,
{
    store: Arc<TStore>,
}

impl<TStore> RosterHandler<TStore>
where
    TStore: MatchStore + 'static,
{
    pub fn new(store: Arc<TStore>) -> Self {
        Self { store }
    }

    pub async fn add_player(
        &self,
        session: &TeamSession,
        details: PlayerDetails,
    ) -> Result<Player, ApplicationError> {
        let _busy = session.begin(ROSTER_KEY)?;
        let new_player = decide_add_player(&AddPlayer {
            team_id: session.team_id().to_string(),
            details,
        })?;

        let player = self.store.insert_player(new_player).await?;
        session
            .update(|mirror| mirror.players.push(player.clone()))
            .await;
        tracing::info!(player_id = %player.player_id, "player added");
        Ok(player)
    }

    pub async fn update_player(
        &self,
        session: &TeamSession,
        command: UpdatePlayer,
    ) -> Result<Player, ApplicationError> {
        let _busy = session.begin(ROSTER_KEY)?;
        let mut player = self.mirrored_player(session, &command.player_id).await?;
        let details = decide_update_player(&command)?;

        self.store
            .update_player_details(session.team_id(), &command.player_id, &details)
            .await?;
        details.apply_to(&mut player);
        session
            .update(|mirror| {
                if let Some(known) = mirror.player_mut(&player.player_id) {
                    *known = player.clone();
                }
            })
            .await;
        Ok(player)
    }

    /// Removes the player with its lineup entries, event references and saved-lineup slots.
    pub async fn delete_player(
        &self,
        session: &TeamSession,
        player_id: &str,
    ) -> Result<(), ApplicationError> {
        let _busy = session.begin(ROSTER_KEY)?;
        self.mirrored_player(session, player_id).await?;
        let touched_games = session.snapshot().await.games_with_player(player_id);
        let _games_busy = touched_games
            .iter()
            .map(|game_id| session.begin(game_id))
            .collect::<Result<Vec<_>, _>>()?;

        self.store.delete_player(session.team_id(), player_id).await?;
        session
            .update(|mirror| {
                mirror.players.retain(|player| player.player_id != player_id);
                for sheet in mirror.games.values_mut() {
                    sheet.lineup.retain(|entry| entry.player_id != player_id);
                    for event in sheet.events.iter_mut() {
                        event.kind.forget_player(player_id);
                    }
                }
                for lineup in mirror.saved_lineups.iter_mut() {
                    lineup.forget_player(player_id);
                }
            })
            .await;
        tracing::info!(player_id, "player deleted");
        Ok(())
    }

    pub async fn move_player(
        &self,
        session: &TeamSession,
        command: MoveRosterPlayer,
    ) -> Result<PlayerPlacement, ApplicationError> {
        let _busy = session.begin(ROSTER_KEY)?;
        let placement = decide_move_roster_player(&session.roster().await, &command)?;
        apply_placements(&*self.store, session, "move", vec![placement.clone()]).await?;
        Ok(placement)
    }

    /// Two independent updates: a failure of the second leaves the first in place.
    pub async fn swap(
        &self,
        session: &TeamSession,
        command: SwapRosterPlayers,
    ) -> Result<[PlayerPlacement; 2], ApplicationError> {
        let _busy = session.begin(ROSTER_KEY)?;
        let placements = decide_swap(&session.roster().await, &command)?;
        apply_placements(&*self.store, session, "swap", placements.to_vec()).await?;
        Ok(placements)
    }

    pub async fn reset_roster(&self, session: &TeamSession) -> Result<Vec<Player>, ApplicationError> {
        let _busy = session.begin(ROSTER_KEY)?;
        let placements = decide_reset_roster(&session.roster().await);
        let moved = placements.len();
        apply_placements(&*self.store, session, "roster reset", placements).await?;
        tracing::info!(moved, "roster reset to the bench");
        Ok(session.roster().await)
    }

    pub async fn update_team_profile(
        &self,
        session: &TeamSession,
        command: UpdateTeamProfile,
    ) -> Result<Team, ApplicationError> {
        let _busy = session.begin(ROSTER_KEY)?;
        let patch = decide_team_profile(&command)?;

        self.store.update_team(session.team_id(), &patch).await?;
        let team = session
            .update(|mirror| {
                patch.apply_to(&mut mirror.team);
                mirror.team.clone()
            })
            .await;
        Ok(team)
    }

    async fn mirrored_player(
        &self,
        session: &TeamSession,
        player_id: &str,
    ) -> Result<Player, ApplicationError> {
        session
            .roster()
            .await
            .into_iter()
            .find(|player| player.player_id == player_id)
            .ok_or_else(|| ApplicationError::NotFound {
                what: "player",
                id: player_id.to_string(),
            })
    }
}
