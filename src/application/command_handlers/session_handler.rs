// Session handler: sign-in, sign-out and mirror reloads.
//
// Responsibilities
// - Resolve a bearer token to a user through the Authenticator port.
// - Find the user's team, creating it with the default name on first sign-in.
// - Load roster, games (with lineup and events) and saved lineups into a TeamSession.
// - Keep one live session per user in the SessionRegistry.

use std::collections::BTreeMap;
use std::sync::Arc;

use crate::application::errors::ApplicationError;
use crate::application::session::{SessionRegistry, TeamMirror, TeamSession};
use crate::core::game::sheet::GameSheet;
use crate::core::ports::{Authenticator, MatchStore};
use crate::core::team::{NewTeam, Team};

/// Read everything a team owns into a fresh mirror.
pub async fn load_mirror<TStore>(store: &TStore, team: Team) -> Result<TeamMirror, ApplicationError>
where
    TStore: MatchStore + ?Sized,
{
    let players = store.list_players(&team.team_id).await?;
    let mut games = BTreeMap::new();
    for game in store.list_games(&team.team_id).await? {
        let lineup = store.list_entries(&team.team_id, &game.game_id).await?;
        let events = store.list_events(&team.team_id, &game.game_id).await?;
        games.insert(
            game.game_id.clone(),
            GameSheet {
                game,
                lineup,
                events,
            },
        );
    }
    let saved_lineups = store.list_saved_lineups(&team.team_id).await?;
    Ok(TeamMirror {
        team,
        players,
        games,
        saved_lineups,
    })
}

pub struct SessionHandler<TStore, TAuth>
where
    TStore: MatchStore + 'static,
    TAuth: Authenticator + 'static,
{
    store: Arc<TStore>,
    authenticator: Arc<TAuth>,
    registry: Arc<SessionRegistry>,
    default_team_name: String,
}

impl<TStore, TAuth> SessionHandler<TStore, TAuth>
where
    TStore: MatchStore + 'static,
    TAuth: Authenticator + 'static,
{
    pub fn new(
        store: Arc<TStore>,
        authenticator: Arc<TAuth>,
        registry: Arc<SessionRegistry>,
        default_team_name: impl Into<String>,
    ) -> Self {
        Self {
            store,
            authenticator,
            registry,
            default_team_name: default_team_name.into(),
        }
    }

    /// Authenticate and return the user's session, loading it on first use.
    pub async fn sign_in(&self, token: &str) -> Result<Arc<TeamSession>, ApplicationError> {
        let user_id = self.authenticator.authenticate(token).await?;
        if let Some(session) = self.registry.get(&user_id).await {
            return Ok(session);
        }

        let team = match self.store.find_team_by_owner(&user_id).await? {
            Some(team) => team,
            None => {
                let team = self
                    .store
                    .insert_team(NewTeam {
                        owner_id: user_id.clone(),
                        name: self.default_team_name.clone(),
                    })
                    .await?;
                tracing::info!(user_id = %user_id, team_id = %team.team_id, "created team on first sign-in");
                team
            }
        };

        let mirror = load_mirror(&*self.store, team).await?;
        tracing::info!(
            user_id = %user_id,
            team_id = %mirror.team.team_id,
            players = mirror.players.len(),
            games = mirror.games.len(),
            "session loaded"
        );
        Ok(self.registry.insert(TeamSession::new(user_id, mirror)).await)
    }

    pub async fn sign_out(&self, token: &str) -> Result<(), ApplicationError> {
        let user_id = self.authenticator.authenticate(token).await?;
        if self.registry.remove(&user_id).await.is_some() {
            tracing::info!(user_id = %user_id, "signed out");
        }
        Ok(())
    }

    /// Replace the mirror with what the store currently holds.
    pub async fn refresh(&self, session: &TeamSession) -> Result<TeamMirror, ApplicationError> {
        let team = self
            .store
            .find_team_by_owner(session.user_id())
            .await?
            .ok_or_else(|| ApplicationError::NotFound {
                what: "team",
                id: session.team_id().to_string(),
            })?;
        let mirror = load_mirror(&*self.store, team).await?;
        session.replace_mirror(mirror.clone()).await;
        tracing::debug!(team_id = %session.team_id(), "mirror refreshed");
        Ok(mirror)
    }
}
