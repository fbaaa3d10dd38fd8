// Pure decision functions for roster placement.
//
// Responsibilities
// - Keep a position only on the field.
// - Swap two placements as two updates; the caller persists them one at a time.
// - Reset everybody to the bench, touching only players that are not there already.

use crate::core::roster::decider::placement::command::{MoveRosterPlayer, SwapRosterPlayers};
use crate::core::roster::decider::{RosterDecideError, roster_player};
use crate::core::roster::player::{Player, PlayerPlacement, RosterLocation};

pub fn decide_move_roster_player(
    roster: &[Player],
    command: &MoveRosterPlayer,
) -> Result<PlayerPlacement, RosterDecideError> {
    let player = roster_player(roster, &command.player_id)?;
    Ok(PlayerPlacement {
        player_id: player.player_id.clone(),
        location: command.to,
        position: match command.to {
            RosterLocation::Field => command.position,
            RosterLocation::Bench => None,
        },
    })
}

pub fn decide_swap(
    roster: &[Player],
    command: &SwapRosterPlayers,
) -> Result<[PlayerPlacement; 2], RosterDecideError> {
    if command.first_player_id == command.second_player_id {
        return Err(RosterDecideError::SamePlayer);
    }
    let first = roster_player(roster, &command.first_player_id)?;
    let second = roster_player(roster, &command.second_player_id)?;
    Ok([
        PlayerPlacement {
            player_id: first.player_id.clone(),
            ..second.placement()
        },
        PlayerPlacement {
            player_id: second.player_id.clone(),
            ..first.placement()
        },
    ])
}

pub fn decide_reset_roster(roster: &[Player]) -> Vec<PlayerPlacement> {
    roster
        .iter()
        .filter(|player| player.location != RosterLocation::Bench || player.position.is_some())
        .map(|player| PlayerPlacement {
            player_id: player.player_id.clone(),
            location: RosterLocation::Bench,
            position: None,
        })
        .collect()
}
