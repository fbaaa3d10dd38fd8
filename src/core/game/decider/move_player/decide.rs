// Pure decision function for lineup moves during a game.
//
// Responsibilities
// - Reject a move whose `from` does not match the player's current location.
// - Fold a running personal clock when leaving the field (or an inactive spot that is still
//   clocked), start a fresh one when entering the field under a running game clock.
// - Keep a position only on the field.
// - Once the game is active, count bench->field and field->bench moves as substitutions and
//   append a single-sided substitution event at the current game-clock second.
//
// A substitution of two players is two moves. decide_substitution validates both up front and
// returns the pair; persisting them is best effort, not atomic.

use crate::core::game::change::{GameChange, LineupPatch};
use crate::core::game::decider::move_player::command::{MovePlayerInGame, SubstitutePlayers};
use crate::core::game::decider::{DecideError, ensure_editable};
use crate::core::game::event::{GameEventKind, NewGameEvent};
use crate::core::game::lineup::{LineupEntry, Location};
use crate::core::game::playtime::fold_elapsed;
use crate::core::game::sheet::GameSheet;

fn current_entry<'a>(sheet: &'a GameSheet, player_id: &str) -> Result<&'a LineupEntry, DecideError> {
    sheet
        .entry_for(player_id)
        .ok_or_else(|| DecideError::PlayerNotInLineup {
            player_id: player_id.to_string(),
        })
}

fn expect_location(entry: &LineupEntry, expected: Location) -> Result<(), DecideError> {
    if entry.location != expected {
        return Err(DecideError::LocationMismatch {
            player_id: entry.player_id.clone(),
            expected,
            actual: entry.location,
        });
    }
    Ok(())
}

pub fn decide_move_player(
    sheet: &GameSheet,
    command: &MovePlayerInGame,
) -> Result<Vec<GameChange>, DecideError> {
    let game = &sheet.game;
    ensure_editable(game, command.confirmed)?;
    let entry = current_entry(sheet, &command.player_id)?;
    expect_location(entry, command.from)?;

    let mut patch = LineupPatch::for_entry(&entry.entry_id);
    let mut started_at = entry.playtimer_started_at;

    if matches!(command.from, Location::Field | Location::Inactive) && started_at.is_some() {
        patch.playtime_seconds = Some(fold_elapsed(entry, command.at));
        started_at = None;
    }
    if command.to == Location::Field {
        if game.is_running() && started_at.is_none() {
            started_at = Some(command.at);
        }
    } else {
        started_at = None;
    }

    patch.location = Some(command.to);
    patch.position = Some(match command.to {
        Location::Field => command.position,
        _ => None,
    });
    patch.playtimer_started_at = Some(started_at);

    let mut event = None;
    if game.is_active() {
        let kind = match (command.from, command.to) {
            (Location::Bench, Location::Field) => {
                patch.subbed_on_count = Some(entry.subbed_on_count + 1);
                Some(GameEventKind::player_in(&command.player_id))
            }
            (Location::Field, Location::Bench) => {
                patch.subbed_off_count = Some(entry.subbed_off_count + 1);
                Some(GameEventKind::player_out(&command.player_id))
            }
            _ => None,
        };
        event = kind.map(|kind| NewGameEvent {
            game_id: game.game_id.clone(),
            side: game.venue,
            kind,
            recorded_at: command.at,
            game_seconds: game.clock_seconds(command.at).round() as u32,
        });
    }

    let mut changes = vec![GameChange::LineupUpdated(vec![patch])];
    if let Some(event) = event {
        changes.push(GameChange::EventAppended(event));
    }
    Ok(changes)
}

/// Validate a planned substitution and split it into its two moves, outgoing player first.
pub fn decide_substitution(
    sheet: &GameSheet,
    command: &SubstitutePlayers,
) -> Result<(MovePlayerInGame, MovePlayerInGame), DecideError> {
    ensure_editable(&sheet.game, command.confirmed)?;
    if command.player_out_id == command.player_in_id {
        return Err(DecideError::SamePlayer);
    }
    let outgoing = current_entry(sheet, &command.player_out_id)?;
    expect_location(outgoing, Location::Field)?;
    let incoming = current_entry(sheet, &command.player_in_id)?;
    expect_location(incoming, Location::Bench)?;

    let off = MovePlayerInGame {
        game_id: command.game_id.clone(),
        player_id: command.player_out_id.clone(),
        from: Location::Field,
        to: Location::Bench,
        position: None,
        at: command.at,
        confirmed: command.confirmed,
    };
    let on = MovePlayerInGame {
        game_id: command.game_id.clone(),
        player_id: command.player_in_id.clone(),
        from: Location::Bench,
        to: Location::Field,
        position: outgoing.position,
        at: command.at,
        confirmed: command.confirmed,
    };
    Ok((off, on))
}
