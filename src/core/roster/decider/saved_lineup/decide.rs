// Pure decision functions for saved lineups.
//
// Responsibilities
// - Snapshot every roster player's placement under a trimmed, non-empty name.
// - Turn a snapshot back into roster placements. Players missing from the snapshot go to the
//   bench; slots of players no longer on the roster are ignored. Unchanged players are skipped.

use std::collections::HashMap;

use crate::core::roster::decider::saved_lineup::command::SaveLineup;
use crate::core::roster::decider::{RosterDecideError, trimmed};
use crate::core::roster::player::{Player, PlayerPlacement, RosterLocation};
use crate::core::roster::saved_lineup::{LineupSlot, NewSavedLineup, SavedLineup};

pub fn decide_save_lineup(
    roster: &[Player],
    command: &SaveLineup,
) -> Result<NewSavedLineup, RosterDecideError> {
    let name = trimmed(&command.name).ok_or(RosterDecideError::EmptyLineupName)?;
    let slots = roster
        .iter()
        .map(|player| LineupSlot {
            player_id: player.player_id.clone(),
            location: player.location,
            position: player.position,
        })
        .collect();
    Ok(NewSavedLineup {
        team_id: command.team_id.clone(),
        name,
        slots,
    })
}

pub fn decide_load_lineup(roster: &[Player], lineup: &SavedLineup) -> Vec<PlayerPlacement> {
    let slots: HashMap<&str, &LineupSlot> = lineup
        .slots
        .iter()
        .map(|slot| (slot.player_id.as_str(), slot))
        .collect();

    roster
        .iter()
        .filter_map(|player| {
            let target = match slots.get(player.player_id.as_str()) {
                Some(slot) => PlayerPlacement {
                    player_id: player.player_id.clone(),
                    location: slot.location,
                    position: match slot.location {
                        RosterLocation::Field => slot.position,
                        RosterLocation::Bench => None,
                    },
                },
                None => PlayerPlacement {
                    player_id: player.player_id.clone(),
                    location: RosterLocation::Bench,
                    position: None,
                },
            };
            (target != player.placement()).then_some(target)
        })
        .collect()
}

#[cfg(test)]
mod saved_lineup_decide_tests {
    use super::*;
    use crate::core::game::lineup::Position;
    use crate::test_support::fixtures::roster::PlayerBuilder;
    use rstest::{fixture, rstest};

    #[fixture]
    fn roster() -> Vec<Player> {
        vec![
            PlayerBuilder::new("keeper").on_field(50.0, 95.0).build(),
            PlayerBuilder::new("striker").on_field(50.0, 10.0).build(),
            PlayerBuilder::new("sub").build(),
        ]
    }

    #[rstest]
    fn it_should_snapshot_every_roster_player(roster: Vec<Player>) {
        let command = SaveLineup {
            team_id: "team-1".into(),
            name: "  4-4-2 ".into(),
            overwrite: false,
        };
        let snapshot = decide_save_lineup(&roster, &command).unwrap();
        assert_eq!(snapshot.name, "4-4-2");
        assert_eq!(snapshot.slots.len(), 3);
        assert_eq!(snapshot.slots[0].position, Some(Position::new(50.0, 95.0)));
    }

    #[rstest]
    fn it_should_reject_an_empty_name(roster: Vec<Player>) {
        let command = SaveLineup {
            team_id: "team-1".into(),
            name: " ".into(),
            overwrite: true,
        };
        assert_eq!(
            decide_save_lineup(&roster, &command),
            Err(RosterDecideError::EmptyLineupName)
        );
    }

    #[rstest]
    fn it_should_bench_players_missing_from_the_snapshot(roster: Vec<Player>) {
        let lineup = SavedLineup {
            lineup_id: "l-1".into(),
            team_id: "team-1".into(),
            name: "Old".into(),
            slots: vec![
                LineupSlot {
                    player_id: "sub".into(),
                    location: RosterLocation::Field,
                    position: Some(Position::new(20.0, 20.0)),
                },
                LineupSlot {
                    player_id: "keeper".into(),
                    location: RosterLocation::Field,
                    position: Some(Position::new(50.0, 95.0)),
                },
                LineupSlot {
                    player_id: "left-the-club".into(),
                    location: RosterLocation::Field,
                    position: Some(Position::new(1.0, 1.0)),
                },
            ],
        };
        let placements = decide_load_lineup(&roster, &lineup);
        assert_eq!(
            placements,
            vec![
                PlayerPlacement {
                    player_id: "striker".into(),
                    location: RosterLocation::Bench,
                    position: None,
                },
                PlayerPlacement {
                    player_id: "sub".into(),
                    location: RosterLocation::Field,
                    position: Some(Position::new(20.0, 20.0)),
                },
            ]
        );
    }
}
