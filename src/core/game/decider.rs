// Pure decision logic per game command.
//
// Every decider validates its command against the current game sheet and returns the ordered
// list of changes to persist, or a precondition failure. None of them perform input or output.

use thiserror::Error;

use crate::core::game::lineup::Location;
use crate::core::game::state::Game;

pub mod start_timer {
    pub mod command;
    pub mod decide;
}
pub mod stop_timer {
    pub mod command;
    pub mod decide;
}
pub mod finish {
    pub mod command;
    pub mod decide;
}
pub mod move_player {
    pub mod command;
    pub mod decide;
}
pub mod reset {
    pub mod command;
    pub mod decide;
}
pub mod add_event {
    pub mod command;
    pub mod decide;
}
pub mod remove_last_event {
    pub mod command;
    pub mod decide;
}
pub mod schedule {
    pub mod command;
    pub mod decide;
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DecideError {
    #[error("the game is finished and cannot be restarted")]
    GameFinished,
    #[error("the game clock is already running")]
    TimerAlreadyRunning,
    #[error("the game clock is not running")]
    TimerNotRunning,
    #[error("this action needs confirmation")]
    ConfirmationRequired,
    #[error("player {player_id} is not in this game's lineup")]
    PlayerNotInLineup { player_id: String },
    #[error("player {player_id} is on the {actual}, not the {expected}")]
    LocationMismatch {
        player_id: String,
        expected: Location,
        actual: Location,
    },
    #[error("a player cannot be substituted for themselves")]
    SamePlayer,
    #[error("an assist needs a scorer")]
    AssistWithoutScorer,
    #[error("a player cannot assist their own goal")]
    SelfAssist,
    #[error("a substitution event names exactly one player coming on or going off")]
    InvalidSubstitution,
    #[error("opponent name must not be empty")]
    EmptyOpponent,
}

/// Mutations other than finishing require explicit confirmation once a game is finished.
pub fn ensure_editable(game: &Game, confirmed: bool) -> Result<(), DecideError> {
    if game.is_finished && !confirmed {
        return Err(DecideError::ConfirmationRequired);
    }
    Ok(())
}

#[cfg(test)]
mod decider_guard_tests {
    use super::*;
    use crate::test_support::fixtures::games::GameBuilder;
    use rstest::rstest;

    #[rstest]
    #[case(false, false, true)]
    #[case(false, true, true)]
    #[case(true, false, false)]
    #[case(true, true, true)]
    fn it_should_gate_finished_games_behind_confirmation(
        #[case] finished: bool,
        #[case] confirmed: bool,
        #[case] allowed: bool,
    ) {
        let mut builder = GameBuilder::new();
        if finished {
            builder = builder.finished();
        }
        let result = ensure_editable(&builder.build(), confirmed);
        assert_eq!(result.is_ok(), allowed);
    }
}
