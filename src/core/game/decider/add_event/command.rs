// Command data type for appending a goal or a single-sided substitution to a game's event log.

use crate::core::game::event::GameEventKind;
use crate::core::game::state::Side;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordGameEvent {
    pub game_id: String,
    pub side: Side,
    pub kind: GameEventKind,
    /// Wall-clock instant of the action, epoch milliseconds.
    pub at: i64,
    /// Game-clock second to stamp; defaults to the clock reading at `at`.
    pub game_seconds: Option<u32>,
    pub confirmed: bool,
}
