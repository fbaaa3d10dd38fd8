// Command data type for sealing a game.
//
// Finishing is terminal and idempotent-safe; it needs no confirmation of its own.

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FinishGame {
    pub game_id: String,
    pub at: i64,
}
