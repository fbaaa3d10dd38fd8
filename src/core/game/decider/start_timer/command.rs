// Command data type for starting (or resuming) the game clock.
//
// Responsibilities
// - Carry the game and the wall-clock instant of the user's intent.
// - Be independent of the transport layer.

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StartGameTimer {
    pub game_id: String,
    pub at: i64,
}
