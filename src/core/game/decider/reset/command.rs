// Command data type for resetting a game's lineup, events, score and clock.
//
// Destructive and not reversible. `confirmed` must be true.

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResetGameLineup {
    pub game_id: String,
    /// Players currently on the roster; each gets a fresh bench entry.
    pub roster_player_ids: Vec<String>,
    pub confirmed: bool,
}
