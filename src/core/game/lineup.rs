// Per-game, per-player lineup entry.
//
// Invariants
// - position is Some only while location is Field.
// - playtimer_started_at is Some only while location is Field and the game clock runs.
//   Inactive entries may still carry a start instant left over from older data; folds treat
//   any Some value as a running personal clock.
// - is_starter is one-way: once true it stays true for the life of the entry.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Location {
    Bench,
    Field,
    Inactive,
}

impl Location {
    pub fn as_str(&self) -> &'static str {
        match self {
            Location::Bench => "bench",
            Location::Field => "field",
            Location::Inactive => "inactive",
        }
    }
}

impl std::fmt::Display for Location {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Point on the pitch in percent of the field bounds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    pub fn new(x: f64, y: f64) -> Self {
        Self {
            x: x.clamp(0.0, 100.0),
            y: y.clamp(0.0, 100.0),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineupEntry {
    pub entry_id: String,
    pub game_id: String,
    pub player_id: String,
    pub location: Location,
    pub position: Option<Position>,
    /// Captured the first time the clock starts with this player on the field.
    pub initial_position: Option<Position>,
    pub playtime_seconds: f64,
    pub playtimer_started_at: Option<i64>,
    pub is_starter: bool,
    pub subbed_on_count: u32,
    pub subbed_off_count: u32,
}

/// Row to insert for a player joining a game's lineup. The store fills bench defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewLineupEntry {
    pub game_id: String,
    pub player_id: String,
}

impl NewLineupEntry {
    /// Bench defaults: no position, no playtime, not a starter, no substitutions.
    pub fn into_entry(self, entry_id: impl Into<String>) -> LineupEntry {
        LineupEntry {
            entry_id: entry_id.into(),
            game_id: self.game_id,
            player_id: self.player_id,
            location: Location::Bench,
            position: None,
            initial_position: None,
            playtime_seconds: 0.0,
            playtimer_started_at: None,
            is_starter: false,
            subbed_on_count: 0,
            subbed_off_count: 0,
        }
    }
}

impl LineupEntry {
    pub fn is_clocked(&self) -> bool {
        self.playtimer_started_at.is_some()
    }
}

#[cfg(test)]
mod lineup_entry_tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(-5.0, 120.0, 0.0, 100.0)]
    #[case(40.0, 60.0, 40.0, 60.0)]
    fn it_should_clamp_positions_to_the_field(
        #[case] x: f64,
        #[case] y: f64,
        #[case] expected_x: f64,
        #[case] expected_y: f64,
    ) {
        let position = Position::new(x, y);
        assert_eq!(position, Position { x: expected_x, y: expected_y });
    }

    #[rstest]
    fn it_should_serialize_locations_in_snake_case() {
        let json = serde_json::to_value(Location::Inactive).unwrap();
        assert_eq!(json, serde_json::json!("inactive"));
    }
}
