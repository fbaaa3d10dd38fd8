use crate::core::game::lineup::Position;
use crate::core::roster::player::{Player, RosterLocation};
use crate::test_support::fixtures::games::TEAM_ID;

pub struct PlayerBuilder {
    inner: Player,
}

#[allow(dead_code)]
impl PlayerBuilder {
    /// A benched player named after their id.
    pub fn new(player_id: &str) -> Self {
        Self {
            inner: Player {
                player_id: player_id.to_string(),
                team_id: TEAM_ID.to_string(),
                first_name: player_id.to_string(),
                last_name: "Tester".to_string(),
                jersey_number: None,
                location: RosterLocation::Bench,
                position: None,
            },
        }
    }

    pub fn named(mut self, first_name: &str, last_name: &str) -> Self {
        self.inner.first_name = first_name.to_string();
        self.inner.last_name = last_name.to_string();
        self
    }

    pub fn on_field(mut self, x: f64, y: f64) -> Self {
        self.inner.location = RosterLocation::Field;
        self.inner.position = Some(Position::new(x, y));
        self
    }

    pub fn build(self) -> Player {
        self.inner
    }
}
