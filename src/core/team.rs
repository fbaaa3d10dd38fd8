// The team owning every roster, game and saved lineup row. Root of authorization.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Team {
    pub team_id: String,
    /// Authenticated user owning the team. One user owns exactly one team.
    pub owner_id: String,
    pub name: String,
    pub logo_url: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamPatch {
    pub name: Option<String>,
    pub logo_url: Option<Option<String>>,
}

impl TeamPatch {
    pub fn apply_to(&self, team: &mut Team) {
        if let Some(name) = &self.name {
            team.name = name.clone();
        }
        if let Some(logo_url) = &self.logo_url {
            team.logo_url = logo_url.clone();
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewTeam {
    pub owner_id: String,
    pub name: String,
}
