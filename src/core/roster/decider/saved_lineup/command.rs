#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaveLineup {
    pub team_id: String,
    pub name: String,
    /// Replace a same-named lineup instead of failing on the unique name.
    pub overwrite: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadLineup {
    pub lineup_id: String,
}
