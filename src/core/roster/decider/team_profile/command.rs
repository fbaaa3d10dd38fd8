#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateTeamProfile {
    pub name: Option<String>,
    /// Some(None) removes the logo.
    pub logo_url: Option<Option<String>>,
}
