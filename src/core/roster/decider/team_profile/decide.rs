use crate::core::roster::decider::team_profile::command::UpdateTeamProfile;
use crate::core::roster::decider::{RosterDecideError, trimmed};
use crate::core::team::TeamPatch;

pub fn decide_team_profile(command: &UpdateTeamProfile) -> Result<TeamPatch, RosterDecideError> {
    let name = match &command.name {
        Some(name) => Some(trimmed(name).ok_or(RosterDecideError::EmptyTeamName)?),
        None => None,
    };
    let logo_url = command
        .logo_url
        .as_ref()
        .map(|logo| logo.as_deref().and_then(trimmed));
    Ok(TeamPatch { name, logo_url })
}

#[cfg(test)]
mod team_profile_decide_tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn it_should_trim_the_name_and_clear_a_blank_logo() {
        let patch = decide_team_profile(&UpdateTeamProfile {
            name: Some(" Lions U10 ".into()),
            logo_url: Some(Some("".into())),
        })
        .unwrap();
        assert_eq!(patch.name.as_deref(), Some("Lions U10"));
        assert_eq!(patch.logo_url, Some(None));
    }

    #[rstest]
    fn it_should_reject_a_blank_name() {
        let command = UpdateTeamProfile {
            name: Some("   ".into()),
            logo_url: None,
        };
        assert_eq!(decide_team_profile(&command), Err(RosterDecideError::EmptyTeamName));
    }
}
