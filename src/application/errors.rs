// Application errors: what a caller of any handler can get back.
//
// Purpose
// - Wrap store, decider and authentication failures in one closed type.
// - Classify each failure into constraint, permission, not found, network or precondition.
// - Turn it into a short message a coach can act on.
//
// Boundaries
// - Classification reads the tagged variants only; the error text is never parsed.

use serde::Serialize;
use thiserror::Error;

use crate::core::game::decider::DecideError;
use crate::core::ports::{AuthError, PersistenceError, SAVED_LINEUP_NAME_KEY};
use crate::core::roster::decider::RosterDecideError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    Constraint,
    PermissionDenied,
    NotFound,
    Network,
    Precondition,
}

#[derive(Debug, Error)]
pub enum ApplicationError {
    #[error(transparent)]
    Persistence(#[from] PersistenceError),

    #[error(transparent)]
    Decide(#[from] DecideError),

    #[error(transparent)]
    Roster(#[from] RosterDecideError),

    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error("another change to {key} is still in flight")]
    Busy { key: String },

    #[error("{what} {id} not found")]
    NotFound { what: &'static str, id: String },

    #[error("{action} was only partially applied: {source}")]
    PartiallyApplied {
        action: &'static str,
        source: PersistenceError,
    },
}

impl ApplicationError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ApplicationError::Persistence(error)
            | ApplicationError::PartiallyApplied { source: error, .. } => persistence_kind(error),
            ApplicationError::Decide(_)
            | ApplicationError::Roster(_)
            | ApplicationError::Busy { .. } => ErrorKind::Precondition,
            ApplicationError::Auth(AuthError::InvalidCredentials) => ErrorKind::PermissionDenied,
            ApplicationError::Auth(AuthError::Unavailable(_)) => ErrorKind::Network,
            ApplicationError::NotFound { .. } => ErrorKind::NotFound,
        }
    }

    pub fn user_message(&self) -> String {
        match self {
            ApplicationError::Persistence(error) => persistence_message(error).to_string(),
            ApplicationError::PartiallyApplied { action, source } => format!(
                "Only part of the {action} was saved. {} Check the lineup before continuing.",
                persistence_message(source)
            ),
            ApplicationError::Decide(error) => sentence(&error.to_string()),
            ApplicationError::Roster(error) => sentence(&error.to_string()),
            ApplicationError::Auth(AuthError::InvalidCredentials) => {
                "Please sign in again.".to_string()
            }
            ApplicationError::Auth(AuthError::Unavailable(_)) => {
                "Could not reach the sign-in service. Please try again.".to_string()
            }
            ApplicationError::Busy { .. } => {
                "Please wait until the previous action has finished.".to_string()
            }
            ApplicationError::NotFound { .. } => {
                "The requested item could not be found.".to_string()
            }
        }
    }
}

fn persistence_kind(error: &PersistenceError) -> ErrorKind {
    match error {
        PersistenceError::UniqueViolation { .. } | PersistenceError::ForeignKeyViolation { .. } => {
            ErrorKind::Constraint
        }
        PersistenceError::PermissionDenied { .. } => ErrorKind::PermissionDenied,
        PersistenceError::NotFound { .. } => ErrorKind::NotFound,
        PersistenceError::Transport(_) => ErrorKind::Network,
    }
}

fn persistence_message(error: &PersistenceError) -> &'static str {
    match error {
        PersistenceError::UniqueViolation { constraint } if constraint == SAVED_LINEUP_NAME_KEY => {
            "A lineup with this name already exists."
        }
        PersistenceError::UniqueViolation { .. } => {
            "This item already exists or conflicts with another item."
        }
        PersistenceError::ForeignKeyViolation { .. } => {
            "Could not perform action due to related data. Please check dependencies."
        }
        PersistenceError::PermissionDenied { .. } => {
            "You do not have permission to perform this action."
        }
        PersistenceError::NotFound { .. } => "The requested item could not be found.",
        PersistenceError::Transport(_) => {
            "Network error. Please check your connection and try again."
        }
    }
}

fn sentence(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => format!("{}{}.", first.to_uppercase(), chars.as_str()),
        None => String::new(),
    }
}

#[cfg(test)]
mod application_error_tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(PersistenceError::UniqueViolation { constraint: SAVED_LINEUP_NAME_KEY.into() }, ErrorKind::Constraint)]
    #[case(PersistenceError::ForeignKeyViolation { constraint: "lineup_entries_player_id_fkey".into() }, ErrorKind::Constraint)]
    #[case(PersistenceError::PermissionDenied { table: "games".into() }, ErrorKind::PermissionDenied)]
    #[case(PersistenceError::NotFound { table: "games".into(), id: "g".into() }, ErrorKind::NotFound)]
    #[case(PersistenceError::Transport("offline".into()), ErrorKind::Network)]
    fn it_should_classify_store_failures(#[case] error: PersistenceError, #[case] expected: ErrorKind) {
        assert_eq!(ApplicationError::from(error).kind(), expected);
    }

    #[rstest]
    fn it_should_name_a_duplicate_lineup() {
        let error = ApplicationError::from(PersistenceError::UniqueViolation {
            constraint: SAVED_LINEUP_NAME_KEY.into(),
        });
        assert_eq!(error.user_message(), "A lineup with this name already exists.");
    }

    #[rstest]
    fn it_should_treat_local_checks_as_preconditions() {
        let error = ApplicationError::from(DecideError::TimerAlreadyRunning);
        assert_eq!(error.kind(), ErrorKind::Precondition);
        assert_eq!(error.user_message(), "The game clock is already running.");
        let busy = ApplicationError::Busy { key: "game-1".into() };
        assert_eq!(busy.kind(), ErrorKind::Precondition);
    }

    #[rstest]
    fn it_should_classify_partial_failures_by_their_cause() {
        let error = ApplicationError::PartiallyApplied {
            action: "substitution",
            source: PersistenceError::Transport("offline".into()),
        };
        assert_eq!(error.kind(), ErrorKind::Network);
        assert!(error.user_message().starts_with("Only part of the substitution was saved."));
    }
}
