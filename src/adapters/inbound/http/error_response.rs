// Mapping of application errors onto HTTP responses.
//
// The body always carries the short user message and the error kind:
// {"error": "...", "kind": "constraint" | "permission_denied" | "not_found" | "network" | "precondition"}

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;

use crate::application::errors::{ApplicationError, ErrorKind};
use crate::core::game::decider::DecideError;
use crate::core::ports::AuthError;

#[derive(Serialize)]
pub struct ErrorBody {
    pub error: String,
    pub kind: ErrorKind,
}

fn status_of(error: &ApplicationError) -> StatusCode {
    match error {
        ApplicationError::Auth(AuthError::InvalidCredentials) => StatusCode::UNAUTHORIZED,
        ApplicationError::Decide(DecideError::ConfirmationRequired) => {
            StatusCode::PRECONDITION_REQUIRED
        }
        ApplicationError::Decide(
            DecideError::AssistWithoutScorer
            | DecideError::SelfAssist
            | DecideError::InvalidSubstitution
            | DecideError::SamePlayer
            | DecideError::EmptyOpponent,
        )
        | ApplicationError::Roster(_) => StatusCode::UNPROCESSABLE_ENTITY,
        other => match other.kind() {
            ErrorKind::Constraint | ErrorKind::Precondition => StatusCode::CONFLICT,
            ErrorKind::PermissionDenied => StatusCode::FORBIDDEN,
            ErrorKind::NotFound => StatusCode::NOT_FOUND,
            ErrorKind::Network => StatusCode::SERVICE_UNAVAILABLE,
        },
    }
}

impl IntoResponse for ApplicationError {
    fn into_response(self) -> Response {
        let status = status_of(&self);
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        }
        (
            status,
            Json(ErrorBody {
                error: self.user_message(),
                kind: self.kind(),
            }),
        )
            .into_response()
    }
}

#[cfg(test)]
mod error_response_tests {
    use super::*;
    use crate::core::ports::PersistenceError;
    use crate::core::roster::decider::RosterDecideError;
    use rstest::rstest;

    #[rstest]
    #[case(ApplicationError::Auth(AuthError::InvalidCredentials), StatusCode::UNAUTHORIZED)]
    #[case(ApplicationError::Decide(DecideError::ConfirmationRequired), StatusCode::PRECONDITION_REQUIRED)]
    #[case(ApplicationError::Decide(DecideError::TimerAlreadyRunning), StatusCode::CONFLICT)]
    #[case(ApplicationError::Decide(DecideError::SelfAssist), StatusCode::UNPROCESSABLE_ENTITY)]
    #[case(ApplicationError::Roster(RosterDecideError::MissingName), StatusCode::UNPROCESSABLE_ENTITY)]
    #[case(ApplicationError::Busy { key: "game-1".into() }, StatusCode::CONFLICT)]
    #[case(ApplicationError::NotFound { what: "game", id: "g".into() }, StatusCode::NOT_FOUND)]
    #[case(
        ApplicationError::Persistence(PersistenceError::PermissionDenied { table: "games".into() }),
        StatusCode::FORBIDDEN
    )]
    #[case(
        ApplicationError::Persistence(PersistenceError::Transport("offline".into())),
        StatusCode::SERVICE_UNAVAILABLE
    )]
    fn it_should_pick_a_status_per_failure(#[case] error: ApplicationError, #[case] expected: StatusCode) {
        assert_eq!(error.into_response().status(), expected);
    }
}
