// Bearer-token session extraction and the session routes.

use std::sync::Arc;

use axum::{
    Json,
    extract::{FromRequestParts, State},
    http::{HeaderMap, StatusCode, header::AUTHORIZATION, request::Parts},
};

use crate::application::errors::ApplicationError;
use crate::application::session::{TeamMirror, TeamSession};
use crate::core::ports::AuthError;
use crate::shell::state::AppState;

/// The signed-in team session behind the request's bearer token.
pub struct CurrentSession(pub Arc<TeamSession>);

fn bearer_token(headers: &HeaderMap) -> Result<&str, ApplicationError> {
    headers
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .ok_or(ApplicationError::Auth(AuthError::InvalidCredentials))
}

impl FromRequestParts<AppState> for CurrentSession {
    type Rejection = ApplicationError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let token = bearer_token(&parts.headers)?;
        state.sessions.sign_in(token).await.map(CurrentSession)
    }
}

pub async fn team(CurrentSession(session): CurrentSession) -> Json<TeamMirror> {
    Json(session.snapshot().await)
}

pub async fn refresh(
    State(state): State<AppState>,
    CurrentSession(session): CurrentSession,
) -> Result<Json<TeamMirror>, ApplicationError> {
    Ok(Json(state.sessions.refresh(&session).await?))
}

pub async fn sign_out(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<StatusCode, ApplicationError> {
    state.sessions.sign_out(bearer_token(&headers)?).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod session_http_inbound_tests {
    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    use crate::shell::http::router;
    use crate::shell::state::test_state;

    #[tokio::test]
    async fn it_should_return_401_without_a_bearer_token() {
        let response = router(test_state())
            .oneshot(Request::get("/team").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(json["kind"], "permission_denied");
        assert_eq!(json["error"], "Please sign in again.");
    }

    #[tokio::test]
    async fn it_should_return_the_team_of_a_known_token() {
        let response = router(test_state())
            .oneshot(
                Request::get("/team")
                    .header("authorization", "Bearer token-1")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(json["team"]["name"], "Test FC");
        assert_eq!(json["players"], serde_json::json!([]));
    }
}
