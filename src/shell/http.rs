use std::sync::Arc;

use async_graphql::Data;
use async_graphql::http::{ALL_WEBSOCKET_PROTOCOLS, GraphiQLSource};
use async_graphql_axum::{GraphQLProtocol, GraphQLRequest, GraphQLResponse, GraphQLWebSocket};
use axum::{
    Router,
    extract::{State, WebSocketUpgrade},
    response::{Html, IntoResponse, Response},
    routing::{delete, get, post, put},
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::adapters::in_memory::in_memory_database::InMemoryDatabase;
use crate::adapters::in_memory::static_token_authenticator::StaticTokenAuthenticator;
use crate::adapters::inbound::http::session::CurrentSession;
use crate::adapters::inbound::http::{events, games, lineup, roster, saved_lineups, session, stats};
use crate::application::command_handlers::session_handler::SessionHandler;
use crate::shell::state::AppState;

type Sessions = Arc<SessionHandler<InMemoryDatabase, StaticTokenAuthenticator>>;

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/team", get(session::team))
        .route("/team/profile", post(roster::update_team))
        .route("/session/refresh", post(session::refresh))
        .route("/session/sign-out", post(session::sign_out))
        .route("/games", get(games::list).post(games::create))
        .route(
            "/games/{game_id}",
            get(games::show).put(games::update).delete(games::delete),
        )
        .route("/games/{game_id}/summary", get(games::summary))
        .route("/games/{game_id}/live", get(games::live))
        .route("/games/{game_id}/clock/start", post(games::start))
        .route("/games/{game_id}/clock/stop", post(games::stop))
        .route("/games/{game_id}/finish", post(games::finish))
        .route("/games/{game_id}/moves", post(lineup::move_player))
        .route("/games/{game_id}/substitutions", post(lineup::substitute))
        .route("/games/{game_id}/reset", post(lineup::reset))
        .route("/games/{game_id}/events", post(events::record))
        .route("/games/{game_id}/events/remove-last", post(events::remove_last))
        .route("/roster", get(roster::list))
        .route("/roster/players", post(roster::add))
        .route(
            "/roster/players/{player_id}",
            put(roster::update).delete(roster::delete),
        )
        .route("/roster/moves", post(roster::move_player))
        .route("/roster/swaps", post(roster::swap))
        .route("/roster/reset", post(roster::reset))
        .route("/lineups", get(saved_lineups::list).post(saved_lineups::save))
        .route("/lineups/{lineup_id}", delete(saved_lineups::delete))
        .route("/lineups/{lineup_id}/load", post(saved_lineups::load))
        .route("/stats", get(stats::season))
        .route("/history", get(stats::history))
        .route("/gql", get(graphiql).post(graphql))
        .route("/gql/ws", get(graphql_ws))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

async fn graphiql() -> impl IntoResponse {
    Html(
        GraphiQLSource::build()
            .endpoint("/gql")
            .subscription_endpoint("/gql/ws")
            .finish(),
    )
}

async fn graphql(
    State(state): State<AppState>,
    CurrentSession(session): CurrentSession,
    request: GraphQLRequest,
) -> GraphQLResponse {
    state
        .schema
        .execute(request.into_inner().data(session))
        .await
        .into()
}

/// Subscriptions authenticate once, with `{"token": "..."}` as the connection init payload.
async fn graphql_ws(
    State(state): State<AppState>,
    protocol: GraphQLProtocol,
    upgrade: WebSocketUpgrade,
) -> Response {
    upgrade
        .protocols(ALL_WEBSOCKET_PROTOCOLS)
        .on_upgrade(move |stream| {
            let sessions = state.sessions.clone();
            GraphQLWebSocket::new(stream, state.schema.clone(), protocol)
                .on_connection_init(move |payload| connection_data(sessions, payload))
                .serve()
        })
}

async fn connection_data(sessions: Sessions, payload: serde_json::Value) -> async_graphql::Result<Data> {
    let token = payload
        .get("token")
        .and_then(|token| token.as_str())
        .ok_or_else(|| async_graphql::Error::new("Please sign in again."))?;
    let session = sessions
        .sign_in(token)
        .await
        .map_err(|error| async_graphql::Error::new(error.user_message()))?;

    let mut data = Data::default();
    data.insert(session);
    Ok(data)
}
