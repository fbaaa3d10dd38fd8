// Read-only GraphQL surface over the session mirror, plus a live board subscription.
//
// The signed-in session travels in the request data. Queries never write to the store.

use std::sync::Arc;

use async_graphql::futures_util::StreamExt;
use async_graphql::futures_util::stream::{self, Stream};
use async_graphql::{Context, EmptyMutation, Object, Result as GqlResult, Schema, SimpleObject, Subscription};
use chrono::Utc;
use serde::Serialize;

use crate::application::errors::ApplicationError;
use crate::application::live_ticker::LiveTicker;
use crate::application::query_handlers::{game_queries, stats_queries};
use crate::application::session::TeamSession;
use crate::core::game::event::GameEvent;
use crate::core::game::lineup::LineupEntry;
use crate::core::game::live::LiveBoard;
use crate::core::game::report::{GameSummary, TimelineItem, minute_label};
use crate::core::game::sheet::GameSheet;
use crate::core::game::state::Game;
use crate::core::stats::{PlayerSeasonLine, SeasonStats, StatsFilter};

pub type AppSchema = Schema<QueryRoot, EmptyMutation, SubscriptionRoot>;

pub fn build_schema(ticker: Arc<LiveTicker>) -> AppSchema {
    Schema::build(QueryRoot, EmptyMutation, SubscriptionRoot)
        .data(ticker)
        .finish()
}

// snake_case wire name of a serde enum
fn label<T: Serialize>(value: &T) -> String {
    serde_json::to_value(value)
        .ok()
        .and_then(|value| value.as_str().map(str::to_string))
        .unwrap_or_default()
}

#[derive(SimpleObject, Clone)]
pub struct GqlGame {
    pub game_id: String,
    pub opponent: String,
    pub game_date: String,
    pub game_time: Option<String>,
    pub venue: String,
    pub season: Option<String>,
    pub competition: Option<String>,
    pub home_score: u32,
    pub away_score: u32,
    pub timer_status: String,
    pub elapsed_seconds: f64,
    pub is_finished: bool,
}

impl From<Game> for GqlGame {
    fn from(game: Game) -> Self {
        Self {
            venue: game.venue.as_str().to_string(),
            timer_status: label(&game.timer_status),
            game_date: game.game_date.to_string(),
            game_time: game.game_time.map(|time| time.format("%H:%M").to_string()),
            game_id: game.game_id,
            opponent: game.opponent,
            season: game.season,
            competition: game.competition,
            home_score: game.home_score,
            away_score: game.away_score,
            elapsed_seconds: game.elapsed_seconds,
            is_finished: game.is_finished,
        }
    }
}

#[derive(SimpleObject, Clone)]
pub struct GqlLineupEntry {
    pub player_id: String,
    pub location: String,
    pub x: Option<f64>,
    pub y: Option<f64>,
    pub playtime_seconds: f64,
    pub is_starter: bool,
    pub subbed_on_count: u32,
    pub subbed_off_count: u32,
}

impl From<LineupEntry> for GqlLineupEntry {
    fn from(entry: LineupEntry) -> Self {
        Self {
            location: entry.location.as_str().to_string(),
            x: entry.position.map(|position| position.x),
            y: entry.position.map(|position| position.y),
            player_id: entry.player_id,
            playtime_seconds: entry.playtime_seconds,
            is_starter: entry.is_starter,
            subbed_on_count: entry.subbed_on_count,
            subbed_off_count: entry.subbed_off_count,
        }
    }
}

#[derive(SimpleObject, Clone)]
pub struct GqlGameEvent {
    pub event_id: String,
    pub side: String,
    pub event_type: String,
    pub minute: String,
    pub game_seconds: u32,
    pub player_ids: Vec<String>,
}

impl From<GameEvent> for GqlGameEvent {
    fn from(event: GameEvent) -> Self {
        Self {
            side: event.side.as_str().to_string(),
            event_type: label(&event.event_type()),
            minute: minute_label(event.game_seconds),
            game_seconds: event.game_seconds,
            player_ids: event.kind.player_ids().map(str::to_string).collect(),
            event_id: event.event_id,
        }
    }
}

#[derive(SimpleObject, Clone)]
pub struct GqlGameSheet {
    pub game: GqlGame,
    pub lineup: Vec<GqlLineupEntry>,
    pub events: Vec<GqlGameEvent>,
}

impl From<GameSheet> for GqlGameSheet {
    fn from(sheet: GameSheet) -> Self {
        Self {
            game: sheet.game.into(),
            lineup: sheet.lineup.into_iter().map(Into::into).collect(),
            events: sheet.events.into_iter().map(Into::into).collect(),
        }
    }
}

#[derive(SimpleObject, Clone)]
pub struct GqlTimelineItem {
    pub minute: String,
    pub side: String,
    pub event_type: String,
    pub home_score: u32,
    pub away_score: u32,
    pub primary_name: Option<String>,
    pub secondary_name: Option<String>,
}

impl From<TimelineItem> for GqlTimelineItem {
    fn from(item: TimelineItem) -> Self {
        Self {
            side: item.side.as_str().to_string(),
            event_type: label(&item.kind.event_type()),
            home_score: item.score.home,
            away_score: item.score.away,
            minute: item.minute,
            primary_name: item.primary_name,
            secondary_name: item.secondary_name,
        }
    }
}

#[derive(SimpleObject, Clone)]
pub struct GqlGameSummary {
    pub game_id: String,
    pub opponent: String,
    pub home_score: u32,
    pub away_score: u32,
    pub timeline: Vec<GqlTimelineItem>,
    pub field_starters: Vec<String>,
    pub bench_starters: Vec<String>,
}

impl From<GameSummary> for GqlGameSummary {
    fn from(summary: GameSummary) -> Self {
        Self {
            home_score: summary.final_score.home,
            away_score: summary.final_score.away,
            timeline: summary.timeline.into_iter().map(Into::into).collect(),
            field_starters: summary.field_starters.into_iter().map(|s| s.name).collect(),
            bench_starters: summary.bench_starters.into_iter().map(|s| s.name).collect(),
            game_id: summary.game_id,
            opponent: summary.opponent,
        }
    }
}

#[derive(SimpleObject, Clone)]
pub struct GqlLivePlayer {
    pub player_id: String,
    pub location: String,
    pub playtime_seconds: f64,
    pub is_clocked: bool,
}

#[derive(SimpleObject, Clone)]
pub struct GqlLiveBoard {
    pub game_id: String,
    pub at: i64,
    pub phase: String,
    pub clock_seconds: f64,
    pub home_score: u32,
    pub away_score: u32,
    pub players: Vec<GqlLivePlayer>,
}

impl From<LiveBoard> for GqlLiveBoard {
    fn from(board: LiveBoard) -> Self {
        Self {
            phase: label(&board.phase),
            home_score: board.score.home,
            away_score: board.score.away,
            players: board
                .players
                .into_iter()
                .map(|player| GqlLivePlayer {
                    location: player.location.as_str().to_string(),
                    player_id: player.player_id,
                    playtime_seconds: player.playtime_seconds,
                    is_clocked: player.is_clocked,
                })
                .collect(),
            game_id: board.game_id,
            at: board.at,
            clock_seconds: board.clock_seconds,
        }
    }
}

#[derive(SimpleObject, Clone)]
pub struct GqlPlayerSeasonLine {
    pub player_id: String,
    pub name: String,
    pub appearances: u32,
    pub starts: u32,
    pub goals: u32,
    pub assists: u32,
    pub playtime_seconds: f64,
}

impl From<PlayerSeasonLine> for GqlPlayerSeasonLine {
    fn from(line: PlayerSeasonLine) -> Self {
        Self {
            player_id: line.player_id,
            name: line.name,
            appearances: line.appearances,
            starts: line.starts,
            goals: line.goals,
            assists: line.assists,
            playtime_seconds: line.playtime_seconds,
        }
    }
}

#[derive(SimpleObject, Clone)]
pub struct GqlSeasonStats {
    pub games_counted: u32,
    pub played: u32,
    pub wins: u32,
    pub draws: u32,
    pub losses: u32,
    pub goals_for: u32,
    pub goals_against: u32,
    pub players: Vec<GqlPlayerSeasonLine>,
}

impl From<SeasonStats> for GqlSeasonStats {
    fn from(stats: SeasonStats) -> Self {
        Self {
            games_counted: stats.games_counted,
            played: stats.record.played,
            wins: stats.record.wins,
            draws: stats.record.draws,
            losses: stats.record.losses,
            goals_for: stats.record.goals_for,
            goals_against: stats.record.goals_against,
            players: stats.players.into_iter().map(Into::into).collect(),
        }
    }
}

#[derive(SimpleObject, Clone)]
pub struct GqlHistory {
    pub seasons: Vec<String>,
    pub competitions: Vec<String>,
}

fn session<'a>(context: &'a Context<'_>) -> GqlResult<&'a Arc<TeamSession>> {
    context
        .data::<Arc<TeamSession>>()
        .map_err(|_| async_graphql::Error::new("Please sign in again."))
}

fn gql_error(error: ApplicationError) -> async_graphql::Error {
    async_graphql::Error::new(error.user_message())
}

pub struct QueryRoot;

#[Object]
impl QueryRoot {
    async fn games(&self, context: &Context<'_>) -> GqlResult<Vec<GqlGame>> {
        let games = game_queries::list_games(session(context)?).await;
        Ok(games.into_iter().map(Into::into).collect())
    }

    async fn game_sheet(&self, context: &Context<'_>, game_id: String) -> GqlResult<GqlGameSheet> {
        let sheet = game_queries::game_sheet(session(context)?, &game_id)
            .await
            .map_err(gql_error)?;
        Ok(sheet.into())
    }

    async fn game_summary(&self, context: &Context<'_>, game_id: String) -> GqlResult<GqlGameSummary> {
        let summary = game_queries::summary(session(context)?, &game_id)
            .await
            .map_err(gql_error)?;
        Ok(summary.into())
    }

    async fn live_board(&self, context: &Context<'_>, game_id: String) -> GqlResult<GqlLiveBoard> {
        let now = Utc::now().timestamp_millis();
        let board = game_queries::board(session(context)?, &game_id, now)
            .await
            .map_err(gql_error)?;
        Ok(board.into())
    }

    async fn season_stats(
        &self,
        context: &Context<'_>,
        season: Option<String>,
        competition: Option<String>,
    ) -> GqlResult<GqlSeasonStats> {
        let filter = StatsFilter { season, competition };
        Ok(stats_queries::stats(session(context)?, &filter).await.into())
    }

    async fn history(&self, context: &Context<'_>) -> GqlResult<GqlHistory> {
        let history = stats_queries::history(session(context)?).await;
        Ok(GqlHistory {
            seasons: history.seasons,
            competitions: history.competitions,
        })
    }
}

pub struct SubscriptionRoot;

#[Subscription]
impl SubscriptionRoot {
    /// The shared live board of a game, pushed on every tick.
    async fn live_board(
        &self,
        context: &Context<'_>,
        game_id: String,
    ) -> async_graphql::Result<impl Stream<Item = GqlLiveBoard>> {
        let ticker = context.data::<Arc<LiveTicker>>()?;
        let receiver = ticker
            .watch(session(context)?.clone(), &game_id)
            .await
            .map_err(gql_error)?;
        let first = GqlLiveBoard::from(receiver.borrow().clone());

        let updates = stream::unfold(receiver, |mut receiver| async move {
            receiver.changed().await.ok()?;
            let board = GqlLiveBoard::from(receiver.borrow_and_update().clone());
            Some((board, receiver))
        });
        Ok(stream::once(async move { first }).chain(updates))
    }
}
