use std::sync::Arc;

use anyhow::Context;
use tracing_subscriber::EnvFilter;

use matchday::adapters::in_memory::in_memory_database::InMemoryDatabase;
use matchday::adapters::in_memory::static_token_authenticator::StaticTokenAuthenticator;
use matchday::application::live_ticker::LiveTicker;
use matchday::shell::config::AppConfig;
use matchday::shell::http::router;
use matchday::shell::seed::seed_demo;
use matchday::shell::state::AppState;

const DEMO_USER: &str = "demo-user";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info,matchday=debug")),
        )
        .init();

    let config = AppConfig::from_env()?;
    let store = Arc::new(InMemoryDatabase::new());
    seed_demo(&*store, DEMO_USER, &config.demo_team)
        .await
        .context("seeding the demo team")?;

    let state = AppState::new(
        store,
        StaticTokenAuthenticator::new([(config.demo_token.clone(), DEMO_USER)]),
        &config.demo_team,
        Arc::new(LiveTicker::new(config.tick)),
    );

    let listener = tokio::net::TcpListener::bind(config.addr)
        .await
        .with_context(|| format!("binding {}", config.addr))?;
    tracing::info!(addr = %config.addr, "matchday listening");
    axum::serve(listener, router(state)).await?;
    Ok(())
}
