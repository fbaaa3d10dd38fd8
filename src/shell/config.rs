// Runtime configuration read from the environment (after dotenvy loaded any .env file).

use std::net::SocketAddr;
use std::time::Duration;

use anyhow::{Context, Result};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub addr: SocketAddr,
    /// Bearer token accepted for the seeded demo team.
    pub demo_token: String,
    pub demo_team: String,
    /// Period of the live board ticker.
    pub tick: Duration,
}

impl AppConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let value = |name: &str, default: &str| {
            lookup(name)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
                .unwrap_or_else(|| default.to_string())
        };

        let addr = value("MATCHDAY_ADDR", "0.0.0.0:8080");
        let tick_ms = value("MATCHDAY_TICK_MS", "1000");
        let tick_ms: u64 = tick_ms
            .parse()
            .with_context(|| format!("MATCHDAY_TICK_MS is not a number of milliseconds: {tick_ms}"))?;
        anyhow::ensure!(tick_ms > 0, "MATCHDAY_TICK_MS must be greater than zero");

        Ok(Self {
            addr: addr
                .parse()
                .with_context(|| format!("MATCHDAY_ADDR is not a socket address: {addr}"))?,
            demo_token: value("MATCHDAY_DEMO_TOKEN", "demo-token"),
            demo_team: value("MATCHDAY_DEMO_TEAM", "Demo FC"),
            tick: Duration::from_millis(tick_ms),
        })
    }
}
