use shared::DEFAULT_SERVER_URL;
use std::time::Duration;

pub const DEFAULT_TICK_MS: u64 = 1000;

/// Client configuration
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the game server
    pub server_url: String,
    /// Period of the background resync timer
    pub tick_interval: Duration,
    /// Drop renders from cycles that were overtaken by a newer cycle
    pub discard_stale_renders: bool,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            server_url: DEFAULT_SERVER_URL.to_string(),
            tick_interval: Duration::from_millis(DEFAULT_TICK_MS),
            discard_stale_renders: false,
        }
    }
}
