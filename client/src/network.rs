//! HTTP transport to the game server
//!
//! Every call is a single request with no retry. The state query is read-only;
//! walk and attack mutate server state and are not idempotent.

use crate::error::{ClientError, FetchError};
use log::debug;
use shared::{ActionResult, BoardSnapshot, Direction, GAME_PATH};
use std::future::Future;

/// Query/command surface of the game server.
pub trait GameApi: Send + Sync + 'static {
    /// Reads the full board as seen by `player_name`.
    fn fetch_state(
        &self,
        player_name: &str,
    ) -> impl Future<Output = Result<BoardSnapshot, FetchError>> + Send;

    fn submit_walk(
        &self,
        player_name: &str,
        direction: Direction,
    ) -> impl Future<Output = Result<ActionResult<()>, FetchError>> + Send;

    /// On success the payload is the number of players killed.
    fn submit_attack(
        &self,
        player_name: &str,
    ) -> impl Future<Output = Result<ActionResult<u32>, FetchError>> + Send;
}

pub struct HttpGameApi {
    http: reqwest::Client,
    base_url: String,
}

impl HttpGameApi {
    pub fn new(base_url: &str) -> Result<Self, ClientError> {
        let http = reqwest::Client::builder().build()?;

        Ok(HttpGameApi {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn endpoint(&self) -> String {
        format!("{}/{}", self.base_url, GAME_PATH)
    }

    async fn post(&self, query: &[(&str, &str)]) -> Result<String, FetchError> {
        let response = self.http.post(self.endpoint()).query(query).send().await?;
        // Rejections arrive as tagged bodies, so the status code is not consulted.
        Ok(response.text().await?)
    }
}

impl GameApi for HttpGameApi {
    async fn fetch_state(&self, player_name: &str) -> Result<BoardSnapshot, FetchError> {
        debug!("Fetching state for {}", player_name);

        let response = self
            .http
            .get(self.endpoint())
            .query(&[("name", player_name)])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Protocol(format!(
                "state query answered with {}",
                status
            )));
        }

        let body = response.text().await?;
        Ok(BoardSnapshot::from_json(&body)?)
    }

    async fn submit_walk(
        &self,
        player_name: &str,
        direction: Direction,
    ) -> Result<ActionResult<()>, FetchError> {
        debug!("{} walks {}", player_name, direction);

        let body = self
            .post(&[
                ("name", player_name),
                ("action", "walk"),
                ("direction", direction.as_str()),
            ])
            .await?;

        Ok(ActionResult::walk_from_json(&body)?)
    }

    async fn submit_attack(&self, player_name: &str) -> Result<ActionResult<u32>, FetchError> {
        debug!("{} attacks", player_name);

        let body = self
            .post(&[("name", player_name), ("action", "attack")])
            .await?;

        Ok(ActionResult::attack_from_json(&body)?)
    }
}
