//! # Behave Client
//!
//! This module implements the resource-level API on top of the [`RestClient`] dispatcher.
//!
//! The [`BehaveClient`] is the entry point. Event tracking lives directly on it, the rest
//! is grouped by resource behind borrowing facades:
//!
//! 1. **[`Players`]**: ranks, badges and identities of a player.
//! 2. **[`Leaderboards`]**: creation, removal and paginated results.
//! 3. **[`Badges`]**: removal.
//!
//! ## Example
//!
//! ```rust,no_run
//! use behave_core::{BehaveClient, ClientConfig, ResultsOptions};
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let client = BehaveClient::new(&ClientConfig::from_env()?)?;
//!
//! client.track("player-1", "login", Default::default()).await?;
//!
//! let top = client
//!     .leaderboards()
//!     .results("weekly", ResultsOptions::default().limit(50).max(100))?
//!     .collect()
//!     .await?;
//! # Ok(())
//! # }
//! ```
pub mod badges;
pub mod leaderboards;
pub mod pager;
pub mod players;
mod types;

pub use badges::Badges;
pub use leaderboards::Leaderboards;
pub use pager::{Page, ResultPager, ResultsError};
pub use players::Players;
pub use types::*;

use crate::{
    config::{ClientConfig, ConfigError},
    rest::{
        client::{RequestError, RestClient},
        envelope::{Payload, Record},
        segment,
        transport::{HttpTransport, Transport},
    },
};
use http::Method;
use serde_json::json;

/// The main client for the Behave API.
///
/// The generic parameter `T` is the transport requests go through.
#[derive(Debug, Clone)]
pub struct BehaveClient<T = HttpTransport> {
    rest: RestClient<T>,
}

impl BehaveClient<HttpTransport> {
    /// Builds a client that talks to the real service.
    pub fn new(config: &ClientConfig) -> Result<Self, ConfigError> {
        Ok(Self {
            rest: RestClient::new(config)?,
        })
    }
}

impl<T: Transport> BehaveClient<T> {
    /// Builds a client over a custom transport.
    pub fn with_transport(config: &ClientConfig, transport: T) -> Result<Self, ConfigError> {
        Ok(Self {
            rest: RestClient::with_transport(config, transport)?,
        })
    }

    /// Wraps an existing dispatcher.
    pub fn from_rest(rest: RestClient<T>) -> Self {
        Self { rest }
    }

    /// The underlying dispatcher, for endpoints without a dedicated facade.
    pub fn rest(&self) -> &RestClient<T> {
        &self.rest
    }

    pub fn players(&self) -> Players<'_, T> {
        Players::new(&self.rest)
    }

    pub fn leaderboards(&self) -> Leaderboards<'_, T> {
        Leaderboards::new(&self.rest)
    }

    pub fn badges(&self) -> Badges<'_, T> {
        Badges::new(&self.rest)
    }

    /// Tracks a behaviour (`verb`) performed by a player.
    ///
    /// The response describes what the action unlocked (points, badges, rank changes).
    pub async fn track(
        &self,
        player_id: &str,
        verb: &str,
        context: Record,
    ) -> Result<Payload, RequestError> {
        let body = json!({ "verb": verb, "context": context });
        let path = format!("/players/{}/track", segment(player_id));
        self.rest.call(Method::POST, &path, Some(&body)).await
    }

    /// Creates or updates a player with the given traits.
    pub async fn identify(&self, player_id: &str, traits: Record) -> Result<Payload, RequestError> {
        let body = json!({ "traits": traits });
        let path = format!("/players/{}/identify", segment(player_id));
        self.rest.call(Method::POST, &path, Some(&body)).await
    }
}
