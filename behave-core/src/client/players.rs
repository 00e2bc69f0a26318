//! # Players
//!
//! Read access to a player's standing (ranks, badges) and management of the external
//! identities attached to it.
use crate::rest::{
    client::{RequestError, RestClient},
    envelope::{Payload, Record},
    segment,
    transport::Transport,
};
use http::Method;
use serde_json::{Value, json};

pub struct Players<'a, T> {
    rest: &'a RestClient<T>,
}

impl<'a, T: Transport> Players<'a, T> {
    pub(crate) fn new(rest: &'a RestClient<T>) -> Self {
        Self { rest }
    }

    /// Fetches the player's rank on a single leaderboard.
    ///
    /// Returns `None` if the player is not ranked there.
    pub async fn rank(
        &self,
        player_id: &str,
        leaderboard_id: &str,
    ) -> Result<Option<Record>, RequestError> {
        let mut options = Record::new();
        options.insert("leaderboards".to_string(), json!([leaderboard_id]));

        let ranks = self.ranks(player_id, options).await?;
        Ok(ranks.into_records().into_iter().next())
    }

    /// Fetches the player's ranks on the leaderboards they appear in.
    ///
    /// `options` is sent as the request body, with `player_id` set on top of it.
    pub async fn ranks(&self, player_id: &str, mut options: Record) -> Result<Payload, RequestError> {
        options.insert("player_id".to_string(), Value::from(player_id));
        let body = Value::Object(options);
        self.rest
            .call(Method::POST, "/leaderboards/player-results", Some(&body))
            .await
    }

    /// Unlocked badges.
    pub async fn badges(&self, player_id: &str) -> Result<Payload, RequestError> {
        let path = format!("/players/{}/badges", segment(player_id));
        self.rest.call(Method::GET, &path, None).await
    }

    /// Badges the player has not unlocked yet.
    pub async fn locked_badges(&self, player_id: &str) -> Result<Payload, RequestError> {
        let path = format!("/players/{}/badges/todo", segment(player_id));
        self.rest.call(Method::GET, &path, None).await
    }

    /// Links an external identity (facebook, twitter...) to the player.
    pub async fn add_identity(
        &self,
        player_id: &str,
        identity: &str,
        provider: &str,
    ) -> Result<Payload, RequestError> {
        let body = json!({ "reference_id": identity, "provider": provider });
        let path = format!("/players/{}/identities", segment(player_id));
        self.rest.call(Method::POST, &path, Some(&body)).await
    }

    pub async fn remove_identity(
        &self,
        player_id: &str,
        provider: &str,
    ) -> Result<Payload, RequestError> {
        let path = format!(
            "/players/{}/identities/{}",
            segment(player_id),
            segment(provider)
        );
        self.rest.call(Method::DELETE, &path, None).await
    }
}
