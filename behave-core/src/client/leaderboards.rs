//! # Leaderboards
//!
//! Creation and removal of leaderboards, and access to their results through a
//! [`ResultPager`].
use super::{
    pager::{ResultPager, ResultsError},
    types::ResultsOptions,
};
use crate::rest::{
    client::{RequestError, RestClient},
    envelope::{Payload, Record},
    segment,
    transport::Transport,
};
use http::Method;
use serde_json::Value;

pub struct Leaderboards<'a, T> {
    rest: &'a RestClient<T>,
}

impl<'a, T: Transport> Leaderboards<'a, T> {
    pub(crate) fn new(rest: &'a RestClient<T>) -> Self {
        Self { rest }
    }

    /// Creates a leaderboard.
    ///
    /// `attrs` carries the optional settings (type, time frame, score policy...), `name` and
    /// `reference_id` are set on top of it.
    ///
    /// ```rust,no_run
    /// # use behave_core::{BehaveClient, ClientConfig, LeaderboardType, TimeFrame};
    /// # async fn run(client: BehaveClient) -> Result<(), Box<dyn std::error::Error>> {
    /// let mut attrs = behave_core::Record::new();
    /// attrs.insert("type".into(), LeaderboardType::Behavioural.into());
    /// attrs.insert("time_frame".into(), TimeFrame::Weekly.into());
    ///
    /// client.leaderboards().create("Weekly logins", "weekly-logins", attrs).await?;
    /// # Ok(())
    /// # }
    /// ```
    pub async fn create(
        &self,
        name: &str,
        reference_id: &str,
        mut attrs: Record,
    ) -> Result<Payload, RequestError> {
        attrs.insert("name".to_string(), Value::from(name));
        attrs.insert("reference_id".to_string(), Value::from(reference_id));
        let body = Value::Object(attrs);
        self.rest
            .call(Method::POST, "/leaderboards", Some(&body))
            .await
    }

    pub async fn delete(&self, leaderboard_id: &str) -> Result<Payload, RequestError> {
        let path = format!("/leaderboards/{}", segment(leaderboard_id));
        self.rest.call(Method::DELETE, &path, None).await
    }

    /// Prepares a paginated run over the leaderboard's results. Nothing is fetched until
    /// the pager is driven.
    ///
    /// # Returns
    ///
    /// * `Err(ResultsError::InvalidArgument)` - If `limit` or `page` is `0`.
    pub fn results(
        &self,
        leaderboard_id: &str,
        options: ResultsOptions,
    ) -> Result<ResultPager<'a, T>, ResultsError> {
        ResultPager::new(self.rest, leaderboard_id, options)
    }
}
