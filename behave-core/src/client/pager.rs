//! # Leaderboard Results Pagination
//!
//! [`ResultPager`] walks the results of a leaderboard one page at a time. Each page is one
//! `POST /leaderboards/{id}/results` call carrying `limit`, `offset` and `page` on top of the
//! caller's filters.
//!
//! ## Termination
//!
//! After each page the pager computes `count` (records in this page) and `total` (records
//! seen since page 1, i.e. `(page - 1) * limit + count`). It stops when:
//!
//! * the page is empty, or
//! * the page is short (`count < limit`), or
//! * a cap is set and `total >= max`.
//!
//! When a page pushes `total` past `max`, the overflow is trimmed from its end so the run
//! returns exactly `max` records. The first page is always requested, so an empty
//! leaderboard costs exactly one call.
//!
//! Pages are fetched strictly in order; nothing is prefetched.
use super::types::ResultsOptions;
use crate::rest::{
    client::{RequestError, RestClient},
    envelope::Record,
    segment,
    transport::Transport,
};
use http::Method;
use serde_json::Value;

/// The query was rejected before anything was sent.
#[derive(Debug, thiserror::Error)]
pub enum ResultsError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(&'static str),
}

/// One emitted page of results.
#[derive(Debug, Clone, PartialEq)]
pub struct Page {
    /// 1-based page number.
    pub number: u32,
    /// The page's records, already truncated to the cap.
    pub records: Vec<Record>,
}

/// Page-level cursor over a leaderboard's results.
#[derive(Debug)]
pub struct ResultPager<'a, T> {
    rest: &'a RestClient<T>,
    path: String,
    options: ResultsOptions,
    done: bool,
}

impl<'a, T: Transport> ResultPager<'a, T> {
    pub(crate) fn new(
        rest: &'a RestClient<T>,
        leaderboard_id: &str,
        options: ResultsOptions,
    ) -> Result<Self, ResultsError> {
        if options.limit == 0 {
            return Err(ResultsError::InvalidArgument("'limit' must be greater than 0"));
        }
        if options.page == 0 {
            return Err(ResultsError::InvalidArgument("'page' is 1-based"));
        }

        Ok(Self {
            rest,
            path: format!("/leaderboards/{}/results", segment(leaderboard_id)),
            options,
            done: false,
        })
    }

    /// The page the next call to [`ResultPager::next_page`] will request.
    pub fn current_page(&self) -> u32 {
        self.options.page
    }

    pub fn is_done(&self) -> bool {
        self.done
    }

    /// Fetches the next page.
    ///
    /// # Returns
    ///
    /// * `Ok(Some(Page))` - A page was fetched. It may be empty if it is the last one.
    /// * `Ok(None)` - The run already terminated.
    /// * `Err(RequestError)` - The call failed. The pager does not retry it.
    pub async fn next_page(&mut self) -> Result<Option<Page>, RequestError> {
        if self.done {
            return Ok(None);
        }

        let ResultsOptions {
            limit, max, page, ..
        } = self.options;

        let skipped = u64::from(page - 1) * u64::from(limit);

        let mut body = self.options.filters.clone();
        body.insert("limit".to_string(), Value::from(limit));
        body.insert("offset".to_string(), Value::from(skipped));
        body.insert("page".to_string(), Value::from(page));
        let body = Value::Object(body);

        let mut records = self
            .rest
            .call(Method::POST, &self.path, Some(&body))
            .await?
            .into_records();

        let count = records.len() as u64;
        let total = skipped + count;

        if max > 0 && total > max {
            // Keep `count - (total - max)` records, which is `max - skipped` clamped at zero
            // when a later starting page already lies past the cap.
            records.truncate(max.saturating_sub(skipped) as usize);
        }

        self.done = count == 0 || count < u64::from(limit) || (max > 0 && total >= max);
        self.options.page = page.saturating_add(1);

        tracing::debug!(
            path = %self.path,
            page,
            offset = skipped,
            count,
            total,
            emitted = records.len(),
            done = self.done,
            "fetched results page"
        );

        Ok(Some(Page {
            number: page,
            records,
        }))
    }

    /// Runs the pager to completion and returns every record in order.
    ///
    /// On error the records gathered so far are dropped.
    pub async fn collect(mut self) -> Result<Vec<Record>, RequestError> {
        let mut out = Vec::new();
        while let Some(page) = self.next_page().await? {
            out.extend(page.records);
        }
        Ok(out)
    }

    /// Runs the pager to completion, handing each page and its number to `on_page`.
    ///
    /// Pages already handed over are kept by the callback even if a later call fails.
    pub async fn for_each_page<F>(mut self, mut on_page: F) -> Result<(), RequestError>
    where
        F: FnMut(Vec<Record>, u32),
    {
        while let Some(Page { number, records }) = self.next_page().await? {
            on_page(records, number);
        }
        Ok(())
    }
}
