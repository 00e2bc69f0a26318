use crate::rest::envelope::Record;
use serde_json::Value;

/// Default number of records requested per page.
pub const DEFAULT_PAGE_LIMIT: u32 = 1000;

/// Query state for a paginated leaderboard results run.
#[derive(Debug, Clone, PartialEq)]
pub struct ResultsOptions {
    /// Page size sent to the server.
    pub limit: u32,
    /// Cap on the total number of records returned. `0` means unbounded.
    pub max: u64,
    /// 1-based page to start from.
    pub page: u32,
    /// Extra fields merged into every page request (e.g. `player_id`, `context`).
    pub filters: Record,
}

impl Default for ResultsOptions {
    fn default() -> Self {
        Self {
            limit: DEFAULT_PAGE_LIMIT,
            max: 0,
            page: 1,
            filters: Record::new(),
        }
    }
}

impl ResultsOptions {
    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = limit;
        self
    }

    pub fn max(mut self, max: u64) -> Self {
        self.max = max;
        self
    }

    pub fn page(mut self, page: u32) -> Self {
        self.page = page;
        self
    }

    pub fn filter(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.filters.insert(key.into(), value.into());
        self
    }

    pub fn filters(mut self, filters: Record) -> Self {
        self.filters.extend(filters);
        self
    }
}

/// How a leaderboard ranks its players.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum LeaderboardType {
    Score = 0,
    Behavioural = 1,
}

/// The period a leaderboard accumulates over before it resets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum TimeFrame {
    AllTime = 0,
    Daily = 1,
    Weekly = 2,
    Monthly = 3,
}

/// How successive scores of a player are combined.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum ScorePolicy {
    Max = 0,
    Sum = 1,
}

macro_rules! wire_value {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for Value {
                fn from(value: $ty) -> Self {
                    Value::from(value as u8)
                }
            }
        )*
    };
}

wire_value!(LeaderboardType, TimeFrame, ScorePolicy);
