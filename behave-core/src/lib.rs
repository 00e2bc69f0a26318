//! # Behave Core
//!
//! `behave-core` is the foundational library powering the Behave CLI. It provides an async
//! client for the Behave gamification API: players, leaderboards and badges over HTTP, with
//! a JSON envelope wrapped around every response.
//!
//! ## Key Components
//!
//! * **[`BehaveClient`]:** The main entry point. It exposes the resource facades
//!   ([`Players`], [`Leaderboards`], [`Badges`]) and the event tracking calls.
//! * **[`RestClient`]:** The request dispatcher. Builds the HTTP call, attaches the auth
//!   header configured once at startup and classifies the response status.
//! * **[`Payload`]:** The decoded `data` field of a response envelope: nothing, a single
//!   record, or a list of records.
//! * **[`ResultPager`]:** Bounded, sequential pagination over leaderboard results.
//!
//! ## Key normalization
//!
//! Every record handed back to callers has had its keys converted to `snake_case` by
//! [`normalize`], recursively, exactly once.
//!
//! ## Transports
//!
//! The dispatcher is generic over a [`Transport`]. [`HttpTransport`] talks to the real
//! service through `reqwest`; tests plug in an in-process fake instead.
//!
//! See the README.md for more details about usage.
pub mod client;
pub mod config;
pub mod normalize;
pub mod rest;

pub use client::{
    BehaveClient, Badges, LeaderboardType, Leaderboards, Page, Players, ResultPager,
    ResultsError, ResultsOptions, ScorePolicy, TimeFrame,
};
pub use config::{ClientConfig, ConfigError};
pub use normalize::normalize;
pub use rest::{
    client::{ApiError, RequestError, RestClient},
    envelope::{Envelope, MalformedResponse, Payload, Record},
    transport::{HttpTransport, Transport},
};

// Re-exports
pub use http;
pub use serde_json;

/// Type alias for the standard boxed error used in generic bounds.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;
