//! # REST Transport
//!
//! This module contains the low-level building blocks for talking to the Behave API.
//!
//! Every endpoint speaks the same protocol: a JSON body in, a JSON envelope out
//! (`{ "data": ... }`), and a `200` status for success. The components here know nothing
//! about players or leaderboards; they move `serde_json::Value` trees across the wire.
use std::borrow::Cow;

pub mod client;
pub mod envelope;
pub mod transport;

/// Percent-encodes an id for use as a single path segment.
pub(crate) fn segment(id: &str) -> Cow<'_, str> {
    urlencoding::encode(id)
}
