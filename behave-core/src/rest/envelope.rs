//! # Response Envelope
//!
//! Every successful response body is shaped `{ "data": <absent | object | array> }`.
//! [`Envelope::decode`] turns that into a [`Payload`], normalizing record keys on the way.
use crate::normalize::normalize_map;
use serde::Deserialize;
use serde_json::{Map, Value};

/// One normalized result item (a player, a badge, a leaderboard entry...).
pub type Record = Map<String, Value>;

/// The raw body of a successful response.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Envelope {
    #[serde(default)]
    pub data: Option<Value>,
}

/// The body's `data` field was neither absent, an object, nor an array of objects.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum MalformedResponse {
    #[error("Response body is not a valid JSON envelope: '{0}'")]
    NotJson(String),
    #[error("Expected 'data' to be an object or an array, got a {0}")]
    ScalarData(&'static str),
    #[error("Expected every element of 'data' to be an object, element {index} is a {kind}")]
    ScalarElement { index: usize, kind: &'static str },
}

/// The decoded content of an [`Envelope`].
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    /// No `data` field (or `data: null`).
    Empty,
    /// `data` held a single object.
    Single(Record),
    /// `data` held an array of objects, in wire order.
    Many(Vec<Record>),
}

impl Envelope {
    /// Parses a raw response body. An empty body is an envelope without `data`.
    pub fn from_slice(body: &[u8]) -> Result<Self, MalformedResponse> {
        if body.iter().all(u8::is_ascii_whitespace) {
            return Ok(Self::default());
        }
        serde_json::from_slice(body).map_err(|e| MalformedResponse::NotJson(e.to_string()))
    }

    pub fn decode(self) -> Result<Payload, MalformedResponse> {
        match self.data {
            None | Some(Value::Null) => Ok(Payload::Empty),
            Some(Value::Object(map)) => Ok(Payload::Single(normalize_map(&map))),
            Some(Value::Array(items)) => items
                .iter()
                .enumerate()
                .map(|(index, item)| match item {
                    Value::Object(map) => Ok(normalize_map(map)),
                    other => Err(MalformedResponse::ScalarElement {
                        index,
                        kind: kind_of(other),
                    }),
                })
                .collect::<Result<Vec<_>, _>>()
                .map(Payload::Many),
            Some(other) => Err(MalformedResponse::ScalarData(kind_of(&other))),
        }
    }
}

impl Payload {
    /// Flattens the payload into a list: `Empty` is `[]`, `Single(r)` is `[r]`.
    pub fn into_records(self) -> Vec<Record> {
        match self {
            Payload::Empty => Vec::new(),
            Payload::Single(record) => vec![record],
            Payload::Many(records) => records,
        }
    }

    /// Collapses the payload into one record. `Empty` becomes an empty record and `Many`
    /// keeps only its first element.
    pub fn into_record(self) -> Record {
        match self {
            Payload::Empty => Record::new(),
            Payload::Single(record) => record,
            Payload::Many(records) => records.into_iter().next().unwrap_or_default(),
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            Payload::Empty => true,
            Payload::Single(_) => false,
            Payload::Many(records) => records.is_empty(),
        }
    }

    /// Converts back into a JSON value (`{}`, an object, or an array).
    pub fn into_value(self) -> Value {
        match self {
            Payload::Empty => Value::Object(Record::new()),
            Payload::Single(record) => Value::Object(record),
            Payload::Many(records) => Value::Array(records.into_iter().map(Value::Object).collect()),
        }
    }
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
