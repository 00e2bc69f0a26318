//! # Key Normalization
//!
//! Decoded response bodies are post-processed so that every object key reaching the caller
//! is in `snake_case`, whatever casing the wire used (`playerId`, `Player-ID`, `player_id`
//! all become `player_id`).
//!
//! [`normalize`] builds a fresh tree and never touches values, only keys and the nesting
//! around them. Applying it twice yields the same tree as applying it once.
use serde_json::{Map, Value};

/// Recursively converts every object key in `value` to its canonical form.
///
/// * Objects are rebuilt with canonical keys and normalized values, in document order. If
///   two keys collapse onto the same canonical key the later value wins and keeps the slot
///   of the first.
/// * Arrays are rebuilt element by element, preserving order.
/// * Scalars are returned unchanged.
pub fn normalize(value: &Value) -> Value {
    match value {
        Value::Object(map) => Value::Object(normalize_map(map)),
        Value::Array(items) => Value::Array(items.iter().map(normalize).collect()),
        scalar => scalar.clone(),
    }
}

/// Same as [`normalize`] for a single object.
pub fn normalize_map(map: &Map<String, Value>) -> Map<String, Value> {
    map.iter()
        .map(|(key, value)| (canonical_key(key), normalize(value)))
        .collect()
}

/// Converts a single key to `snake_case`.
///
/// Upper-case ASCII letters are lowered and split from a preceding lower-case letter or
/// digit, or from the next word at the end of an acronym (`HTTPStatus` -> `http_status`).
/// `-` and spaces become `_`. Anything else passes through.
pub fn canonical_key(key: &str) -> String {
    let chars: Vec<char> = key.chars().collect();
    let mut out = String::with_capacity(key.len() + 4);

    for (i, &c) in chars.iter().enumerate() {
        match c {
            '-' | ' ' => out.push('_'),
            c if c.is_ascii_uppercase() => {
                let prev = i.checked_sub(1).map(|p| chars[p]);
                let next = chars.get(i + 1).copied();

                let after_word = prev.is_some_and(|p| p.is_ascii_lowercase() || p.is_ascii_digit());
                let ends_acronym = prev.is_some_and(|p| p.is_ascii_uppercase())
                    && next.is_some_and(|n| n.is_ascii_lowercase());

                if (after_word || ends_acronym) && !out.ends_with('_') {
                    out.push('_');
                }
                out.push(c.to_ascii_lowercase());
            }
            c => out.push(c),
        }
    }

    out
}
