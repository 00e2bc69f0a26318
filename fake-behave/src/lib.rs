//! # Fake Behave
//!
//! **INTERNAL USE ONLY**: This crate exists solely to provide an in-process stand-in for the
//! Behave API so that `behave-core` and the `behave` CLI can be integration tested without a
//! network. It is not intended for production use.
//!
//! [`FakeBehave`] implements [`behave_core::Transport`]. It keeps players, badges and
//! leaderboard results in memory, serves `offset`/`limit` slices of results, records every
//! request it receives and can be told to fail specific routes.
//!
//! Some response keys are deliberately camelCased so callers can observe key normalization.
use behave_core::{BoxError, Transport};
use bytes::Bytes;
use http::{HeaderMap, Method, StatusCode};
use serde_json::{Map, Value, json};
use std::borrow::Cow;
use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::sync::{Arc, Mutex, MutexGuard};

/// A request as received by the fake.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: Method,
    pub path: String,
    pub headers: HeaderMap,
    /// `None` when no body was transmitted.
    pub body: Option<Value>,
}

#[derive(Debug, Clone)]
struct Failure {
    method: Method,
    path: String,
    /// 1-based index among matching requests; `None` fails all of them.
    nth: Option<usize>,
    status: StatusCode,
    body: Value,
}

#[derive(Debug, Default)]
struct Player {
    traits: Map<String, Value>,
    events: Vec<String>,
    badges: BTreeSet<String>,
    identities: BTreeMap<String, String>,
}

#[derive(Debug)]
struct Entry {
    player_id: String,
    score: i64,
}

#[derive(Debug, Default)]
struct State {
    token: Option<String>,
    disconnected: bool,
    players: HashMap<String, Player>,
    badges: BTreeSet<String>,
    leaderboards: HashMap<String, Vec<Entry>>,
    failures: Vec<Failure>,
    requests: Vec<RecordedRequest>,
}

/// In-memory fake of the Behave API.
///
/// Clones share state, so a test can hand one clone to the client and inspect another.
#[derive(Debug, Clone, Default)]
pub struct FakeBehave {
    state: Arc<Mutex<State>>,
}

type Reply = (StatusCode, Value);

impl FakeBehave {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rejects requests whose `X-Auth-Token` differs from `token` with a `401`.
    pub fn with_token(self, token: &str) -> Self {
        self.lock().token = Some(token.to_string());
        self
    }

    /// Seeds a leaderboard with `count` players, `player-1` first, scores descending.
    pub fn with_results(self, leaderboard_id: &str, count: usize) -> Self {
        let entries = (1..=count)
            .map(|i| Entry {
                player_id: format!("player-{i}"),
                score: (count - i + 1) as i64 * 10,
            })
            .collect();
        self.lock()
            .leaderboards
            .insert(leaderboard_id.to_string(), entries);
        self
    }

    /// Appends one ranked entry to a leaderboard, creating it if needed.
    pub fn with_entry(self, leaderboard_id: &str, player_id: &str, score: i64) -> Self {
        {
            let mut state = self.lock();
            state.players.entry(player_id.to_string()).or_default();
            state
                .leaderboards
                .entry(leaderboard_id.to_string())
                .or_default()
                .push(Entry {
                    player_id: player_id.to_string(),
                    score,
                });
        }
        self
    }

    pub fn with_player(self, player_id: &str) -> Self {
        self.lock().players.entry(player_id.to_string()).or_default();
        self
    }

    /// Adds `badge_id` to the catalogue and unlocks it for `player_id`.
    pub fn with_unlocked_badge(self, player_id: &str, badge_id: &str) -> Self {
        {
            let mut state = self.lock();
            state.badges.insert(badge_id.to_string());
            state
                .players
                .entry(player_id.to_string())
                .or_default()
                .badges
                .insert(badge_id.to_string());
        }
        self
    }

    /// Adds `badge_id` to the catalogue without unlocking it for anyone.
    pub fn with_badge(self, badge_id: &str) -> Self {
        self.lock().badges.insert(badge_id.to_string());
        self
    }

    /// Every request to `method path` answers `status` with `body`.
    pub fn fail(self, method: Method, path: &str, status: u16, body: Value) -> Self {
        self.push_failure(method, path, None, status, body)
    }

    /// Only the `nth` (1-based) request to `method path` answers `status` with `body`.
    pub fn fail_nth(self, method: Method, path: &str, nth: usize, status: u16, body: Value) -> Self {
        self.push_failure(method, path, Some(nth), status, body)
    }

    /// Makes every subsequent request fail at the transport level.
    pub fn disconnect(&self) {
        self.lock().disconnected = true;
    }

    /// All requests received so far, in order.
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.lock().requests.clone()
    }

    /// Requests received so far for `path`.
    pub fn requests_to(&self, path: &str) -> Vec<RecordedRequest> {
        self.lock()
            .requests
            .iter()
            .filter(|r| r.path == path)
            .cloned()
            .collect()
    }

    /// Traits last set for a player through `identify`.
    pub fn traits(&self, player_id: &str) -> Option<Map<String, Value>> {
        self.lock().players.get(player_id).map(|p| p.traits.clone())
    }

    /// Verbs tracked for a player, in order.
    pub fn events(&self, player_id: &str) -> Vec<String> {
        self.lock()
            .players
            .get(player_id)
            .map(|p| p.events.clone())
            .unwrap_or_default()
    }

    pub fn has_leaderboard(&self, leaderboard_id: &str) -> bool {
        self.lock().leaderboards.contains_key(leaderboard_id)
    }

    fn push_failure(
        self,
        method: Method,
        path: &str,
        nth: Option<usize>,
        status: u16,
        body: Value,
    ) -> Self {
        let status = StatusCode::from_u16(status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        self.lock().failures.push(Failure {
            method,
            path: path.to_string(),
            nth,
            status,
            body,
        });
        self
    }

    fn lock(&self) -> MutexGuard<'_, State> {
        // A panicking test must not poison the fake for the assertions that follow.
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn handle(&self, request: http::Request<Option<Bytes>>) -> Result<Reply, BoxError> {
        let (parts, body) = request.into_parts();
        let body = body
            .map(|b| serde_json::from_slice::<Value>(&b))
            .transpose()?;

        let mut state = self.lock();
        if state.disconnected {
            return Err("connection refused".into());
        }

        let recorded = RecordedRequest {
            method: parts.method.clone(),
            path: parts.uri.path().to_string(),
            headers: parts.headers.clone(),
            body,
        };
        state.requests.push(recorded.clone());

        if let Some(expected) = &state.token {
            let given = recorded
                .headers
                .get("x-auth-token")
                .and_then(|v| v.to_str().ok());
            if given != Some(expected.as_str()) {
                return Ok((StatusCode::UNAUTHORIZED, json!({ "message": "invalid token" })));
            }
        }

        if let Some(failure) = state.matching_failure(&recorded) {
            return Ok((failure.status, failure.body));
        }

        Ok(state.route(&recorded))
    }
}

impl Transport for FakeBehave {
    async fn send(
        &self,
        request: http::Request<Option<Bytes>>,
    ) -> Result<http::Response<Bytes>, BoxError> {
        let (status, body) = self.handle(request)?;

        let mut response = http::Response::new(Bytes::from(serde_json::to_vec(&body)?));
        *response.status_mut() = status;
        Ok(response)
    }
}

impl State {
    fn matching_failure(&self, request: &RecordedRequest) -> Option<Failure> {
        let seen = self
            .requests
            .iter()
            .filter(|r| r.method == request.method && r.path == request.path)
            .count();

        self.failures
            .iter()
            .find(|f| {
                f.method == request.method
                    && f.path == request.path
                    && f.nth.is_none_or(|nth| nth == seen)
            })
            .cloned()
    }

    fn route(&mut self, request: &RecordedRequest) -> Reply {
        let decoded: Vec<String> = request
            .path
            .split('/')
            .filter(|s| !s.is_empty())
            .map(|s| urlencoding::decode(s).map_or_else(|_| s.to_string(), Cow::into_owned))
            .collect();
        let segments: Vec<&str> = decoded.iter().map(String::as_str).collect();
        let body = request.body.clone().unwrap_or(Value::Null);

        match (&request.method, segments.as_slice()) {
            (&Method::POST, ["players", id, "track"]) => self.track(id, &body),
            (&Method::POST, ["players", id, "identify"]) => self.identify(id, &body),
            (&Method::GET, ["players", id, "badges"]) => self.badges(id, true),
            (&Method::GET, ["players", id, "badges", "todo"]) => self.badges(id, false),
            (&Method::POST, ["players", id, "identities"]) => self.add_identity(id, &body),
            (&Method::DELETE, ["players", id, "identities", provider]) => {
                self.remove_identity(id, provider)
            }
            (&Method::DELETE, ["badges", id]) => match self.badges.remove(*id) {
                true => ok_empty(),
                false => not_found("badge"),
            },
            (&Method::POST, ["leaderboards"]) => self.create_leaderboard(&body),
            (&Method::POST, ["leaderboards", "player-results"]) => self.player_results(&body),
            (&Method::DELETE, ["leaderboards", id]) => match self.leaderboards.remove(*id) {
                Some(_) => ok_empty(),
                None => not_found("leaderboard"),
            },
            (&Method::POST, ["leaderboards", id, "results"]) => self.results(id, &body),
            _ => (StatusCode::NOT_FOUND, json!({ "message": "not found" })),
        }
    }

    fn track(&mut self, player_id: &str, body: &Value) -> Reply {
        let Some(verb) = body.get("verb").and_then(Value::as_str) else {
            return bad_request("'verb' is required");
        };

        let player = self.players.entry(player_id.to_string()).or_default();
        player.events.push(verb.to_string());

        ok(json!({
            "playerId": player_id,
            "verb": verb,
            "eventCount": player.events.len(),
            "unlockedBadges": [],
        }))
    }

    fn identify(&mut self, player_id: &str, body: &Value) -> Reply {
        let traits = body
            .get("traits")
            .and_then(Value::as_object)
            .cloned()
            .unwrap_or_default();

        let player = self.players.entry(player_id.to_string()).or_default();
        player.traits = traits.clone();

        ok(json!({ "id": player_id, "traits": traits }))
    }

    fn badges(&self, player_id: &str, unlocked: bool) -> Reply {
        let Some(player) = self.players.get(player_id) else {
            return not_found("player");
        };

        let badges: Vec<Value> = self
            .badges
            .iter()
            .filter(|b| player.badges.contains(*b) == unlocked)
            .map(|b| json!({ "badgeId": b, "unlocked": unlocked }))
            .collect();

        ok(Value::Array(badges))
    }

    fn add_identity(&mut self, player_id: &str, body: &Value) -> Reply {
        let (Some(reference), Some(provider)) = (
            body.get("reference_id").and_then(Value::as_str),
            body.get("provider").and_then(Value::as_str),
        ) else {
            return bad_request("'reference_id' and 'provider' are required");
        };

        let Some(player) = self.players.get_mut(player_id) else {
            return not_found("player");
        };
        player
            .identities
            .insert(provider.to_string(), reference.to_string());

        ok(json!({ "provider": provider, "referenceId": reference }))
    }

    fn remove_identity(&mut self, player_id: &str, provider: &str) -> Reply {
        match self
            .players
            .get_mut(player_id)
            .and_then(|p| p.identities.remove(provider))
        {
            Some(_) => ok_empty(),
            None => not_found("identity"),
        }
    }

    fn create_leaderboard(&mut self, body: &Value) -> Reply {
        let Some(reference) = body.get("reference_id").and_then(Value::as_str) else {
            return bad_request("'reference_id' is required");
        };
        if self.leaderboards.contains_key(reference) {
            return (
                StatusCode::CONFLICT,
                json!({ "message": "leaderboard already exists" }),
            );
        }

        self.leaderboards.insert(reference.to_string(), Vec::new());
        ok(body.clone())
    }

    fn player_results(&self, body: &Value) -> Reply {
        let Some(player_id) = body.get("player_id").and_then(Value::as_str) else {
            return bad_request("'player_id' is required");
        };
        let only: Option<Vec<&str>> = body
            .get("leaderboards")
            .and_then(Value::as_array)
            .map(|ids| ids.iter().filter_map(Value::as_str).collect());

        let mut ids: Vec<&String> = self
            .leaderboards
            .keys()
            .filter(|id| only.as_ref().is_none_or(|only| only.contains(&id.as_str())))
            .collect();
        ids.sort();

        let ranks: Vec<Value> = ids
            .into_iter()
            .filter_map(|id| {
                let entries = &self.leaderboards[id];
                let position = entries.iter().position(|e| e.player_id == player_id)?;
                Some(json!({
                    "leaderboardId": id,
                    "position": position + 1,
                    "score": entries[position].score,
                }))
            })
            .collect();

        ok(Value::Array(ranks))
    }

    fn results(&self, leaderboard_id: &str, body: &Value) -> Reply {
        let Some(entries) = self.leaderboards.get(leaderboard_id) else {
            return not_found("leaderboard");
        };

        let field = |name: &str| body.get(name).and_then(Value::as_u64).map(|v| v as usize);
        let (Some(limit), Some(offset)) = (field("limit"), field("offset")) else {
            return bad_request("'limit' and 'offset' are required");
        };

        let page: Vec<Value> = entries
            .iter()
            .enumerate()
            .skip(offset)
            .take(limit)
            .map(|(i, e)| {
                json!({
                    "position": i + 1,
                    "playerId": e.player_id,
                    "score": e.score,
                })
            })
            .collect();

        ok(Value::Array(page))
    }
}

fn ok(data: Value) -> Reply {
    (StatusCode::OK, json!({ "data": data }))
}

fn ok_empty() -> Reply {
    (StatusCode::OK, json!({}))
}

fn not_found(what: &str) -> Reply {
    (
        StatusCode::NOT_FOUND,
        json!({ "message": format!("{what} not found") }),
    )
}

fn bad_request(message: &str) -> Reply {
    (StatusCode::BAD_REQUEST, json!({ "message": message }))
}
