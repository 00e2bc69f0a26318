use behave_core::http::Method;
use behave_core::{ApiError, ClientConfig, Payload, RequestError, RestClient};
use fake_behave::FakeBehave;
use serde_json::json;

const TOKEN: &str = "secret-token";

fn client(fake: &FakeBehave) -> RestClient<FakeBehave> {
    let config = ClientConfig::new(TOKEN).with_base_url("http://behave.test/");
    RestClient::with_transport(&config, fake.clone()).unwrap()
}

#[tokio::test]
async fn test_auth_and_content_headers_are_attached() {
    let fake = FakeBehave::new().with_token(TOKEN).with_player("p1");

    client(&fake)
        .call(Method::GET, "/players/p1/badges", None)
        .await
        .unwrap();

    let requests = fake.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].headers["x-auth-token"], TOKEN);
    assert_eq!(requests[0].headers["content-type"], "application/json");
}

#[tokio::test]
async fn test_wrong_token_is_rejected() {
    let fake = FakeBehave::new().with_token("another-token").with_player("p1");

    let err = client(&fake)
        .call(Method::GET, "/players/p1/badges", None)
        .await
        .unwrap_err();

    assert_eq!(
        err.api_error(),
        Some(&ApiError {
            status: 401,
            message: "invalid token".to_string()
        })
    );
}

#[tokio::test]
async fn test_body_is_only_sent_when_given() {
    let fake = FakeBehave::new().with_player("p1");
    let client = client(&fake);

    client
        .call(Method::GET, "/players/p1/badges", None)
        .await
        .unwrap();
    client
        .call(
            Method::POST,
            "/players/p1/track",
            Some(&json!({ "verb": "login", "context": {} })),
        )
        .await
        .unwrap();

    let requests = fake.requests();
    assert_eq!(requests[0].body, None);
    assert_eq!(
        requests[1].body,
        Some(json!({ "verb": "login", "context": {} }))
    );
}

#[tokio::test]
async fn test_path_without_leading_slash_is_joined() {
    let fake = FakeBehave::new().with_player("p1");

    client(&fake)
        .call(Method::GET, "players/p1/badges", None)
        .await
        .unwrap();

    assert_eq!(fake.requests()[0].path, "/players/p1/badges");
}

#[tokio::test]
async fn test_not_found_raises_api_error() {
    let fake = FakeBehave::new().fail(
        Method::GET,
        "/players/ghost",
        404,
        json!({ "message": "not found" }),
    );

    let err = client(&fake)
        .call(Method::GET, "/players/ghost", None)
        .await
        .unwrap_err();

    match err {
        RequestError::Api(api) => {
            assert_eq!(api.status, 404);
            assert_eq!(api.message, "not found");
        }
        other => panic!("Expected an API error, got '{other}'"),
    }
}

#[tokio::test]
async fn test_error_without_message_uses_reason_phrase() {
    let fake = FakeBehave::new().fail(Method::DELETE, "/badges/b1", 503, json!({}));

    let err = client(&fake)
        .call(Method::DELETE, "/badges/b1", None)
        .await
        .unwrap_err();

    assert_eq!(
        err.api_error(),
        Some(&ApiError {
            status: 503,
            message: "Service Unavailable".to_string()
        })
    );
}

#[tokio::test]
async fn test_non_200_success_codes_are_errors() {
    let fake = FakeBehave::new().fail(
        Method::POST,
        "/leaderboards",
        201,
        json!({ "data": { "id": "lb" } }),
    );

    let err = client(&fake)
        .call(Method::POST, "/leaderboards", Some(&json!({})))
        .await
        .unwrap_err();

    assert_eq!(err.api_error().map(|e| e.status), Some(201));
}

#[tokio::test]
async fn test_envelope_shapes() {
    let fake = FakeBehave::new()
        .with_player("p1")
        .with_badge("b1")
        .with_results("lb", 2);
    let client = client(&fake);

    // `data` absent
    let deleted = client
        .call(Method::DELETE, "/badges/b1", None)
        .await
        .unwrap();
    assert_eq!(deleted, Payload::Empty);

    // `data` is an object
    let tracked = client
        .call(
            Method::POST,
            "/players/p1/track",
            Some(&json!({ "verb": "login" })),
        )
        .await
        .unwrap();
    let Payload::Single(record) = tracked else {
        panic!("Expected a single record");
    };
    assert_eq!(record["player_id"], "p1");
    assert_eq!(record["event_count"], 1);

    // `data` is an array
    let results = client
        .call(
            Method::POST,
            "/leaderboards/lb/results",
            Some(&json!({ "limit": 10, "offset": 0 })),
        )
        .await
        .unwrap();
    let Payload::Many(records) = results else {
        panic!("Expected a list of records");
    };
    assert_eq!(records.len(), 2);
    assert_eq!(records[0]["player_id"], "player-1");
    assert_eq!(records[1]["player_id"], "player-2");
}

#[tokio::test]
async fn test_scalar_data_is_malformed() {
    let fake = FakeBehave::new().fail(Method::GET, "/weird", 200, json!({ "data": "nope" }));

    let err = client(&fake)
        .call(Method::GET, "/weird", None)
        .await
        .unwrap_err();

    assert!(matches!(err, RequestError::Malformed(_)));
}

#[tokio::test]
async fn test_transport_failure_is_reported() {
    let fake = FakeBehave::new();
    fake.disconnect();

    let err = client(&fake)
        .call(Method::GET, "/players/p1/badges", None)
        .await
        .unwrap_err();

    assert!(matches!(err, RequestError::Transport(_)));
    assert!(fake.requests().is_empty());
}

#[test]
fn test_invalid_config_is_rejected() {
    let config = ClientConfig::new(TOKEN).with_base_url("not a url");
    assert!(RestClient::with_transport(&config, FakeBehave::new()).is_err());
}
