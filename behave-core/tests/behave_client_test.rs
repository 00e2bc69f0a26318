use behave_core::http::Method;
use behave_core::{
    BehaveClient, ClientConfig, LeaderboardType, Payload, Record, ScorePolicy, TimeFrame,
};
use fake_behave::FakeBehave;
use serde_json::{Value, json};

fn client(fake: &FakeBehave) -> BehaveClient<FakeBehave> {
    let config = ClientConfig::new("token").with_base_url("http://behave.test");
    BehaveClient::with_transport(&config, fake.clone()).unwrap()
}

fn record(value: Value) -> Record {
    value.as_object().cloned().unwrap()
}

#[tokio::test]
async fn test_track() {
    let fake = FakeBehave::new();
    let context = record(json!({ "level": 3, "deviceType": "mobile" }));

    let res = client(&fake)
        .track("p1", "level-up", context)
        .await
        .unwrap()
        .into_record();

    assert_eq!(res["verb"], "level-up");
    assert_eq!(res["player_id"], "p1");
    assert_eq!(res["unlocked_badges"], json!([]));

    let requests = fake.requests_to("/players/p1/track");
    assert_eq!(requests[0].method, Method::POST);
    // Request bodies are sent as given; only responses are normalized.
    assert_eq!(
        requests[0].body,
        Some(json!({ "verb": "level-up", "context": { "level": 3, "deviceType": "mobile" } }))
    );
    assert_eq!(fake.events("p1"), vec!["level-up"]);
}

#[tokio::test]
async fn test_identify() {
    let fake = FakeBehave::new();

    let res = client(&fake)
        .identify("p1", record(json!({ "name": "Ada", "favouriteColor": "red" })))
        .await
        .unwrap()
        .into_record();

    assert_eq!(
        res["traits"],
        json!({ "name": "Ada", "favourite_color": "red" })
    );
    assert_eq!(fake.traits("p1").unwrap()["favouriteColor"], "red");
}

#[tokio::test]
async fn test_player_ranks_and_rank() {
    let fake = FakeBehave::new()
        .with_entry("alpha", "p0", 50)
        .with_entry("alpha", "p1", 40)
        .with_entry("beta", "p1", 99)
        .with_entry("gamma", "p2", 10);
    let client = client(&fake);

    let ranks = client
        .players()
        .ranks("p1", Record::new())
        .await
        .unwrap()
        .into_records();

    assert_eq!(ranks.len(), 2);
    assert_eq!(ranks[0]["leaderboard_id"], "alpha");
    assert_eq!(ranks[0]["position"], 2);
    assert_eq!(ranks[1]["leaderboard_id"], "beta");
    assert_eq!(ranks[1]["position"], 1);

    let rank = client.players().rank("p1", "beta").await.unwrap().unwrap();
    assert_eq!(rank["score"], 99);

    let body = fake.requests_to("/leaderboards/player-results")[1]
        .body
        .clone()
        .unwrap();
    assert_eq!(body, json!({ "player_id": "p1", "leaderboards": ["beta"] }));
}

#[tokio::test]
async fn test_rank_on_unranked_leaderboard_is_none() {
    let fake = FakeBehave::new().with_entry("alpha", "p1", 1);

    let rank = client(&fake).players().rank("p1", "beta").await.unwrap();

    assert_eq!(rank, None);
}

#[tokio::test]
async fn test_player_badges() {
    let fake = FakeBehave::new()
        .with_badge("explorer")
        .with_unlocked_badge("p1", "first-login");
    let client = client(&fake);

    let unlocked = client.players().badges("p1").await.unwrap().into_records();
    let locked = client
        .players()
        .locked_badges("p1")
        .await
        .unwrap()
        .into_records();

    assert_eq!(unlocked.len(), 1);
    assert_eq!(unlocked[0]["badge_id"], "first-login");
    assert_eq!(locked.len(), 1);
    assert_eq!(locked[0]["badge_id"], "explorer");
    assert_eq!(fake.requests()[1].path, "/players/p1/badges/todo");
    assert_eq!(fake.requests()[1].method, Method::GET);
}

#[tokio::test]
async fn test_badges_of_unknown_player_is_an_api_error() {
    let fake = FakeBehave::new();

    let err = client(&fake).players().badges("ghost").await.unwrap_err();

    let api = err.api_error().unwrap();
    assert_eq!(api.status, 404);
    assert_eq!(api.message, "player not found");
}

#[tokio::test]
async fn test_identities() {
    let fake = FakeBehave::new().with_player("p1");
    let client = client(&fake);

    let added = client
        .players()
        .add_identity("p1", "12345", "facebook")
        .await
        .unwrap()
        .into_record();
    assert_eq!(added["reference_id"], "12345");

    let removed = client
        .players()
        .remove_identity("p1", "facebook")
        .await
        .unwrap();
    assert_eq!(removed, Payload::Empty);

    let again = client.players().remove_identity("p1", "facebook").await;
    assert_eq!(again.unwrap_err().api_error().map(|e| e.status), Some(404));

    let requests = fake.requests();
    assert_eq!(
        requests[0].body,
        Some(json!({ "reference_id": "12345", "provider": "facebook" }))
    );
    assert_eq!(requests[1].method, Method::DELETE);
    assert_eq!(requests[1].path, "/players/p1/identities/facebook");
    assert_eq!(requests[1].body, None);
}

#[tokio::test]
async fn test_leaderboard_create_and_delete() {
    let fake = FakeBehave::new();
    let client = client(&fake);

    let mut attrs = Record::new();
    attrs.insert("type".to_string(), LeaderboardType::Behavioural.into());
    attrs.insert("time_frame".to_string(), TimeFrame::Monthly.into());
    attrs.insert("score_type".to_string(), ScorePolicy::Sum.into());
    // `name` and `reference_id` always come from the arguments.
    attrs.insert("name".to_string(), json!("overridden"));

    let created = client
        .leaderboards()
        .create("Monthly logins", "monthly-logins", attrs)
        .await
        .unwrap()
        .into_record();

    assert_eq!(created["name"], "Monthly logins");
    assert_eq!(
        fake.requests()[0].body,
        Some(json!({
            "type": 1,
            "time_frame": 3,
            "score_type": 1,
            "name": "Monthly logins",
            "reference_id": "monthly-logins",
        }))
    );
    assert!(fake.has_leaderboard("monthly-logins"));

    let deleted = client
        .leaderboards()
        .delete("monthly-logins")
        .await
        .unwrap();
    assert!(deleted.is_empty());
    assert!(!fake.has_leaderboard("monthly-logins"));
    assert_eq!(fake.requests()[1].path, "/leaderboards/monthly-logins");
}

#[tokio::test]
async fn test_duplicate_leaderboard_surfaces_conflict() {
    let fake = FakeBehave::new().with_results("weekly", 0);

    let err = client(&fake)
        .leaderboards()
        .create("Weekly", "weekly", Record::new())
        .await
        .unwrap_err();

    let api = err.api_error().unwrap();
    assert_eq!(api.status, 409);
    assert_eq!(api.message, "leaderboard already exists");
}

#[tokio::test]
async fn test_ids_are_percent_encoded_in_paths() {
    let fake = FakeBehave::new()
        .with_player("ana maria/1")
        .with_results("weekly?top", 3);
    let client = client(&fake);

    client
        .track("ana maria/1", "login", Record::new())
        .await
        .unwrap();
    assert_eq!(fake.events("ana maria/1"), vec!["login"]);

    client
        .players()
        .add_identity("ana maria/1", "42", "g+")
        .await
        .unwrap();
    client
        .players()
        .remove_identity("ana maria/1", "g+")
        .await
        .unwrap();

    let records = client
        .leaderboards()
        .results("weekly?top", Default::default())
        .unwrap()
        .collect()
        .await
        .unwrap();
    assert_eq!(records.len(), 3);

    let paths: Vec<String> = fake.requests().into_iter().map(|r| r.path).collect();
    assert_eq!(
        paths,
        [
            "/players/ana%20maria%2F1/track",
            "/players/ana%20maria%2F1/identities",
            "/players/ana%20maria%2F1/identities/g%2B",
            "/leaderboards/weekly%3Ftop/results",
        ]
    );
}

#[tokio::test]
async fn test_badge_delete() {
    let fake = FakeBehave::new().with_badge("explorer");
    let client = client(&fake);

    assert_eq!(
        client.badges().delete("explorer").await.unwrap(),
        Payload::Empty
    );

    let err = client.badges().delete("explorer").await.unwrap_err();
    assert_eq!(err.api_error().map(|e| e.status), Some(404));
}

#[test]
fn test_leaderboard_constants_wire_values() {
    assert_eq!(Value::from(LeaderboardType::Score), json!(0));
    assert_eq!(Value::from(LeaderboardType::Behavioural), json!(1));
    assert_eq!(Value::from(TimeFrame::AllTime), json!(0));
    assert_eq!(Value::from(TimeFrame::Daily), json!(1));
    assert_eq!(Value::from(TimeFrame::Weekly), json!(2));
    assert_eq!(Value::from(TimeFrame::Monthly), json!(3));
    assert_eq!(Value::from(ScorePolicy::Max), json!(0));
    assert_eq!(Value::from(ScorePolicy::Sum), json!(1));
}
