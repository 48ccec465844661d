//! Client API tests against a mock server

use assert_matches::assert_matches;
use pretty_assertions::assert_eq;
use serde_json::json;
use topicvote::egui_app::sync::{load_state, publish_changes};
use topicvote::egui_app::{ClientError, ClientState, Command, SessionSnapshot, SessionStore};
use topicvote::shared::{Item, StoreData};
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use super::api_for;
use crate::common::{apple_in_t1, topics, upvotes};

fn published_data() -> StoreData {
    let mut data = StoreData::new();
    data.insert("T1", "APPLE", Item::with_counts(2, 0));
    data
}

#[tokio::test]
async fn test_fetch_data_and_topics() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/data"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&apple_in_t1()))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/topics"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "topics": ["T1", "T2"] })))
        .mount(&server)
        .await;

    let api = api_for(&server.uri());
    assert_eq!(api.fetch_data().await.unwrap(), apple_in_t1());
    assert_eq!(api.fetch_topics().await.unwrap(), topics(&["T1", "T2"]));
}

#[tokio::test]
async fn test_publish_sends_change_set_then_refetches() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/publish"))
        .and(body_partial_json(json!({ "topicChanges": [], "deletions": [], "newItems": [] })))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("x-store-version", "7")
                .set_body_string("Data successfully published."),
        )
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/data"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&published_data()))
        .expect(1)
        .mount(&server)
        .await;

    let api = api_for(&server.uri());
    let data = publish_changes(&api, &upvotes("APPLE", "T1", 2)).await.unwrap();
    assert_eq!(data, published_data());

    let requests = server.received_requests().await.unwrap();
    let body: serde_json::Value = serde_json::from_slice(&requests[0].body).unwrap();
    assert_eq!(body["votes"].as_array().unwrap().len(), 2);
    assert_eq!(body["votes"][0]["voteType"], "upvote");
}

#[tokio::test]
async fn test_publish_reports_store_version() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/publish"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("x-store-version", "7")
                .set_body_string("Data successfully published."),
        )
        .mount(&server)
        .await;

    let api = api_for(&server.uri());
    assert_eq!(api.publish(&upvotes("APPLE", "T1", 1)).await.unwrap(), Some(7));
}

#[tokio::test]
async fn test_failed_publish_keeps_change_set() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/publish"))
        .respond_with(
            ResponseTemplate::new(500)
                .set_body_json(json!({ "error": "Could not access data.json", "status": 500 })),
        )
        .mount(&server)
        .await;

    let api = api_for(&server.uri());
    let mut state = ClientState::new(apple_in_t1(), topics(&["T1", "T2"]));
    state.apply(Command::upvote("APPLE")).unwrap();
    state.apply(Command::move_item("APPLE", "T2")).unwrap();
    let expected_pending = state.pending().clone();

    let changes = state.begin_publish().unwrap();
    let result = publish_changes(&api, &changes).await;
    let err = state.finish_publish(result).unwrap_err();

    assert_matches!(
        err,
        ClientError::Server { status: 500, ref message } if message == "Could not access data.json"
    );
    assert_eq!(state.retry(), Some(&expected_pending));
    assert!(state.pending().is_empty());
    assert_eq!(state.cache().get("T2", "APPLE"), Some(&Item::with_counts(1, 0)));
}

#[tokio::test]
async fn test_unreachable_server_is_network_error() {
    let api = api_for("http://127.0.0.1:9");
    assert_matches!(api.fetch_data().await, Err(ClientError::Network(_)));
}

#[tokio::test]
async fn test_topic_errors_carry_server_message() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/topics/add"))
        .and(body_partial_json(json!({ "topic": "T1" })))
        .respond_with(
            ResponseTemplate::new(400)
                .set_body_json(json!({ "error": "Topic already exists: T1", "status": 400 })),
        )
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/topics/delete"))
        .respond_with(ResponseTemplate::new(400).set_body_string("bad"))
        .mount(&server)
        .await;

    let api = api_for(&server.uri());
    assert_matches!(
        api.add_topic("T1").await,
        Err(ClientError::Server { status: 400, ref message }) if message == "Topic already exists: T1"
    );
    assert_matches!(
        api.delete_topic("T1").await,
        Err(ClientError::Server { status: 400, ref message }) if message == "bad"
    );
}

#[tokio::test]
async fn test_load_prefers_saved_session() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(0)
        .mount(&server)
        .await;

    let store = SessionStore::in_memory().await.unwrap();
    let snapshot = SessionSnapshot {
        cache: apple_in_t1(),
        topics: topics(&["T1"]),
        pending: upvotes("APPLE", "T1", 1),
        retry: None,
        last_published: None,
    };
    store.save(&snapshot).await.unwrap();

    let state = load_state(&api_for(&server.uri()), Some(&store)).await.unwrap();
    assert_eq!(state.snapshot(), snapshot);
}

#[tokio::test]
async fn test_load_without_session_fetches_from_server() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/data"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&apple_in_t1()))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/topics"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "topics": ["T1"] })))
        .expect(1)
        .mount(&server)
        .await;

    let store = SessionStore::in_memory().await.unwrap();
    let state = load_state(&api_for(&server.uri()), Some(&store)).await.unwrap();
    assert_eq!(state.cache(), &apple_in_t1());
    assert_eq!(state.topics(), &topics(&["T1"]));
    assert!(state.pending().is_empty());
}
