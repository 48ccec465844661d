//! Topic API integration tests

use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use serde_json::json;
use topicvote::shared::{StoreData, TopicsList};

use crate::common::{apple_in_t1, topics, TestStore};

#[tokio::test]
async fn test_topics_on_missing_file_is_empty() {
    let store = TestStore::new();
    let server = store.server().await;

    let response = server.get("/topics").await;
    assert_eq!(response.status_code(), StatusCode::OK);
    assert_eq!(response.json::<serde_json::Value>(), json!({ "topics": [] }));
}

#[tokio::test]
async fn test_add_topic_appends_in_order() {
    let store = TestStore::with_documents(&StoreData::new(), &topics(&["T1"]));
    let server = store.server().await;

    let response = server.post("/topics/add").json(&json!({ "topic": " T2 " })).await;
    assert_eq!(response.status_code(), StatusCode::OK);
    assert_eq!(response.json::<TopicsList>(), topics(&["T1", "T2"]));
    assert_eq!(server.get("/topics").await.json::<TopicsList>(), topics(&["T1", "T2"]));
}

#[tokio::test]
async fn test_add_duplicate_or_empty_topic_is_rejected() {
    let store = TestStore::with_documents(&StoreData::new(), &topics(&["T1"]));
    let server = store.server().await;

    let duplicate = server.post("/topics/add").json(&json!({ "topic": "T1" })).await;
    assert_eq!(duplicate.status_code(), StatusCode::BAD_REQUEST);

    let empty = server.post("/topics/add").json(&json!({ "topic": "  " })).await;
    assert_eq!(empty.status_code(), StatusCode::BAD_REQUEST);

    assert_eq!(server.get("/topics").await.json::<TopicsList>(), topics(&["T1"]));
}

#[tokio::test]
async fn test_delete_unknown_topic_is_rejected() {
    let store = TestStore::with_documents(&StoreData::new(), &topics(&["T1"]));
    let server = store.server().await;

    let response = server.delete("/topics/delete").json(&json!({ "topic": "T9" })).await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    assert_eq!(response.json::<serde_json::Value>()["error"], "Topic not found: T9");
}

#[tokio::test]
async fn test_delete_non_empty_topic_is_rejected() {
    let store = TestStore::with_documents(&apple_in_t1(), &topics(&["T1"]));
    let server = store.server().await;

    let response = server.delete("/topics/delete").json(&json!({ "topic": "T1" })).await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    assert_eq!(server.get("/topics").await.json::<TopicsList>(), topics(&["T1"]));
    assert_eq!(store.data_json(), json!({ "T1": { "APPLE": { "upvotes": 0, "downvotes": 0 } } }));
}

#[tokio::test]
async fn test_delete_empty_topic_drops_bucket() {
    let store = TestStore::with_documents(&json!({ "T1": {}, "T2": {} }), &topics(&["T1", "T2"]));
    let server = store.server().await;

    let response = server.delete("/topics/delete").json(&json!({ "topic": "T2" })).await;
    assert_eq!(response.status_code(), StatusCode::OK);
    assert_eq!(response.json::<TopicsList>(), topics(&["T1"]));
    assert_eq!(store.data_json(), json!({ "T1": {} }));
}

#[tokio::test]
async fn test_topic_emptied_by_publish_can_be_deleted() {
    let store = TestStore::with_documents(&apple_in_t1(), &topics(&["T1", "T2"]));
    let server = store.server().await;

    let mut changes = topicvote::shared::ChangeSet::new();
    changes.record_topic_change("APPLE", "T1", "T2");
    server.post("/publish").json(&changes).await;

    let response = server.delete("/topics/delete").json(&json!({ "topic": "T1" })).await;
    assert_eq!(response.status_code(), StatusCode::OK);
    assert_eq!(
        store.data_json(),
        json!({ "T2": { "APPLE": { "upvotes": 0, "downvotes": 0 } } })
    );
}
