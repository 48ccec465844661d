//! Client against a real server on a local port

use pretty_assertions::assert_eq;
use topicvote::backend::server::create_app;
use topicvote::egui_app::sync::{fetch_all, publish_changes};
use topicvote::egui_app::{ApiClient, ClientState, Command};
use topicvote::shared::Item;

use super::api_for;
use crate::common::{apple_in_t1, topics, TestStore};

async fn serve(store: &TestStore) -> ApiClient {
    let app = create_app(store.config.clone()).await.unwrap();
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    api_for(&format!("http://{}", addr))
}

async fn load(api: &ApiClient) -> ClientState {
    let (data, topics) = fetch_all(api).await.unwrap();
    ClientState::new(data, topics)
}

#[tokio::test]
async fn test_edit_publish_refresh() {
    let store = TestStore::with_documents(&apple_in_t1(), &topics(&["T1", "T2"]));
    let api = serve(&store).await;
    let mut state = load(&api).await;

    state.apply(Command::upvote("APPLE")).unwrap();
    state.apply(Command::upvote("APPLE")).unwrap();
    state.apply(Command::move_item("APPLE", "T2")).unwrap();
    state.apply(Command::add("kiwi", "T1")).unwrap();
    state.apply(Command::downvote("KIWI")).unwrap();
    let optimistic = state.cache().clone();

    let changes = state.begin_publish().unwrap();
    let result = publish_changes(&api, &changes).await;
    state.finish_publish(result).unwrap();

    assert!(state.pending().is_empty());
    assert_eq!(state.cache(), &optimistic);
    assert_eq!(state.cache().get("T2", "APPLE"), Some(&Item::with_counts(2, 0)));
    assert_eq!(state.cache().get("T1", "KIWI"), Some(&Item::with_counts(0, 1)));
}

#[tokio::test]
async fn test_edit_during_publish_stays_pending() {
    let store = TestStore::with_documents(&apple_in_t1(), &topics(&["T1"]));
    let api = serve(&store).await;
    let mut state = load(&api).await;

    state.apply(Command::upvote("APPLE")).unwrap();
    let changes = state.begin_publish().unwrap();
    let publish = tokio::spawn({
        let api = api.clone();
        async move { publish_changes(&api, &changes).await }
    });

    // Recorded while the request is outstanding
    state.apply(Command::upvote("APPLE")).unwrap();

    state.finish_publish(publish.await.unwrap()).unwrap();
    assert_eq!(state.pending().votes.len(), 1);
    assert_eq!(state.cache().get("T1", "APPLE"), Some(&Item::with_counts(2, 0)));

    let second = state.begin_publish().unwrap();
    let result = publish_changes(&api, &second).await;
    state.finish_publish(result).unwrap();
    assert_eq!(store.data_json()["T1"]["APPLE"]["upvotes"], 2);
}

#[tokio::test]
async fn test_retry_after_lost_response_does_not_double_count() {
    let store = TestStore::with_documents(&apple_in_t1(), &topics(&["T1"]));
    let api = serve(&store).await;
    let mut state = load(&api).await;

    state.apply(Command::upvote("APPLE")).unwrap();
    let changes = state.begin_publish().unwrap();

    // The server applied it but the client never saw the answer
    api.publish(&changes).await.unwrap();
    state
        .finish_publish(Err(topicvote::egui_app::ClientError::Network("reset".into())))
        .unwrap_err();

    let retry = state.begin_publish().unwrap();
    let result = publish_changes(&api, &retry).await;
    state.finish_publish(result).unwrap();

    assert_eq!(state.cache().get("T1", "APPLE"), Some(&Item::with_counts(1, 0)));
    assert_eq!(store.data_json()["T1"]["APPLE"]["upvotes"], 1);
}

#[tokio::test]
async fn test_edits_on_item_created_in_failed_publish_reach_server() {
    let store = TestStore::with_documents(&apple_in_t1(), &topics(&["T1", "T2"]));
    let api = serve(&store).await;
    let mut state = load(&api).await;

    state.apply(Command::add("plum", "T1")).unwrap();
    state.apply(Command::add("kiwi", "T1")).unwrap();
    state.begin_publish().unwrap();

    // Recorded while the creation is outstanding, which then fails
    state.apply(Command::upvote("PLUM")).unwrap();
    state.apply(Command::move_item("PLUM", "T2")).unwrap();
    state.apply(Command::delete("KIWI")).unwrap();
    state
        .finish_publish(Err(topicvote::egui_app::ClientError::Network("refused".into())))
        .unwrap_err();
    let optimistic = state.cache().clone();

    // Quit and come back before retrying
    let mut state = ClientState::from_snapshot(state.snapshot());
    while let Some(changes) = state.begin_publish() {
        let result = publish_changes(&api, &changes).await;
        state.finish_publish(result).unwrap();
    }

    assert_eq!(state.cache(), &optimistic);
    let on_disk = store.data_json();
    assert_eq!(on_disk["T2"]["PLUM"]["upvotes"], 1);
    assert!(on_disk["T1"].get("PLUM").is_none());
    assert!(on_disk["T1"].get("KIWI").is_none());
}
