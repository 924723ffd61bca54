use std::cell::Cell;
use std::rc::Rc;

use futures_channel::oneshot;
use serde::Serialize;
use serde_json::json;
use tokio::task::LocalSet;

use crate::collection::Collection;
use crate::error::StoreError;
use crate::store::DocumentStore;
use crate::test_support::{doc_row, tick, Doc, MemoryStore, Reply, ScriptedStore};

#[derive(Serialize)]
struct NewDoc {
    name: String,
}

fn collection(store: ScriptedStore) -> Rc<Collection<Doc>> {
    Rc::new(Collection::new(Rc::new(store), "docs"))
}

#[tokio::test]
async fn stale_fetch_result_is_discarded() {
    let local = LocalSet::new();
    local
        .run_until(async {
            let store = ScriptedStore::new();
            let (tx_first, rx_first) = oneshot::channel();
            let (tx_second, rx_second) = oneshot::channel();
            store.push_list(Reply::Wait(rx_first));
            store.push_list(Reply::Wait(rx_second));
            let docs = collection(store);

            let first = {
                let docs = Rc::clone(&docs);
                tokio::task::spawn_local(async move { docs.fetch().await })
            };
            tick().await;
            let second = {
                let docs = Rc::clone(&docs);
                tokio::task::spawn_local(async move { docs.fetch().await })
            };
            tick().await;

            // The newer fetch completes first and lands.
            tx_second
                .send(Ok(vec![doc_row("2", "fresh")]))
                .ok()
                .unwrap();
            tick().await;
            let snapshot = docs.snapshot();
            assert!(!snapshot.is_loading);
            assert_eq!(snapshot.items.len(), 1);
            assert_eq!(snapshot.items[0].name, "fresh");

            // The older fetch completes late: its caller still gets the
            // payload, but shared state keeps the newer result.
            tx_first.send(Ok(vec![doc_row("1", "stale")])).ok().unwrap();
            let stale = first.await.unwrap().unwrap();
            assert_eq!(stale[0].name, "stale");
            second.await.unwrap().unwrap();

            let snapshot = docs.snapshot();
            assert_eq!(snapshot.items[0].name, "fresh");
            assert_eq!(snapshot.error, None);
        })
        .await;
}

#[tokio::test]
async fn failed_fetch_keeps_items_and_records_error() {
    let store = ScriptedStore::new();
    store.push_list(Reply::Ready(Ok(vec![doc_row("1", "kept")])));
    store.push_list(Reply::Ready(Err(StoreError::Network(
        "connection reset".to_string(),
    ))));
    let docs = collection(store);

    docs.fetch().await.unwrap();
    let err = docs.fetch().await.unwrap_err();
    assert!(matches!(err, StoreError::Network(_)));

    let snapshot = docs.snapshot();
    assert_eq!(snapshot.items.len(), 1);
    assert_eq!(snapshot.items[0].name, "kept");
    assert!(matches!(snapshot.error, Some(StoreError::Network(_))));
    assert!(!snapshot.is_loading);
}

#[tokio::test]
async fn successful_fetch_clears_recorded_error() {
    let store = ScriptedStore::new();
    store.push_list(Reply::Ready(Err(StoreError::Network("down".to_string()))));
    store.push_list(Reply::Ready(Ok(vec![doc_row("1", "back")])));
    let docs = collection(store);

    docs.fetch().await.unwrap_err();
    assert!(docs.snapshot().error.is_some());

    docs.fetch().await.unwrap();
    let snapshot = docs.snapshot();
    assert_eq!(snapshot.error, None);
    assert_eq!(snapshot.items[0].name, "back");
}

#[tokio::test]
async fn create_leaves_items_alone_until_refresh() {
    let store = Rc::new(MemoryStore::new());
    store.seed("docs", vec![doc_row("doc-a", "first")]);
    let docs: Collection<Doc> =
        Collection::new(Rc::clone(&store) as Rc<dyn DocumentStore>, "docs");

    docs.fetch().await.unwrap();
    assert_eq!(docs.snapshot().items.len(), 1);

    let created = docs
        .create(&NewDoc {
            name: "second".to_string(),
        })
        .await
        .unwrap();
    assert_eq!(created.name, "second");
    // Remote-first: the local list is stale until an explicit refresh.
    assert_eq!(docs.snapshot().items.len(), 1);

    docs.refresh().await.unwrap();
    let snapshot = docs.snapshot();
    assert_eq!(snapshot.items.len(), 2);
    assert!(snapshot.items.iter().any(|d| d.name == "second"));
}

#[tokio::test]
async fn failed_mutation_records_error_without_touching_items() {
    let store = ScriptedStore::new();
    store.push_list(Reply::Ready(Ok(vec![doc_row("1", "kept")])));
    store.push_create(Reply::Ready(Err(StoreError::Validation(
        "name taken".to_string(),
    ))));
    let docs = collection(store);

    docs.fetch().await.unwrap();
    let err = docs
        .create(&NewDoc {
            name: "kept".to_string(),
        })
        .await
        .unwrap_err();
    assert!(matches!(err, StoreError::Validation(_)));

    let snapshot = docs.snapshot();
    assert_eq!(snapshot.items.len(), 1);
    assert!(matches!(snapshot.error, Some(StoreError::Validation(_))));
}

#[tokio::test]
async fn close_makes_inflight_fetch_inert() {
    let local = LocalSet::new();
    local
        .run_until(async {
            let store = ScriptedStore::new();
            let (tx, rx) = oneshot::channel();
            store.push_list(Reply::Wait(rx));
            let docs = collection(store);

            let notifications = Rc::new(Cell::new(0u32));
            {
                let notifications = Rc::clone(&notifications);
                docs.subscribe(move || notifications.set(notifications.get() + 1));
            }

            let pending = {
                let docs = Rc::clone(&docs);
                tokio::task::spawn_local(async move { docs.fetch().await })
            };
            tick().await;
            assert_eq!(notifications.get(), 1);

            docs.close();
            tx.send(Ok(vec![doc_row("1", "late")])).ok().unwrap();

            // The caller still receives its result.
            let late = pending.await.unwrap().unwrap();
            assert_eq!(late[0].name, "late");

            // But nothing was written or announced after close.
            assert!(docs.snapshot().items.is_empty());
            assert_eq!(notifications.get(), 1);
        })
        .await;
}

#[tokio::test]
async fn fetch_on_closed_collection_is_rejected() {
    let docs = collection(ScriptedStore::new());
    docs.close();
    let err = docs.fetch().await.unwrap_err();
    assert!(matches!(err, StoreError::Unknown(_)));
}

#[tokio::test]
async fn unauthorized_fetch_invokes_hook() {
    let store = ScriptedStore::new();
    store.push_list(Reply::Ready(Err(StoreError::Unauthorized(
        "token expired".to_string(),
    ))));
    let fired = Rc::new(Cell::new(false));
    let docs: Collection<Doc> = {
        let fired = Rc::clone(&fired);
        Collection::new(Rc::new(store), "docs").with_unauthorized_hook(move || fired.set(true))
    };

    docs.fetch().await.unwrap_err();
    assert!(fired.get());
}

#[tokio::test]
async fn unauthorized_mutation_invokes_hook() {
    let store = ScriptedStore::new();
    store.push_delete(Reply::Ready(Err(StoreError::Unauthorized(
        "token expired".to_string(),
    ))));
    let fired = Rc::new(Cell::new(false));
    let docs: Collection<Doc> = {
        let fired = Rc::clone(&fired);
        Collection::new(Rc::new(store), "docs").with_unauthorized_hook(move || fired.set(true))
    };

    docs.delete("doc-1").await.unwrap_err();
    assert!(fired.get());
    assert!(matches!(
        docs.snapshot().error,
        Some(StoreError::Unauthorized(_))
    ));
}

#[tokio::test]
async fn listeners_see_loading_and_settled_states() {
    let store = ScriptedStore::new();
    store.push_list(Reply::Ready(Ok(vec![doc_row("1", "one")])));
    store.push_list(Reply::Ready(Ok(vec![doc_row("1", "one")])));
    let docs = collection(store);

    let notifications = Rc::new(Cell::new(0u32));
    let id = {
        let notifications = Rc::clone(&notifications);
        docs.subscribe(move || notifications.set(notifications.get() + 1))
    };

    docs.fetch().await.unwrap();
    // One for entering the loading state, one for settling.
    assert_eq!(notifications.get(), 2);

    docs.unsubscribe(id);
    docs.fetch().await.unwrap();
    assert_eq!(notifications.get(), 2);
}

#[tokio::test]
async fn unencodable_payload_is_recorded_like_any_mutation_failure() {
    struct Unencodable;
    impl Serialize for Unencodable {
        fn serialize<S: serde::Serializer>(&self, _serializer: S) -> Result<S::Ok, S::Error> {
            Err(serde::ser::Error::custom("not json"))
        }
    }

    // No create reply queued: the payload must never reach the store.
    let store = ScriptedStore::new();
    store.push_list(Reply::Ready(Ok(vec![doc_row("1", "kept")])));
    let docs = collection(store);
    docs.fetch().await.unwrap();

    let err = docs.create(&Unencodable).await.unwrap_err();
    assert!(matches!(err, StoreError::Unknown(_)));

    let snapshot = docs.snapshot();
    assert!(matches!(snapshot.error, Some(StoreError::Unknown(_))));
    assert_eq!(snapshot.items.len(), 1);
}

#[tokio::test]
async fn undecodable_row_reports_unknown_error() {
    let store = ScriptedStore::new();
    store.push_list(Reply::Ready(Ok(vec![json!({"id": 7})])));
    let docs = collection(store);

    let err = docs.fetch().await.unwrap_err();
    assert!(matches!(err, StoreError::Unknown(_)));
    assert!(docs.snapshot().items.is_empty());
}
