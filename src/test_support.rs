//! Test doubles shared by the core tests.

use std::cell::{Cell, RefCell};
use std::collections::{HashMap, VecDeque};
use std::rc::Rc;

use async_trait::async_trait;
use futures_channel::oneshot;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::error::StoreError;
use crate::session::{Identity, IdentityProvider, IdentitySubscription};
use crate::store::DocumentStore;

/// Minimal document shape used by collection tests.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Doc {
    pub id: String,
    pub name: String,
}

pub fn doc_row(id: &str, name: &str) -> Value {
    json!({ "id": id, "name": name })
}

pub fn identity(id: &str) -> Identity {
    Identity {
        id: id.to_string(),
        handle: format!("{id}-handle"),
        email: None,
    }
}

/// Let spawned local tasks run up to their next suspension point.
pub async fn tick() {
    for _ in 0..4 {
        tokio::task::yield_now().await;
    }
}

/// A scripted reply: either immediate, or gated on a oneshot so the test
/// controls completion order.
pub enum Reply<T> {
    Ready(Result<T, StoreError>),
    Wait(oneshot::Receiver<Result<T, StoreError>>),
}

impl<T> Reply<T> {
    async fn resolve(self) -> Result<T, StoreError> {
        match self {
            Reply::Ready(result) => result,
            Reply::Wait(rx) => rx.await.expect("scripted reply sender dropped"),
        }
    }
}

/// Store double that replays queued replies in call order.
#[derive(Default)]
pub struct ScriptedStore {
    lists: RefCell<VecDeque<Reply<Vec<Value>>>>,
    creates: RefCell<VecDeque<Reply<Value>>>,
    updates: RefCell<VecDeque<Reply<Value>>>,
    deletes: RefCell<VecDeque<Reply<()>>>,
}

impl ScriptedStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_list(&self, reply: Reply<Vec<Value>>) {
        self.lists.borrow_mut().push_back(reply);
    }

    pub fn push_create(&self, reply: Reply<Value>) {
        self.creates.borrow_mut().push_back(reply);
    }

    pub fn push_update(&self, reply: Reply<Value>) {
        self.updates.borrow_mut().push_back(reply);
    }

    pub fn push_delete(&self, reply: Reply<()>) {
        self.deletes.borrow_mut().push_back(reply);
    }
}

#[async_trait(?Send)]
impl DocumentStore for ScriptedStore {
    async fn list(&self, _collection: &str) -> Result<Vec<Value>, StoreError> {
        let reply = self
            .lists
            .borrow_mut()
            .pop_front()
            .expect("unexpected list call");
        reply.resolve().await
    }

    async fn create(&self, _collection: &str, _payload: Value) -> Result<Value, StoreError> {
        let reply = self
            .creates
            .borrow_mut()
            .pop_front()
            .expect("unexpected create call");
        reply.resolve().await
    }

    async fn update(
        &self,
        _collection: &str,
        _id: &str,
        _payload: Value,
    ) -> Result<Value, StoreError> {
        let reply = self
            .updates
            .borrow_mut()
            .pop_front()
            .expect("unexpected update call");
        reply.resolve().await
    }

    async fn delete(&self, _collection: &str, _id: &str) -> Result<(), StoreError> {
        let reply = self
            .deletes
            .borrow_mut()
            .pop_front()
            .expect("unexpected delete call");
        reply.resolve().await
    }
}

/// In-memory store with real CRUD semantics, for contract tests that need
/// a round trip rather than a scripted reply.
#[derive(Default)]
pub struct MemoryStore {
    rows: RefCell<HashMap<String, Vec<Value>>>,
    next_id: Cell<u64>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn seed(&self, collection: &str, rows: Vec<Value>) {
        self.rows.borrow_mut().insert(collection.to_string(), rows);
    }
}

#[async_trait(?Send)]
impl DocumentStore for MemoryStore {
    async fn list(&self, collection: &str) -> Result<Vec<Value>, StoreError> {
        Ok(self
            .rows
            .borrow()
            .get(collection)
            .cloned()
            .unwrap_or_default())
    }

    async fn create(&self, collection: &str, payload: Value) -> Result<Value, StoreError> {
        let id = self.next_id.get();
        self.next_id.set(id + 1);

        let mut row = payload;
        let obj = row
            .as_object_mut()
            .ok_or_else(|| StoreError::Validation("payload must be an object".to_string()))?;
        obj.insert("id".to_string(), json!(format!("doc-{id}")));

        self.rows
            .borrow_mut()
            .entry(collection.to_string())
            .or_default()
            .push(row.clone());
        Ok(row)
    }

    async fn update(
        &self,
        collection: &str,
        id: &str,
        payload: Value,
    ) -> Result<Value, StoreError> {
        let mut rows = self.rows.borrow_mut();
        let rows = rows
            .get_mut(collection)
            .ok_or_else(|| StoreError::NotFound(format!("no collection '{collection}'")))?;
        let row = rows
            .iter_mut()
            .find(|row| row.get("id").and_then(Value::as_str) == Some(id))
            .ok_or_else(|| StoreError::NotFound(format!("no document '{id}'")))?;

        let patch = payload
            .as_object()
            .ok_or_else(|| StoreError::Validation("payload must be an object".to_string()))?
            .clone();
        let obj = row.as_object_mut().expect("stored rows are objects");
        for (key, value) in patch {
            obj.insert(key, value);
        }
        Ok(row.clone())
    }

    async fn delete(&self, collection: &str, id: &str) -> Result<(), StoreError> {
        let mut rows = self.rows.borrow_mut();
        let rows = rows
            .get_mut(collection)
            .ok_or_else(|| StoreError::NotFound(format!("no collection '{collection}'")))?;
        let before = rows.len();
        rows.retain(|row| row.get("id").and_then(Value::as_str) != Some(id));
        if rows.len() == before {
            return Err(StoreError::NotFound(format!("no document '{id}'")));
        }
        Ok(())
    }
}

/// Identity provider double. Reports nothing on subscribe; the test drives
/// every emission, including the initial one.
pub struct FakeIdentityProvider {
    listeners: Rc<RefCell<HashMap<u64, Rc<dyn Fn(Option<Identity>)>>>>,
    next_listener: Cell<u64>,
    pub disposals: Rc<Cell<u32>>,
}

impl FakeIdentityProvider {
    pub fn new() -> Self {
        Self {
            listeners: Rc::new(RefCell::new(HashMap::new())),
            next_listener: Cell::new(1),
            disposals: Rc::new(Cell::new(0)),
        }
    }

    pub fn emit(&self, identity: Option<Identity>) {
        let listeners: Vec<Rc<dyn Fn(Option<Identity>)>> =
            self.listeners.borrow().values().cloned().collect();
        for listener in listeners {
            listener(identity.clone());
        }
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.borrow().len()
    }
}

impl IdentityProvider for FakeIdentityProvider {
    fn subscribe(&self, listener: Box<dyn Fn(Option<Identity>)>) -> IdentitySubscription {
        let id = self.next_listener.get();
        self.next_listener.set(id + 1);
        self.listeners.borrow_mut().insert(id, Rc::from(listener));

        let listeners = Rc::clone(&self.listeners);
        let disposals = Rc::clone(&self.disposals);
        IdentitySubscription::new(move || {
            listeners.borrow_mut().remove(&id);
            disposals.set(disposals.get() + 1);
        })
    }
}
