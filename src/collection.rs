//! Per-collection data synchronization.
//!
//! A [`Collection`] owns the `{items, is_loading, error}` triple for one
//! named collection and one consumer. The remote store is the single source
//! of truth: mutations are remote-first and never patch `items` locally, so
//! a consumer re-synchronizes with [`Collection::refresh`] after a write.
//!
//! Overlapping fetches are not coalesced. Each fetch captures a generation
//! token at issue; a completion may write state only while its token is
//! still the newest one issued. Without this, a slow early request would
//! overwrite the result of a fast later one.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use crate::error::StoreError;
use crate::store::DocumentStore;

pub type ListenerId = u64;

/// Cloned view of a collection's state, safe to hand to renderers.
#[derive(Debug, Clone, PartialEq)]
pub struct CollectionSnapshot<T> {
    /// Contents as of the last successful fetch, in server order.
    pub items: Vec<T>,
    /// True while a fetch issued by the current binding is outstanding.
    pub is_loading: bool,
    /// Last recorded failure. Cleared only by a successful fetch.
    pub error: Option<StoreError>,
}

impl<T> Default for CollectionSnapshot<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            is_loading: false,
            error: None,
        }
    }
}

struct Inner<T> {
    items: Vec<T>,
    is_loading: bool,
    error: Option<StoreError>,
    /// Newest issued fetch token. Monotonic per instance.
    generation: u64,
    closed: bool,
    listeners: HashMap<ListenerId, Rc<dyn Fn()>>,
    next_listener: ListenerId,
}

/// State container for one (collection name, consumer) pair.
pub struct Collection<T> {
    name: String,
    store: Rc<dyn DocumentStore>,
    on_unauthorized: Option<Rc<dyn Fn()>>,
    inner: Rc<RefCell<Inner<T>>>,
}

impl<T> Collection<T>
where
    T: DeserializeOwned + Clone + 'static,
{
    pub fn new(store: Rc<dyn DocumentStore>, name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            store,
            on_unauthorized: None,
            inner: Rc::new(RefCell::new(Inner {
                items: Vec::new(),
                is_loading: false,
                error: None,
                generation: 0,
                closed: false,
                listeners: HashMap::new(),
                next_listener: 1,
            })),
        }
    }

    /// Invoked whenever an operation fails with [`StoreError::Unauthorized`],
    /// so the session layer can reconcile instead of treating it as a plain
    /// data error.
    pub fn with_unauthorized_hook(mut self, hook: impl Fn() + 'static) -> Self {
        self.on_unauthorized = Some(Rc::new(hook));
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn snapshot(&self) -> CollectionSnapshot<T> {
        let inner = self.inner.borrow();
        CollectionSnapshot {
            items: inner.items.clone(),
            is_loading: inner.is_loading,
            error: inner.error.clone(),
        }
    }

    /// Register a change listener. Listeners run after every applied state
    /// change; they are dropped on [`Collection::close`].
    pub fn subscribe(&self, listener: impl Fn() + 'static) -> ListenerId {
        let mut inner = self.inner.borrow_mut();
        if inner.closed {
            return 0;
        }
        let id = inner.next_listener;
        inner.next_listener += 1;
        inner.listeners.insert(id, Rc::new(listener));
        id
    }

    pub fn unsubscribe(&self, id: ListenerId) {
        self.inner.borrow_mut().listeners.remove(&id);
    }

    /// Tear the handle down. In-flight results become inert on arrival and
    /// no further notifications are delivered.
    pub fn close(&self) {
        let mut inner = self.inner.borrow_mut();
        inner.closed = true;
        inner.listeners.clear();
    }

    /// Read the entire collection. On success replaces `items` and clears
    /// `error`; on failure leaves `items` untouched and records `error`.
    ///
    /// The caller always gets its own result back, but state is written
    /// only if no later fetch has been issued in the meantime and the
    /// handle is still open.
    pub async fn fetch(&self) -> Result<Vec<T>, StoreError> {
        let token = {
            let mut inner = self.inner.borrow_mut();
            if inner.closed {
                return Err(StoreError::Unknown(format!(
                    "collection '{}' is closed",
                    self.name
                )));
            }
            inner.generation += 1;
            inner.is_loading = true;
            inner.generation
        };
        self.notify();

        let result = match self.store.list(&self.name).await {
            Ok(rows) => self.decode_rows(rows),
            Err(e) => Err(e),
        };

        let superseded = {
            let inner = self.inner.borrow();
            inner.closed || inner.generation != token
        };
        if superseded {
            return result;
        }

        {
            let mut inner = self.inner.borrow_mut();
            inner.is_loading = false;
            match &result {
                Ok(items) => {
                    inner.items = items.clone();
                    inner.error = None;
                }
                Err(e) => {
                    inner.error = Some(e.clone());
                }
            }
        }
        if let Err(e) = &result {
            self.reconcile_unauthorized(e);
        }
        self.notify();
        result
    }

    /// [`Collection::fetch`] discarding the payload; the usual follow-up to
    /// a successful mutation.
    pub async fn refresh(&self) -> Result<(), StoreError> {
        self.fetch().await.map(|_| ())
    }

    /// Create a document. `items` is not updated speculatively; call
    /// [`Collection::refresh`] to pick the record up.
    pub async fn create(&self, payload: &impl Serialize) -> Result<T, StoreError> {
        let payload = self.encode_or_record(payload)?;
        let result = match self.store.create(&self.name, payload).await {
            Ok(row) => self.decode_row(row),
            Err(e) => Err(e),
        };
        if let Err(e) = &result {
            self.record_mutation_error(e);
        }
        result
    }

    /// Update a document by id. Same contract shape as [`Collection::create`].
    pub async fn update(&self, id: &str, payload: &impl Serialize) -> Result<T, StoreError> {
        let payload = self.encode_or_record(payload)?;
        let result = match self.store.update(&self.name, id, payload).await {
            Ok(row) => self.decode_row(row),
            Err(e) => Err(e),
        };
        if let Err(e) = &result {
            self.record_mutation_error(e);
        }
        result
    }

    /// Delete a document by id. Same contract shape as [`Collection::create`].
    pub async fn delete(&self, id: &str) -> Result<(), StoreError> {
        let result = self.store.delete(&self.name, id).await;
        if let Err(e) = &result {
            self.record_mutation_error(e);
        }
        result
    }

    /// A payload that fails to encode is a mutation failure like any other:
    /// recorded before the rejection, and it never reaches the store.
    fn encode_or_record(&self, payload: &impl Serialize) -> Result<Value, StoreError> {
        encode_payload(payload).inspect_err(|e| self.record_mutation_error(e))
    }

    /// Mutations reject *and* record, so imperative callers and reactive
    /// renderers both observe the failure. They never touch `items`, and a
    /// prior fetch error is simply replaced, never silently cleared.
    fn record_mutation_error(&self, e: &StoreError) {
        {
            let mut inner = self.inner.borrow_mut();
            if inner.closed {
                return;
            }
            inner.error = Some(e.clone());
        }
        self.reconcile_unauthorized(e);
        self.notify();
    }

    fn reconcile_unauthorized(&self, e: &StoreError) {
        if e.is_unauthorized() {
            if let Some(hook) = &self.on_unauthorized {
                hook();
            }
        }
    }

    fn decode_rows(&self, rows: Vec<Value>) -> Result<Vec<T>, StoreError> {
        rows.into_iter().map(|row| self.decode_row(row)).collect()
    }

    fn decode_row(&self, row: Value) -> Result<T, StoreError> {
        serde_json::from_value(row).map_err(|e| {
            StoreError::Unknown(format!("bad document in '{}': {e}", self.name))
        })
    }

    /// Listeners are cloned out before invocation so a listener may call
    /// back into the collection without a re-entrant borrow.
    fn notify(&self) {
        let listeners: Vec<Rc<dyn Fn()>> = {
            let inner = self.inner.borrow();
            if inner.closed {
                return;
            }
            inner.listeners.values().cloned().collect()
        };
        for listener in listeners {
            listener();
        }
    }
}

fn encode_payload(payload: &impl Serialize) -> Result<Value, StoreError> {
    serde_json::to_value(payload)
        .map_err(|e| StoreError::Unknown(format!("unencodable payload: {e}")))
}
