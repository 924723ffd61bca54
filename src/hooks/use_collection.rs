//! Hook binding a [`Collection`] to the component lifecycle.

use std::cell::RefCell;
use std::rc::Rc;

use dioxus::prelude::*;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::auth_session::SessionContext;
use crate::collection::{Collection, CollectionSnapshot};
use crate::error::StoreError;
use crate::log_warn;

/// What `use_collection` hands back: reactive snapshot reads plus the
/// imperative CRUD surface of the underlying collection.
pub struct UseCollection<T: 'static> {
    collection: Rc<Collection<T>>,
    snapshot: Signal<CollectionSnapshot<T>>,
}

impl<T> Clone for UseCollection<T> {
    fn clone(&self) -> Self {
        Self {
            collection: Rc::clone(&self.collection),
            snapshot: self.snapshot,
        }
    }
}

/// Synchronize one named collection for the calling component.
///
/// Each call site owns an independent [`Collection`] bound to the given
/// name. The binding fetches once when established, re-establishes itself
/// (closing the superseded handle) when `name` changes between renders, and
/// closes on unmount so late results from in-flight calls are discarded.
pub fn use_collection<T>(name: &str) -> UseCollection<T>
where
    T: DeserializeOwned + Clone + PartialEq + 'static,
{
    let ctx = use_context::<SessionContext>();
    let mut snapshot = use_signal(CollectionSnapshot::<T>::default);
    let binding = use_hook(|| Rc::new(RefCell::new(None::<(String, Rc<Collection<T>>)>)));

    let bound = binding
        .borrow()
        .as_ref()
        .filter(|(bound, _)| bound.as_str() == name)
        .map(|(_, collection)| Rc::clone(collection));

    let collection = match bound {
        Some(collection) => collection,
        None => {
            let mut slot = binding.borrow_mut();
            if let Some((_, superseded)) = slot.take() {
                superseded.close();
            }

            let collection =
                Rc::new(Collection::<T>::new(ctx.store(), name).with_unauthorized_hook({
                    let provider = ctx.provider.clone();
                    move || provider.sign_out()
                }));

            let weak = Rc::downgrade(&collection);
            collection.subscribe(move || {
                // Signal is Copy; rebinding keeps the capture immutable so
                // the closure stays Fn.
                let mut snapshot = snapshot;
                if let Some(collection) = weak.upgrade() {
                    snapshot.set(collection.snapshot());
                }
            });
            snapshot.set(collection.snapshot());

            *slot = Some((name.to_string(), Rc::clone(&collection)));

            {
                let collection = Rc::clone(&collection);
                spawn(async move {
                    if let Err(e) = collection.fetch().await {
                        log_warn!("initial fetch of '{}' failed: {}", collection.name(), e);
                    }
                });
            }
            collection
        }
    };

    use_drop({
        let binding = Rc::clone(&binding);
        move || {
            if let Some((_, collection)) = binding.borrow_mut().take() {
                collection.close();
            }
        }
    });

    UseCollection {
        collection,
        snapshot,
    }
}

impl<T> UseCollection<T>
where
    T: DeserializeOwned + Clone + 'static,
{
    pub fn data(&self) -> Vec<T> {
        self.snapshot.read().items.clone()
    }

    pub fn is_loading(&self) -> bool {
        self.snapshot.read().is_loading
    }

    pub fn error(&self) -> Option<StoreError> {
        self.snapshot.read().error.clone()
    }

    pub async fn fetch(&self) -> Result<Vec<T>, StoreError> {
        self.collection.fetch().await
    }

    pub async fn refresh(&self) -> Result<(), StoreError> {
        self.collection.refresh().await
    }

    pub async fn create(&self, payload: &impl Serialize) -> Result<T, StoreError> {
        self.collection.create(payload).await
    }

    pub async fn update(&self, id: &str, payload: &impl Serialize) -> Result<T, StoreError> {
        self.collection.update(id, payload).await
    }

    pub async fn delete(&self, id: &str) -> Result<(), StoreError> {
        self.collection.delete(id).await
    }
}
