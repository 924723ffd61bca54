//! Access to the remote document store.
//!
//! The store is an external collaborator: named collections of JSON
//! documents behind `/api/{collection}`. The trait seam exists so the
//! collection layer can run against an in-memory double in tests.

use async_trait::async_trait;
use serde_json::Value;

use crate::api_client::ApiClient;
use crate::error::StoreError;

/// CRUD over one named collection of JSON documents.
///
/// Futures are `?Send`: the whole client runs on a single-threaded
/// cooperative loop.
#[async_trait(?Send)]
pub trait DocumentStore {
    async fn list(&self, collection: &str) -> Result<Vec<Value>, StoreError>;
    async fn create(&self, collection: &str, payload: Value) -> Result<Value, StoreError>;
    async fn update(&self, collection: &str, id: &str, payload: Value)
        -> Result<Value, StoreError>;
    async fn delete(&self, collection: &str, id: &str) -> Result<(), StoreError>;
}

/// The real store: per-collection REST endpoints over [`ApiClient`].
#[derive(Debug, Clone)]
pub struct HttpDocumentStore {
    api: ApiClient,
}

impl HttpDocumentStore {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    fn collection_path(collection: &str) -> String {
        format!("/api/{collection}")
    }

    fn document_path(collection: &str, id: &str) -> String {
        format!("/api/{collection}/{id}")
    }
}

#[async_trait(?Send)]
impl DocumentStore for HttpDocumentStore {
    async fn list(&self, collection: &str) -> Result<Vec<Value>, StoreError> {
        self.api.get_json(&Self::collection_path(collection)).await
    }

    async fn create(&self, collection: &str, payload: Value) -> Result<Value, StoreError> {
        self.api
            .post_json(&Self::collection_path(collection), &payload)
            .await
    }

    async fn update(
        &self,
        collection: &str,
        id: &str,
        payload: Value,
    ) -> Result<Value, StoreError> {
        self.api
            .put_json(&Self::document_path(collection, id), &payload)
            .await
    }

    async fn delete(&self, collection: &str, id: &str) -> Result<(), StoreError> {
        self.api.delete(&Self::document_path(collection, id)).await
    }
}
