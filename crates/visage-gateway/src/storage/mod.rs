//! Object storage for avatars.
//!
//! The hosted bucket is consumed through two operations: an
//! overwrite-capable upload to a caller-chosen path, and public URL
//! resolution for that path. The bucket is assumed public-read.

use async_trait::async_trait;
use bytes::Bytes;
use thiserror::Error;

use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Error type returned by object-store operations.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("storage endpoint rejected upload with status {0}")]
    Rejected(u16),

    #[error("object already exists: {0}")]
    AlreadyExists(String),
}

/// Object storage abstraction.
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Store an object at `path`. With `overwrite`, an existing object
    /// at the same path is replaced in place.
    async fn upload(
        &self,
        path: &str,
        bytes: Bytes,
        content_type: &str,
        overwrite: bool,
    ) -> Result<(), StorageError>;

    /// Public URL an object at `path` is served from.
    fn public_url(&self, path: &str) -> String;
}

/// HTTP client for the hosted storage bucket.
#[derive(Debug, Clone)]
pub struct BucketClient {
    http: reqwest::Client,
    endpoint: String,
    bucket: String,
    api_key: String,
}

impl BucketClient {
    /// Build a client for one bucket. `endpoint` is the storage API
    /// base, e.g. `https://xyz.hosted.example/storage/v1`.
    pub fn new(endpoint: &str, bucket: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            endpoint: endpoint.trim_end_matches('/').to_string(),
            bucket: bucket.into(),
            api_key: api_key.into(),
        }
    }
}

#[async_trait]
impl ObjectStore for BucketClient {
    async fn upload(
        &self,
        path: &str,
        bytes: Bytes,
        content_type: &str,
        overwrite: bool,
    ) -> Result<(), StorageError> {
        let url = format!("{}/object/{}/{}", self.endpoint, self.bucket, path);
        let response = self
            .http
            .post(url)
            .bearer_auth(&self.api_key)
            .header("x-upsert", overwrite.to_string())
            .header(reqwest::header::CONTENT_TYPE, content_type)
            .body(bytes)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(StorageError::Rejected(response.status().as_u16()));
        }
        Ok(())
    }

    fn public_url(&self, path: &str) -> String {
        format!("{}/object/public/{}/{}", self.endpoint, self.bucket, path)
    }
}

/// One stored object.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredObject {
    pub bytes: Bytes,
    pub content_type: String,
}

/// In-memory object store for tests and database-less runs.
#[derive(Debug, Clone)]
pub struct InMemoryObjectStore {
    objects: Arc<RwLock<HashMap<String, StoredObject>>>,
    base_url: String,
}

impl Default for InMemoryObjectStore {
    fn default() -> Self {
        Self {
            objects: Arc::new(RwLock::new(HashMap::new())),
            base_url: "https://storage.local/object/public/avatars".to_string(),
        }
    }
}

impl InMemoryObjectStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fetch a stored object, for assertions.
    pub async fn get(&self, path: &str) -> Option<StoredObject> {
        self.objects.read().await.get(path).cloned()
    }

    /// Number of stored objects.
    pub async fn len(&self) -> usize {
        self.objects.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.objects.read().await.is_empty()
    }
}

#[async_trait]
impl ObjectStore for InMemoryObjectStore {
    async fn upload(
        &self,
        path: &str,
        bytes: Bytes,
        content_type: &str,
        overwrite: bool,
    ) -> Result<(), StorageError> {
        let mut objects = self.objects.write().await;
        if !overwrite && objects.contains_key(path) {
            return Err(StorageError::AlreadyExists(path.to_string()));
        }
        objects.insert(
            path.to_string(),
            StoredObject {
                bytes,
                content_type: content_type.to_string(),
            },
        );
        Ok(())
    }

    fn public_url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn upload_with_overwrite_replaces_in_place() {
        let store = InMemoryObjectStore::new();

        store
            .upload("u/avatar.png", Bytes::from_static(b"v1"), "image/png", true)
            .await
            .unwrap();
        store
            .upload("u/avatar.png", Bytes::from_static(b"v2"), "image/png", true)
            .await
            .unwrap();

        assert_eq!(store.len().await, 1);
        assert_eq!(
            store.get("u/avatar.png").await.unwrap().bytes,
            Bytes::from_static(b"v2")
        );
    }

    #[tokio::test]
    async fn upload_without_overwrite_refuses_existing_path() {
        let store = InMemoryObjectStore::new();
        store
            .upload("u/avatar.png", Bytes::from_static(b"v1"), "image/png", false)
            .await
            .unwrap();

        let err = store
            .upload("u/avatar.png", Bytes::from_static(b"v2"), "image/png", false)
            .await
            .unwrap_err();
        assert!(matches!(err, StorageError::AlreadyExists(_)));
    }

    #[test]
    fn bucket_public_url_is_under_the_public_prefix() {
        let client = BucketClient::new("https://xyz.hosted.example/storage/v1/", "avatars", "key");
        assert_eq!(
            client.public_url("u/avatar.png"),
            "https://xyz.hosted.example/storage/v1/object/public/avatars/u/avatar.png"
        );
    }
}
