//! In-memory backend for tests and local development

use std::collections::BTreeMap;

use async_trait::async_trait;
use dashmap::DashMap;

use crate::backend::ObjectBackend;
use crate::error::{StoreError, StoreResult};

/// Thread-safe in-memory object store.
///
/// Objects within a bucket live in a `BTreeMap`, so `list` returns keys in
/// lexicographic order like S3 does.
#[derive(Debug, Default)]
pub struct MemoryBackend {
    buckets: DashMap<String, BTreeMap<String, Vec<u8>>>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored objects across all buckets
    pub fn object_count(&self) -> usize {
        self.buckets.iter().map(|bucket| bucket.value().len()).sum()
    }
}

#[async_trait]
impl ObjectBackend for MemoryBackend {
    async fn put(
        &self,
        bucket: &str,
        key: &str,
        bytes: Vec<u8>,
        _content_type: &str,
    ) -> StoreResult<()> {
        self.buckets
            .entry(bucket.to_string())
            .or_default()
            .insert(key.to_string(), bytes);
        Ok(())
    }

    async fn get(&self, bucket: &str, key: &str) -> StoreResult<Vec<u8>> {
        self.buckets
            .get(bucket)
            .and_then(|objects| objects.get(key).cloned())
            .ok_or_else(|| StoreError::not_found(bucket, key))
    }

    async fn head(&self, bucket: &str, key: &str) -> StoreResult<bool> {
        Ok(self
            .buckets
            .get(bucket)
            .is_some_and(|objects| objects.contains_key(key)))
    }

    async fn list(&self, bucket: &str, prefix: &str) -> StoreResult<Vec<String>> {
        let Some(objects) = self.buckets.get(bucket) else {
            return Ok(Vec::new());
        };
        Ok(objects
            .keys()
            .filter_map(|key| key.strip_prefix(prefix))
            .filter(|rest| !rest.is_empty())
            .map(str::to_string)
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn put_then_get_returns_the_bytes() {
        let backend = MemoryBackend::new();
        backend
            .put("b", "a.txt", b"hello".to_vec(), "text/plain")
            .await
            .unwrap();
        assert_eq!(backend.get("b", "a.txt").await.unwrap(), b"hello");
        assert_eq!(backend.object_count(), 1);
    }

    #[tokio::test]
    async fn get_of_absent_key_is_not_found() {
        let backend = MemoryBackend::new();
        let err = backend.get("b", "missing.txt").await.unwrap_err();
        assert!(matches!(err, StoreError::NotFound { .. }));
    }

    #[tokio::test]
    async fn head_reports_presence_without_erroring() {
        let backend = MemoryBackend::new();
        assert!(!backend.head("b", "a.txt").await.unwrap());
        backend
            .put("b", "a.txt", Vec::new(), "text/plain")
            .await
            .unwrap();
        assert!(backend.head("b", "a.txt").await.unwrap());
    }

    #[tokio::test]
    async fn put_replaces_existing_content() {
        let backend = MemoryBackend::new();
        backend
            .put("b", "a.txt", b"one".to_vec(), "text/plain")
            .await
            .unwrap();
        backend
            .put("b", "a.txt", b"two".to_vec(), "text/plain")
            .await
            .unwrap();
        assert_eq!(backend.get("b", "a.txt").await.unwrap(), b"two");
        assert_eq!(backend.object_count(), 1);
    }

    #[tokio::test]
    async fn list_strips_the_prefix_and_filters_empty_remainders() {
        let backend = MemoryBackend::new();
        for key in ["daily/", "daily/a.csv", "daily/b.csv", "weekly/c.csv"] {
            backend
                .put("b", key, Vec::new(), "text/csv")
                .await
                .unwrap();
        }

        let keys = backend.list("b", "daily/").await.unwrap();
        assert_eq!(keys, vec!["a.csv", "b.csv"]);

        let all = backend.list("b", "").await.unwrap();
        assert_eq!(all, vec!["daily/", "daily/a.csv", "daily/b.csv", "weekly/c.csv"]);
    }

    #[test]
    fn backend_is_usable_from_a_synchronous_context() {
        let backend = MemoryBackend::new();
        tokio_test::block_on(async {
            backend
                .put("b", "a.txt", b"hello".to_vec(), "text/plain")
                .await
                .unwrap();
            assert!(backend.head("b", "a.txt").await.unwrap());
            assert_eq!(backend.get("b", "a.txt").await.unwrap(), b"hello");
        });
    }

    #[tokio::test]
    async fn buckets_are_isolated() {
        let backend = MemoryBackend::new();
        backend
            .put("one", "a.txt", b"1".to_vec(), "text/plain")
            .await
            .unwrap();
        assert!(backend.list("two", "").await.unwrap().is_empty());
        assert!(!backend.head("two", "a.txt").await.unwrap());
    }
}
