//! Backend trait implemented by every object store

use async_trait::async_trait;

use crate::error::StoreResult;

/// Object-storage operations used by the store.
///
/// Each call is a single round trip against the backend; there are no retries,
/// no timeouts and no caching at this layer. Callers that need such policies
/// layer them on top.
#[async_trait]
pub trait ObjectBackend: Send + Sync {
    /// Write an object, replacing any existing content at `key`.
    async fn put(
        &self,
        bucket: &str,
        key: &str,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> StoreResult<()>;

    /// Read an object's full contents.
    ///
    /// Fails with [`StoreError::NotFound`](crate::StoreError::NotFound) when
    /// the backend reports its well-defined not-found signal, and
    /// [`StoreError::Storage`](crate::StoreError::Storage) for anything else.
    async fn get(&self, bucket: &str, key: &str) -> StoreResult<Vec<u8>>;

    /// Whether an object exists at `key`.
    ///
    /// Returns `false` only for the backend's not-found signal; any other
    /// failure surfaces as an error rather than being conflated with absence.
    async fn head(&self, bucket: &str, key: &str) -> StoreResult<bool>;

    /// Keys under `prefix` in backend order, with the queried prefix stripped
    /// and empty remainders filtered out.
    async fn list(&self, bucket: &str, prefix: &str) -> StoreResult<Vec<String>>;
}
