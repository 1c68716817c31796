//! Public store surface: init, upload, download, exists, list

use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::{debug, info};

use crate::backend::ObjectBackend;
use crate::codec::{self, Payload};
#[cfg(feature = "s3")]
use crate::config::Credentials;
use crate::error::{StoreError, StoreResult};
use crate::format::Format;
use crate::location::{self, ObjectLocation};
#[cfg(feature = "s3")]
use crate::s3::S3Backend;

/// Stateful facade over one object-storage backend.
///
/// A `Store` starts uninitialized; [`init`](Store::init) validates the
/// credential bundle and installs the client handle, after which the handle is
/// only read, never mutated mid-operation, so any number of operations can be
/// in flight concurrently. Re-invoking `init` replaces the handle.
pub struct Store {
    backend: RwLock<Option<Arc<dyn ObjectBackend>>>,
}

impl Store {
    /// New store with no client handle.
    ///
    /// Every operation fails with
    /// [`StoreError::NotInitialized`] until `init` succeeds; the check happens
    /// before anything could reach the network.
    pub fn new() -> Self {
        Self {
            backend: RwLock::new(None),
        }
    }

    /// Ready store over an injected backend.
    pub fn with_backend(backend: Arc<dyn ObjectBackend>) -> Self {
        Self {
            backend: RwLock::new(Some(backend)),
        }
    }

    /// Validate the credential bundle and install an S3 client handle,
    /// replacing any previous one.
    #[cfg(feature = "s3")]
    pub async fn init(&self, credentials: Credentials) -> StoreResult<()> {
        let backend = S3Backend::connect(&credentials).await?;
        *self.backend.write().await = Some(Arc::new(backend));
        info!("store initialized");
        Ok(())
    }

    /// Serialize `data` according to the file's extension and put it at
    /// `bucket[/path]/file`.
    pub async fn upload(
        &self,
        bucket: &str,
        path: Option<&str>,
        file: &str,
        data: &Payload,
    ) -> StoreResult<()> {
        let backend = self.handle().await?;
        let location = locate(bucket, path, file)?;
        let format = Format::from_filename(file)?;
        let bytes = codec::encode(data, format)?;

        debug!(bucket, key = %location.key(), %format, "uploading");
        backend
            .put(
                &location.bucket,
                &location.key(),
                bytes,
                format.content_type(),
            )
            .await
    }

    /// Get the object at `bucket[/path]/file` and decode it according to the
    /// file's extension.
    pub async fn download(
        &self,
        bucket: &str,
        path: Option<&str>,
        file: &str,
    ) -> StoreResult<Payload> {
        let backend = self.handle().await?;
        let location = locate(bucket, path, file)?;
        let format = Format::from_filename(file)?;

        debug!(bucket, key = %location.key(), %format, "downloading");
        let bytes = backend.get(&location.bucket, &location.key()).await?;
        codec::decode(&bytes, format)
    }

    /// Whether an object exists at `bucket[/path]/file`.
    ///
    /// The backend's not-found signal becomes a plain `false`; every other
    /// failure is surfaced unchanged.
    pub async fn exists(&self, bucket: &str, path: Option<&str>, file: &str) -> StoreResult<bool> {
        let backend = self.handle().await?;
        let location = locate(bucket, path, file)?;
        // The extension is validated even though no codec runs for a head.
        Format::from_filename(file)?;

        debug!(bucket, key = %location.key(), "checking existence");
        backend.head(&location.bucket, &location.key()).await
    }

    /// Keys stored under `bucket[/path]`, in backend order, with the path
    /// prefix stripped.
    pub async fn list(&self, bucket: &str, path: Option<&str>) -> StoreResult<Vec<String>> {
        let backend = self.handle().await?;
        if bucket.trim().is_empty() {
            return Err(StoreError::missing_parameter("bucket"));
        }
        let prefix = location::list_prefix(path);

        debug!(bucket, %prefix, "listing");
        backend.list(bucket, &prefix).await
    }

    async fn handle(&self) -> StoreResult<Arc<dyn ObjectBackend>> {
        self.backend
            .read()
            .await
            .clone()
            .ok_or(StoreError::NotInitialized)
    }
}

impl Default for Store {
    fn default() -> Self {
        Self::new()
    }
}

fn locate(bucket: &str, path: Option<&str>, file: &str) -> StoreResult<ObjectLocation> {
    if bucket.trim().is_empty() {
        return Err(StoreError::missing_parameter("bucket"));
    }
    if file.trim().is_empty() {
        return Err(StoreError::missing_parameter("file"));
    }
    Ok(ObjectLocation::new(bucket, path, file))
}
