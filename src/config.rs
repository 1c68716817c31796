//! Credential and endpoint configuration for the S3 backend

use crate::error::{StoreError, StoreResult};

/// Credential bundle consumed by [`Store::init`](crate::Store::init).
///
/// `access_key_id`, `secret_access_key` and `region` are required; the
/// endpoint and addressing-style knobs exist for S3-compatible services
/// (MinIO, Garage, R2) that are not AWS itself.
#[derive(Debug, Clone, Default)]
pub struct Credentials {
    pub access_key_id: String,
    pub secret_access_key: String,
    pub region: String,
    /// Custom endpoint URL for S3-compatible services
    pub endpoint_url: Option<String>,
    /// Path-style addressing, required by some S3-compatible services
    pub path_style: bool,
}

impl Credentials {
    pub fn new(
        access_key_id: impl Into<String>,
        secret_access_key: impl Into<String>,
        region: impl Into<String>,
    ) -> Self {
        Self {
            access_key_id: access_key_id.into(),
            secret_access_key: secret_access_key.into(),
            region: region.into(),
            endpoint_url: None,
            path_style: false,
        }
    }

    /// Point the client at a custom S3-compatible endpoint
    pub fn with_endpoint(mut self, endpoint_url: impl Into<String>) -> Self {
        self.endpoint_url = Some(endpoint_url.into());
        self
    }

    /// Switch to path-style bucket addressing
    pub fn with_path_style(mut self) -> Self {
        self.path_style = true;
        self
    }

    /// Every required field must be non-empty.
    pub(crate) fn validate(&self) -> StoreResult<()> {
        let required = [
            ("access_key_id", &self.access_key_id),
            ("secret_access_key", &self.secret_access_key),
            ("region", &self.region),
        ];
        for (name, value) in required {
            if value.trim().is_empty() {
                return Err(StoreError::config(format!(
                    "required credential field is empty: {name}"
                )));
            }
        }
        Ok(())
    }
}
