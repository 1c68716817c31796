//! S3 backend over aws-sdk-s3.
//!
//! Works against AWS S3 and S3-compatible services (MinIO, Garage, R2) via the
//! optional custom endpoint and path-style addressing in [`Credentials`].

use async_trait::async_trait;
use aws_config::BehaviorVersion;
use aws_sdk_s3::primitives::ByteStream;
use aws_sdk_s3::Client;
use tracing::{debug, info};

use crate::backend::ObjectBackend;
use crate::config::Credentials;
use crate::error::{StoreError, StoreResult};

/// Object backend speaking the S3 API.
#[derive(Debug, Clone)]
pub struct S3Backend {
    client: Client,
}

impl S3Backend {
    /// Build a client from a credential bundle.
    ///
    /// The bundle is validated before anything touches the SDK, so an
    /// incomplete bundle fails with a `Config` error and no network activity.
    pub async fn connect(credentials: &Credentials) -> StoreResult<Self> {
        credentials.validate()?;

        let provider = aws_sdk_s3::config::Credentials::new(
            credentials.access_key_id.clone(),
            credentials.secret_access_key.clone(),
            None,
            None,
            "s3-dataset",
        );

        let mut loader = aws_config::defaults(BehaviorVersion::latest())
            .region(aws_config::Region::new(credentials.region.clone()))
            .credentials_provider(provider);
        if let Some(endpoint) = &credentials.endpoint_url {
            loader = loader.endpoint_url(endpoint);
        }
        let sdk_config = loader.load().await;

        let mut builder = aws_sdk_s3::config::Builder::from(&sdk_config);
        if credentials.path_style {
            builder = builder.force_path_style(true);
        }
        let client = Client::from_conf(builder.build());

        info!(region = %credentials.region, "S3 client configured");
        Ok(Self { client })
    }

    /// Wrap an already-configured SDK client.
    pub fn from_client(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ObjectBackend for S3Backend {
    async fn put(
        &self,
        bucket: &str,
        key: &str,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> StoreResult<()> {
        debug!(bucket, key, size = bytes.len(), "putting object");

        self.client
            .put_object()
            .bucket(bucket)
            .key(key)
            .body(ByteStream::from(bytes))
            .content_type(content_type)
            .send()
            .await
            .map_err(|e| StoreError::storage(format!("failed to put s3://{bucket}/{key}: {e}")))?;

        Ok(())
    }

    async fn get(&self, bucket: &str, key: &str) -> StoreResult<Vec<u8>> {
        debug!(bucket, key, "getting object");

        match self.client.get_object().bucket(bucket).key(key).send().await {
            Ok(response) => {
                let data = response.body.collect().await.map_err(|e| {
                    StoreError::storage(format!("failed to read body of s3://{bucket}/{key}: {e}"))
                })?;
                Ok(data.into_bytes().to_vec())
            }
            Err(err) => {
                // The SDK's typed NoSuchKey is the backend's not-found signal;
                // everything else is a storage failure.
                if err.as_service_error().is_some_and(|e| e.is_no_such_key()) {
                    Err(StoreError::not_found(bucket, key))
                } else {
                    Err(StoreError::storage(format!(
                        "failed to get s3://{bucket}/{key}: {err}"
                    )))
                }
            }
        }
    }

    async fn head(&self, bucket: &str, key: &str) -> StoreResult<bool> {
        debug!(bucket, key, "heading object");

        match self.client.head_object().bucket(bucket).key(key).send().await {
            Ok(_) => Ok(true),
            Err(err) if err.as_service_error().is_some_and(|e| e.is_not_found()) => Ok(false),
            Err(err) => Err(StoreError::storage(format!(
                "failed to head s3://{bucket}/{key}: {err}"
            ))),
        }
    }

    async fn list(&self, bucket: &str, prefix: &str) -> StoreResult<Vec<String>> {
        debug!(bucket, prefix, "listing objects");

        let mut keys = Vec::new();
        let mut continuation_token = None;

        loop {
            let mut request = self.client.list_objects_v2().bucket(bucket);
            if !prefix.is_empty() {
                request = request.prefix(prefix);
            }
            if let Some(token) = continuation_token {
                request = request.continuation_token(token);
            }

            let response = request.send().await.map_err(|e| {
                StoreError::storage(format!("failed to list s3://{bucket}/{prefix}: {e}"))
            })?;

            if let Some(contents) = response.contents {
                for object in contents {
                    if let Some(key) = object.key {
                        if let Some(stripped) = key.strip_prefix(prefix) {
                            if !stripped.is_empty() {
                                keys.push(stripped.to_string());
                            }
                        }
                    }
                }
            }

            if response.is_truncated == Some(true) {
                continuation_token = response.next_continuation_token;
            } else {
                break;
            }
        }

        Ok(keys)
    }
}
