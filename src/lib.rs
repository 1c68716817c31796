//! # s3-dataset
//!
//! A small convenience layer over S3-compatible object storage for uploading,
//! downloading, checking and listing serialized tabular/text data (CSV, TSV,
//! JSON, plain text). The serialization format is inferred from the filename
//! extension; callers hand the library in-memory values and get in-memory
//! values back, without re-implementing format dispatch or (de)serialization
//! boilerplate around raw storage calls.
//!
//! ```no_run
//! use s3_dataset::{Credentials, Payload, Record, Store};
//!
//! # async fn run() -> s3_dataset::StoreResult<()> {
//! let store = Store::new();
//! store
//!     .init(Credentials::new("AKIA...", "secret", "us-east-1"))
//!     .await?;
//!
//! let row = Record::from([("x".to_string(), "1".to_string())]);
//! store
//!     .upload("my-bucket", Some("daily"), "points.csv", &Payload::Records(vec![row]))
//!     .await?;
//!
//! let data = store.download("my-bucket", Some("daily"), "points.csv").await?;
//! let keys = store.list("my-bucket", Some("daily")).await?;
//! # Ok(())
//! # }
//! ```

pub mod backend;
pub mod codec;
pub mod config;
pub mod error;
pub mod format;
pub mod location;
pub mod store;

#[cfg(feature = "memory")]
pub mod memory;

#[cfg(feature = "s3")]
pub mod s3;

pub use backend::ObjectBackend;
pub use codec::{decode, encode, Payload, Record};
pub use config::Credentials;
pub use error::{StoreError, StoreResult};
pub use format::Format;
pub use location::ObjectLocation;
pub use store::Store;

#[cfg(feature = "memory")]
pub use memory::MemoryBackend;

#[cfg(feature = "s3")]
pub use s3::S3Backend;
