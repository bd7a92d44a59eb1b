//! Media provider abstraction
//!
//! `MediaProvider` is the seam between the gateway and the remote media
//! API. It mirrors the provider's own surface: upload and lookup detect the
//! resource type on their own, destroy requires the caller to assert one.

use async_trait::async_trait;
use bytes::Bytes;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

use nimbus_core::models::Asset;

/// Provider operation errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Upload failed: {0}")]
    UploadFailed(String),

    #[error("Search failed: {0}")]
    SearchFailed(String),

    #[error("Lookup failed: {0}")]
    LookupFailed(String),

    #[error("Destroy failed: {0}")]
    DestroyFailed(String),

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

/// Result type for provider operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Resource type asserted on provider calls that require one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceKind {
    Image,
    Video,
    Raw,
}

impl ResourceKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ResourceKind::Image => "image",
            ResourceKind::Video => "video",
            ResourceKind::Raw => "raw",
        }
    }
}

/// Raw outcome of a provider destroy call.
///
/// `result` is the provider's literal status string (`"ok"`, `"not found"`,
/// `"0"`, ...). Callers receive the whole receipt verbatim, extra fields
/// included.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DestroyReceipt {
    pub result: String,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl DestroyReceipt {
    /// Whether the provider reported that no such resource exists.
    ///
    /// Exactly two literals mean "missing": `"not found"` and `"0"`. The
    /// match is byte-exact; case variants or other falsy-looking values do
    /// not qualify.
    pub fn is_missing(&self) -> bool {
        matches!(self.result.as_str(), "not found" | "0")
    }
}

/// Remote media provider abstraction
#[async_trait]
pub trait MediaProvider: Send + Sync {
    /// Upload one file into `folder`. The provider assigns the identifier
    /// and detects the resource type from the content.
    async fn store(
        &self,
        folder: &str,
        filename: &str,
        content_type: &str,
        data: Bytes,
    ) -> StorageResult<Asset>;

    /// One page of assets in `folder`, newest first, at most `max_results`.
    async fn search(&self, folder: &str, max_results: usize) -> StorageResult<Vec<Asset>>;

    /// Exact-identifier lookup with resource-type auto-detection.
    async fn resource(&self, public_id: &str) -> StorageResult<Asset>;

    /// Remove `public_id` as a `kind`-typed resource. A missing resource is
    /// reported through the receipt, not as an error.
    async fn destroy(&self, public_id: &str, kind: ResourceKind)
        -> StorageResult<DestroyReceipt>;
}
