//! Media gateway
//!
//! The public media operation set, expressed over the `MediaProvider`
//! seam. The gateway holds no state of its own; the delete fallback below
//! is the only behavioral decision it owns, everything else passes through.

use std::sync::Arc;

use bytes::Bytes;

use nimbus_core::models::Asset;

use crate::traits::{DestroyReceipt, MediaProvider, ResourceKind, StorageResult};

/// Stateless service translating media operations into provider calls.
#[derive(Clone)]
pub struct MediaGateway {
    provider: Arc<dyn MediaProvider>,
    default_folder: String,
    default_list_limit: usize,
}

impl MediaGateway {
    pub fn new(
        provider: Arc<dyn MediaProvider>,
        default_folder: impl Into<String>,
        default_list_limit: usize,
    ) -> Self {
        Self {
            provider,
            default_folder: default_folder.into(),
            default_list_limit,
        }
    }

    /// Upload one file into `folder` (or the configured default). A single
    /// attempt; provider failures propagate unchanged.
    pub async fn store(
        &self,
        folder: Option<&str>,
        filename: &str,
        content_type: &str,
        data: Bytes,
    ) -> StorageResult<Asset> {
        let folder = folder.unwrap_or(&self.default_folder);
        self.provider
            .store(folder, filename, content_type, data)
            .await
    }

    /// One bounded page of assets in `folder`, newest first. Never yields
    /// more than the limit, whatever the provider sends back.
    pub async fn list(
        &self,
        folder: Option<&str>,
        limit: Option<usize>,
    ) -> StorageResult<Vec<Asset>> {
        let folder = folder.unwrap_or(&self.default_folder);
        let limit = limit.unwrap_or(self.default_list_limit);

        let mut assets = self.provider.search(folder, limit).await?;
        assets.truncate(limit);
        Ok(assets)
    }

    /// Fetch one asset by its exact, already-decoded identifier.
    pub async fn fetch_one(&self, public_id: &str) -> StorageResult<Asset> {
        self.provider.resource(public_id).await
    }

    /// Remove an asset whose resource type is unknown.
    ///
    /// The provider's destroy endpoint wants an asserted resource type, so
    /// the removal is first attempted as `image`. Only when that receipt
    /// says the resource is missing is a second attempt made as `video`,
    /// and that second receipt is the final outcome whether it succeeded
    /// or reported missing again. Never more than two provider calls.
    pub async fn delete(&self, public_id: &str) -> StorageResult<DestroyReceipt> {
        let receipt = self.provider.destroy(public_id, ResourceKind::Image).await?;
        if !receipt.is_missing() {
            return Ok(receipt);
        }

        tracing::debug!(
            public_id = %public_id,
            result = %receipt.result,
            "Image delete reported missing, retrying as video"
        );
        self.provider.destroy(public_id, ResourceKind::Video).await
    }
}
