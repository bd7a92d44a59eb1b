//! Cloudinary REST client
//!
//! `MediaProvider` implementation against the Cloudinary upload and admin
//! APIs. Upload and destroy calls carry a request signature; admin reads
//! use basic auth. The provider's response contract, including the destroy
//! result strings, is confined to this crate.

use async_trait::async_trait;
use bytes::Bytes;
use chrono::Utc;
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use reqwest::multipart::{Form, Part};
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use sha2::{Digest, Sha256};

use nimbus_core::config::CloudinaryConfig;
use nimbus_core::models::Asset;

use crate::traits::{DestroyReceipt, MediaProvider, ResourceKind, StorageError, StorageResult};

/// Characters escaped when a public identifier is embedded in a URL path.
/// Slashes stay literal: inside an identifier they are folder separators,
/// not path boundaries the admin API would reject.
const PUBLIC_ID_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'/')
    .remove(b'.')
    .remove(b'-')
    .remove(b'_');

/// Cloudinary API client
#[derive(Clone)]
pub struct CloudinaryClient {
    http: Client,
    cloud_name: String,
    api_key: String,
    api_secret: String,
    base_url: String,
}

impl std::fmt::Debug for CloudinaryClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CloudinaryClient")
            .field("cloud_name", &self.cloud_name)
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

impl CloudinaryClient {
    /// Build a client from provider credentials.
    ///
    /// No request timeout is configured; the transport's defaults apply and
    /// long uploads are not cut short here.
    pub fn new(config: &CloudinaryConfig) -> StorageResult<Self> {
        let http = Client::builder()
            .build()
            .map_err(|e| StorageError::Config(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            http,
            cloud_name: config.cloud_name.clone(),
            api_key: config.api_key.clone(),
            api_secret: config.api_secret.clone(),
            base_url: config.api_base_url.trim_end_matches('/').to_string(),
        })
    }

    fn upload_url(&self) -> String {
        // `auto` lets the provider detect image vs. video vs. raw.
        format!("{}/v1_1/{}/auto/upload", self.base_url, self.cloud_name)
    }

    fn search_url(&self) -> String {
        format!("{}/v1_1/{}/resources/search", self.base_url, self.cloud_name)
    }

    fn resource_url(&self, kind: ResourceKind, public_id: &str) -> String {
        let encoded = utf8_percent_encode(public_id, PUBLIC_ID_SET);
        format!(
            "{}/v1_1/{}/resources/{}/upload/{}",
            self.base_url,
            self.cloud_name,
            kind.as_str(),
            encoded
        )
    }

    fn destroy_url(&self, kind: ResourceKind) -> String {
        format!(
            "{}/v1_1/{}/{}/destroy",
            self.base_url,
            self.cloud_name,
            kind.as_str()
        )
    }

    /// Request signature over the signed parameters: `k=v` pairs sorted by
    /// key, joined with `&`, the API secret appended, SHA-256, hex.
    fn sign(&self, params: &[(&str, &str)]) -> String {
        let mut sorted: Vec<(&str, &str)> = params.to_vec();
        sorted.sort_by_key(|(key, _)| *key);

        let payload: Vec<String> = sorted
            .iter()
            .map(|(key, value)| format!("{key}={value}"))
            .collect();

        let mut hasher = Sha256::new();
        hasher.update(payload.join("&").as_bytes());
        hasher.update(self.api_secret.as_bytes());
        hex::encode(hasher.finalize())
    }

    async fn read_error_body(response: reqwest::Response) -> String {
        let status = response.status();
        let body = response
            .text()
            .await
            .unwrap_or_else(|_| "<unreadable body>".to_string());
        format!("{status}: {body}")
    }
}

#[async_trait]
impl MediaProvider for CloudinaryClient {
    async fn store(
        &self,
        folder: &str,
        filename: &str,
        content_type: &str,
        data: Bytes,
    ) -> StorageResult<Asset> {
        let size_bytes = data.len();
        let timestamp = Utc::now().timestamp().to_string();
        let signature = self.sign(&[("folder", folder), ("timestamp", &timestamp)]);

        let file_part = Part::stream(reqwest::Body::from(data))
            .file_name(filename.to_string())
            .mime_str(content_type)
            .map_err(|e| StorageError::UploadFailed(format!("invalid content type: {e}")))?;

        let form = Form::new()
            .part("file", file_part)
            .text("folder", folder.to_string())
            .text("timestamp", timestamp)
            .text("api_key", self.api_key.clone())
            .text("signature", signature);

        let response = self
            .http
            .post(self.upload_url())
            .multipart(form)
            .send()
            .await
            .map_err(|e| {
                tracing::error!(error = %e, folder = %folder, "Upload request failed");
                StorageError::UploadFailed(e.to_string())
            })?;

        if !response.status().is_success() {
            let detail = Self::read_error_body(response).await;
            tracing::error!(folder = %folder, detail = %detail, "Provider rejected upload");
            return Err(StorageError::UploadFailed(detail));
        }

        let asset: Asset = response
            .json()
            .await
            .map_err(|e| StorageError::UploadFailed(format!("invalid upload response: {e}")))?;

        tracing::info!(
            public_id = %asset.public_id,
            folder = %folder,
            size_bytes,
            "Upload successful"
        );
        Ok(asset)
    }

    async fn search(&self, folder: &str, max_results: usize) -> StorageResult<Vec<Asset>> {
        let body = serde_json::json!({
            "expression": format!("folder:{folder}"),
            "sort_by": [{ "created_at": "desc" }],
            "max_results": max_results,
        });

        let response = self
            .http
            .post(self.search_url())
            .basic_auth(&self.api_key, Some(&self.api_secret))
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                tracing::error!(error = %e, folder = %folder, "Search request failed");
                StorageError::SearchFailed(e.to_string())
            })?;

        if !response.status().is_success() {
            let detail = Self::read_error_body(response).await;
            tracing::error!(folder = %folder, detail = %detail, "Provider rejected search");
            return Err(StorageError::SearchFailed(detail));
        }

        #[derive(Deserialize)]
        struct SearchResponse {
            #[serde(default)]
            resources: Vec<Asset>,
        }

        let parsed: SearchResponse = response
            .json()
            .await
            .map_err(|e| StorageError::SearchFailed(format!("invalid search response: {e}")))?;

        tracing::debug!(folder = %folder, count = parsed.resources.len(), "Search complete");
        Ok(parsed.resources)
    }

    async fn resource(&self, public_id: &str) -> StorageResult<Asset> {
        // The admin API addresses resources by type, but callers only hold
        // an identifier. Probe the known types and return the first hit.
        for kind in [ResourceKind::Image, ResourceKind::Video, ResourceKind::Raw] {
            let response = self
                .http
                .get(self.resource_url(kind, public_id))
                .basic_auth(&self.api_key, Some(&self.api_secret))
                .send()
                .await
                .map_err(|e| {
                    tracing::error!(error = %e, public_id = %public_id, "Lookup request failed");
                    StorageError::LookupFailed(e.to_string())
                })?;

            let status = response.status();
            if status == StatusCode::NOT_FOUND {
                continue;
            }
            if !status.is_success() {
                let detail = Self::read_error_body(response).await;
                tracing::error!(public_id = %public_id, detail = %detail, "Provider rejected lookup");
                return Err(StorageError::LookupFailed(detail));
            }

            let asset: Asset = response.json().await.map_err(|e| {
                StorageError::LookupFailed(format!("invalid resource response: {e}"))
            })?;

            tracing::debug!(
                public_id = %public_id,
                resource_type = kind.as_str(),
                "Resource found"
            );
            return Ok(asset);
        }

        tracing::debug!(public_id = %public_id, "Resource not found under any type");
        Err(StorageError::NotFound(public_id.to_string()))
    }

    async fn destroy(
        &self,
        public_id: &str,
        kind: ResourceKind,
    ) -> StorageResult<DestroyReceipt> {
        let timestamp = Utc::now().timestamp().to_string();
        let signature = self.sign(&[("public_id", public_id), ("timestamp", &timestamp)]);

        let form = Form::new()
            .text("public_id", public_id.to_string())
            .text("timestamp", timestamp)
            .text("api_key", self.api_key.clone())
            .text("signature", signature);

        let response = self
            .http
            .post(self.destroy_url(kind))
            .multipart(form)
            .send()
            .await
            .map_err(|e| {
                tracing::error!(error = %e, public_id = %public_id, "Destroy request failed");
                StorageError::DestroyFailed(e.to_string())
            })?;

        if !response.status().is_success() {
            let detail = Self::read_error_body(response).await;
            tracing::error!(public_id = %public_id, detail = %detail, "Provider rejected destroy");
            return Err(StorageError::DestroyFailed(detail));
        }

        let receipt: DestroyReceipt = response
            .json()
            .await
            .map_err(|e| StorageError::DestroyFailed(format!("invalid destroy response: {e}")))?;

        tracing::debug!(
            public_id = %public_id,
            resource_type = kind.as_str(),
            result = %receipt.result,
            "Destroy call complete"
        );
        Ok(receipt)
    }
}
