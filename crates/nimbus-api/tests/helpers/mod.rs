//! Test helpers: scripted provider, AppState, and router for integration
//! tests.
//!
//! Run from workspace root: `cargo test -p nimbus-api`.

#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum_test::TestServer;
use bytes::Bytes;
use serde_json::Map;

use nimbus_api::setup::routes;
use nimbus_api::state::AppState;
use nimbus_core::models::Asset;
use nimbus_core::{CloudinaryConfig, Config, VideoRegistry};
use nimbus_storage::{
    DestroyReceipt, MediaGateway, MediaProvider, ResourceKind, StorageError, StorageResult,
};

/// One recorded provider upload.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedUpload {
    pub folder: String,
    pub filename: String,
    pub content_type: String,
    pub size_bytes: usize,
}

/// Provider double that replays scripted responses and records every call.
#[derive(Default)]
pub struct ScriptedProvider {
    pub assets: Mutex<Vec<Asset>>,
    pub destroy_script: Mutex<VecDeque<DestroyReceipt>>,
    pub fail_store: AtomicBool,
    pub fail_search: AtomicBool,
    pub fail_lookup: AtomicBool,
    pub fail_destroy: AtomicBool,
    pub store_calls: Mutex<Vec<RecordedUpload>>,
    pub lookup_calls: Mutex<Vec<String>>,
    pub destroy_calls: Mutex<Vec<(String, ResourceKind)>>,
}

impl ScriptedProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn preload_assets(&self, assets: Vec<Asset>) {
        *self.assets.lock().unwrap() = assets;
    }

    pub fn script_destroy(&self, results: impl IntoIterator<Item = &'static str>) {
        *self.destroy_script.lock().unwrap() = results.into_iter().map(receipt).collect();
    }

    pub fn destroy_calls(&self) -> Vec<(String, ResourceKind)> {
        self.destroy_calls.lock().unwrap().clone()
    }

    pub fn lookup_calls(&self) -> Vec<String> {
        self.lookup_calls.lock().unwrap().clone()
    }

    pub fn store_calls(&self) -> Vec<RecordedUpload> {
        self.store_calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl MediaProvider for ScriptedProvider {
    async fn store(
        &self,
        folder: &str,
        filename: &str,
        content_type: &str,
        data: Bytes,
    ) -> StorageResult<Asset> {
        self.store_calls.lock().unwrap().push(RecordedUpload {
            folder: folder.to_string(),
            filename: filename.to_string(),
            content_type: content_type.to_string(),
            size_bytes: data.len(),
        });

        if self.fail_store.load(Ordering::SeqCst) {
            return Err(StorageError::UploadFailed(
                "500: provider unavailable".to_string(),
            ));
        }

        let stem = filename.rsplit_once('.').map_or(filename, |(stem, _)| stem);
        let mut extra = Map::new();
        extra.insert("etag".to_string(), serde_json::json!("test-etag"));
        Ok(Asset {
            public_id: format!("{folder}/{stem}"),
            resource_type: Some(content_type.split('/').next().unwrap_or("raw").to_string()),
            format: filename.rsplit_once('.').map(|(_, ext)| ext.to_string()),
            bytes: Some(data.len() as u64),
            created_at: Some(chrono::Utc::now()),
            url: None,
            secure_url: Some(format!("https://res.example.com/{folder}/{stem}")),
            extra,
        })
    }

    async fn search(&self, _folder: &str, max_results: usize) -> StorageResult<Vec<Asset>> {
        if self.fail_search.load(Ordering::SeqCst) {
            return Err(StorageError::SearchFailed("420: rate limited".to_string()));
        }

        let mut assets = self.assets.lock().unwrap().clone();
        assets.truncate(max_results);
        Ok(assets)
    }

    async fn resource(&self, public_id: &str) -> StorageResult<Asset> {
        self.lookup_calls.lock().unwrap().push(public_id.to_string());

        if self.fail_lookup.load(Ordering::SeqCst) {
            return Err(StorageError::LookupFailed("503: admin API down".to_string()));
        }

        self.assets
            .lock()
            .unwrap()
            .iter()
            .find(|a| a.public_id == public_id)
            .cloned()
            .ok_or_else(|| StorageError::NotFound(public_id.to_string()))
    }

    async fn destroy(
        &self,
        public_id: &str,
        kind: ResourceKind,
    ) -> StorageResult<DestroyReceipt> {
        self.destroy_calls
            .lock()
            .unwrap()
            .push((public_id.to_string(), kind));

        if self.fail_destroy.load(Ordering::SeqCst) {
            return Err(StorageError::DestroyFailed("401: bad signature".to_string()));
        }

        Ok(self
            .destroy_script
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| receipt("ok")))
    }
}

/// Minimal asset fixture.
pub fn asset(public_id: &str) -> Asset {
    Asset {
        public_id: public_id.to_string(),
        resource_type: Some("image".to_string()),
        format: Some("png".to_string()),
        bytes: Some(1024),
        created_at: Some(chrono::Utc::now()),
        url: None,
        secure_url: Some(format!("https://res.example.com/{public_id}.png")),
        extra: Map::new(),
    }
}

pub fn receipt(result: &str) -> DestroyReceipt {
    DestroyReceipt {
        result: result.to_string(),
        extra: Map::new(),
    }
}

pub fn test_config() -> Config {
    Config {
        server_port: 3000,
        cors_origins: vec!["*".to_string()],
        environment: "test".to_string(),
        folder: "media".to_string(),
        max_upload_size_bytes: 50 * 1024 * 1024,
        list_max_results: 100,
        cloudinary: CloudinaryConfig {
            cloud_name: "test-cloud".to_string(),
            api_key: "test-key".to_string(),
            api_secret: "test-secret".to_string(),
            api_base_url: "http://127.0.0.1:1".to_string(),
        },
    }
}

/// Test application: server plus a handle on the scripted provider.
pub struct TestApp {
    pub server: TestServer,
    pub provider: Arc<ScriptedProvider>,
}

impl TestApp {
    pub fn client(&self) -> &TestServer {
        &self.server
    }
}

/// Setup test app with default config and an empty scripted provider.
pub fn setup_test_app() -> TestApp {
    setup_test_app_with(test_config())
}

/// Setup test app with a caller-controlled config.
pub fn setup_test_app_with(config: Config) -> TestApp {
    let provider = Arc::new(ScriptedProvider::new());
    let gateway = MediaGateway::new(
        provider.clone(),
        config.folder.clone(),
        config.list_max_results,
    );
    let state = Arc::new(AppState::new(gateway, VideoRegistry::new(), config.clone()));

    let app = routes::setup_routes(&config, state).expect("Failed to setup routes");
    let server = TestServer::new(app).expect("Failed to create test server");

    TestApp { server, provider }
}
