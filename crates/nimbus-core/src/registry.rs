//! In-memory video registry
//!
//! Process-lifetime bookkeeping for uploaded videos, kept separate from the
//! media gateway. Nothing is persisted: the registry starts empty on boot
//! and its contents die with the process.

use chrono::Utc;
use tokio::sync::Mutex;

use crate::error::AppError;
use crate::models::VideoRecord;

/// Registry of video metadata records.
///
/// One instance is created at startup and shared through the application
/// state. A single mutex guards the record sequence so concurrent appends
/// and removals interleave without corrupting it; no ordering is promised
/// between concurrent callers beyond that.
#[derive(Debug, Default)]
pub struct VideoRegistry {
    records: Mutex<Vec<VideoRecord>>,
}

impl VideoRegistry {
    pub fn new() -> Self {
        Self {
            records: Mutex::new(Vec::new()),
        }
    }

    /// Append a record built from caller-supplied metadata.
    ///
    /// `url` and `public_id` must be non-empty. Registering a `public_id`
    /// that already exists is allowed; the records coexist until deleted.
    pub async fn register(
        &self,
        url: &str,
        public_id: &str,
        duration: Option<f64>,
    ) -> Result<VideoRecord, AppError> {
        if url.is_empty() || public_id.is_empty() {
            return Err(AppError::Validation("Missing video data".to_string()));
        }

        let now = Utc::now();
        let record = VideoRecord {
            // Millisecond timestamp, not unique under concurrent registration.
            id: now.timestamp_millis(),
            url: url.to_string(),
            public_id: public_id.to_string(),
            duration,
            created_at: now,
        };

        let mut records = self.records.lock().await;
        records.push(record.clone());

        tracing::debug!(public_id = %record.public_id, total = records.len(), "Video registered");
        Ok(record)
    }

    /// Snapshot of every record, in insertion order.
    pub async fn list_all(&self) -> Vec<VideoRecord> {
        self.records.lock().await.clone()
    }

    /// Remove every record whose `public_id` matches exactly, returning how
    /// many were removed. Deleting an absent id removes nothing and is not
    /// an error.
    pub async fn delete_by_public_id(&self, public_id: &str) -> usize {
        let mut records = self.records.lock().await;
        let before = records.len();
        records.retain(|record| record.public_id != public_id);
        before - records.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_register_then_list_returns_record() {
        let registry = VideoRegistry::new();

        let record = registry
            .register("https://res.example.com/v/clip.mp4", "media/clip", Some(12.0))
            .await
            .unwrap();
        assert_eq!(record.public_id, "media/clip");
        assert_eq!(record.duration, Some(12.0));

        let listed = registry.list_all().await;
        assert_eq!(listed, vec![record]);
    }

    #[tokio::test]
    async fn test_register_rejects_missing_fields() {
        let registry = VideoRegistry::new();

        let err = registry.register("", "media/clip", None).await.unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));

        let err = registry
            .register("https://res.example.com/v/clip.mp4", "", None)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));

        assert!(registry.list_all().await.is_empty());
    }

    #[tokio::test]
    async fn test_records_keep_insertion_order() {
        let registry = VideoRegistry::new();
        for public_id in ["media/a", "media/b", "media/c"] {
            registry
                .register("https://res.example.com/v.mp4", public_id, None)
                .await
                .unwrap();
        }

        let ids: Vec<String> = registry
            .list_all()
            .await
            .into_iter()
            .map(|r| r.public_id)
            .collect();
        assert_eq!(ids, vec!["media/a", "media/b", "media/c"]);
    }

    #[tokio::test]
    async fn test_delete_removes_all_matching_records() {
        let registry = VideoRegistry::new();
        registry
            .register("https://res.example.com/1.mp4", "media/dup", None)
            .await
            .unwrap();
        registry
            .register("https://res.example.com/2.mp4", "media/dup", None)
            .await
            .unwrap();
        registry
            .register("https://res.example.com/3.mp4", "media/other", None)
            .await
            .unwrap();

        assert_eq!(registry.list_all().await.len(), 3);

        let removed = registry.delete_by_public_id("media/dup").await;
        assert_eq!(removed, 2);

        let remaining = registry.list_all().await;
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].public_id, "media/other");
    }

    #[tokio::test]
    async fn test_delete_absent_id_is_a_noop() {
        let registry = VideoRegistry::new();
        registry
            .register("https://res.example.com/1.mp4", "media/keep", None)
            .await
            .unwrap();

        let removed = registry.delete_by_public_id("media/ghost").await;
        assert_eq!(removed, 0);
        assert_eq!(registry.list_all().await.len(), 1);

        // Repeating the delete is equally uneventful.
        let removed = registry.delete_by_public_id("media/ghost").await;
        assert_eq!(removed, 0);
        assert_eq!(registry.list_all().await.len(), 1);
    }

    #[tokio::test]
    async fn test_concurrent_registration_keeps_every_record() {
        let registry = std::sync::Arc::new(VideoRegistry::new());

        let mut handles = Vec::new();
        for i in 0..16 {
            let registry = registry.clone();
            handles.push(tokio::spawn(async move {
                registry
                    .register("https://res.example.com/v.mp4", &format!("media/v{i}"), None)
                    .await
                    .unwrap();
            }));
        }
        for handle in handles {
            handle.await.unwrap();
        }

        assert_eq!(registry.list_all().await.len(), 16);
    }
}
