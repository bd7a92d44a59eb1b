//! Provider asset descriptor

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use utoipa::ToSchema;

/// One stored asset as described by the media provider.
///
/// Only the fields this service reads are typed. Everything else the
/// provider attaches travels in `extra` and is serialized back verbatim,
/// so callers see the provider's descriptor unmodified. Field names stay
/// in the provider's snake_case.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Asset {
    /// Provider-assigned identifier, including any folder prefix
    /// (e.g. `media/xyz123`).
    pub public_id: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub resource_type: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub bytes: Option<u64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub secure_url: Option<String>,

    /// Remaining provider fields, passed through untouched.
    #[serde(flatten)]
    #[schema(value_type = Object)]
    pub extra: Map<String, Value>,
}
