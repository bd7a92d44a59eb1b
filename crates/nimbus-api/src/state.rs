//! Application state shared by request handlers

use nimbus_core::{Config, VideoRegistry};
use nimbus_storage::MediaGateway;

/// Main application state.
///
/// Built once at startup and handed to the router behind an `Arc`;
/// handlers receive it through `State<Arc<AppState>>`.
pub struct AppState {
    pub gateway: MediaGateway,
    pub videos: VideoRegistry,
    pub config: Config,
}

impl AppState {
    pub fn new(gateway: MediaGateway, videos: VideoRegistry, config: Config) -> Self {
        Self {
            gateway,
            videos,
            config,
        }
    }
}
