//! Tracing initialization

use tracing_subscriber::{
    fmt::format::Format, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter,
};

/// Initialize console tracing.
///
/// Compact format without timestamps (the process supervisor adds its own).
/// The filter comes from `RUST_LOG`, with a default that keeps our crates
/// and the HTTP layer chatty in development.
pub fn init_tracing() {
    let console_fmt = tracing_subscriber::fmt::layer().event_format(
        Format::default()
            .compact()
            .with_target(false)
            .without_time(),
    );
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            "nimbus_api=debug,nimbus_storage=debug,nimbus_core=debug,tower_http=debug".into()
        }))
        .with(console_fmt)
        .init();
}
