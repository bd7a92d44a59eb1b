//! Nimbus Core Library
//!
//! Shared foundation for the media proxy: configuration, the error
//! taxonomy, domain models, and the in-memory video registry.

pub mod config;
pub mod error;
pub mod models;
pub mod registry;

// Re-export commonly used types
pub use config::{CloudinaryConfig, Config};
pub use error::{AppError, ErrorMetadata, LogLevel};
pub use registry::VideoRegistry;
