//! Nimbus Storage Library
//!
//! Media provider integration: the `MediaProvider` abstraction, the
//! Cloudinary REST client implementing it, and the `MediaGateway` service
//! that exposes the store / list / fetch / delete operation set.

pub mod cloudinary;
pub mod gateway;
pub mod traits;

pub use cloudinary::CloudinaryClient;
pub use gateway::MediaGateway;
pub use traits::{DestroyReceipt, MediaProvider, ResourceKind, StorageError, StorageResult};
