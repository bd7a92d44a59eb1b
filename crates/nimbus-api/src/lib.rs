//! Nimbus API Library
//!
//! HTTP layer for the media proxy: handlers, router assembly, application
//! state, and error rendering.

pub mod api_doc;
pub mod error;
pub mod extract;
pub mod handlers;
pub mod setup;
pub mod state;
pub mod telemetry;

pub use error::{ErrorResponse, HttpAppError};
pub use state::AppState;
