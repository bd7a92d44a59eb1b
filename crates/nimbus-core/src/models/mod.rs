//! Domain models

pub mod asset;
pub mod video;

pub use asset::Asset;
pub use video::VideoRecord;
