//! API models for request and response payloads

pub mod video;

pub use video::{CreateVideoRequest, Video, VideoState, VideoStatus};
