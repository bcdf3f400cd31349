//! Video models for the API service

use serde::{Deserialize, Serialize};

/// Video metadata record as stored and returned by the service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Video {
    pub id: u64,
    pub title: String,
    pub duration: i64,
    pub content_type: String,
    /// Where the payload can be downloaded, derived from the id
    pub data_url: String,
}

/// Request for video registration
///
/// A client-sent `dataUrl` is ignored; the server always derives it.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CreateVideoRequest {
    /// 0 asks the server to assign an id
    pub id: u64,
    pub title: String,
    pub duration: i64,
    pub content_type: String,
}

impl CreateVideoRequest {
    /// Turn the request into a stored record under `id`
    pub fn into_video(self, id: u64, data_url: String) -> Video {
        Video {
            id,
            title: self.title,
            duration: self.duration,
            content_type: self.content_type,
            data_url,
        }
    }
}

/// Data state of a video
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum VideoState {
    Ready,
}

/// Response for data uploads
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VideoStatus {
    pub state: VideoState,
}

impl VideoStatus {
    pub fn ready() -> Self {
        Self {
            state: VideoState::Ready,
        }
    }
}
