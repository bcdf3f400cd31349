//! In-memory video registry

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use thiserror::Error;
use tokio::sync::Mutex;
use tracing::info;

use crate::{
    models::{CreateVideoRequest, Video},
    url::Origin,
};

/// Largest id a client may register explicitly. `u64::MAX` stays free so
/// the counter can never be pushed past the end of the id space.
pub const MAX_EXPLICIT_ID: u64 = u64::MAX - 1;

/// Errors raised while registering a video
#[derive(Error, Debug, PartialEq, Eq)]
pub enum RegistryError {
    /// Client-supplied id outside the accepted range
    #[error("Video id {0} is out of range")]
    IdOutOfRange(u64),

    /// Every id has been handed out
    #[error("No video ids left to assign")]
    IdsExhausted,
}

/// Video repository holding every registered video for the process lifetime
#[derive(Debug, Clone, Default)]
pub struct VideoRepository {
    /// Last id handed out; the next assigned id is one above it
    last_id: Arc<AtomicU64>,
    /// Registered videos keyed by id
    videos: Arc<Mutex<HashMap<u64, Video>>>,
}

impl VideoRepository {
    /// Create a new, empty video repository
    pub fn new() -> Self {
        Self::default()
    }

    /// Get all videos, ordered by id
    pub async fn list(&self) -> Vec<Video> {
        let videos = self.videos.lock().await;
        let mut list: Vec<Video> = videos.values().cloned().collect();
        list.sort_by_key(|video| video.id);
        list
    }

    /// Register a video.
    ///
    /// An id of 0 gets the next counter value. A non-zero id overwrites
    /// the record stored under it and pushes the counter past it.
    pub async fn create(
        &self,
        candidate: CreateVideoRequest,
        origin: &Origin,
    ) -> Result<Video, RegistryError> {
        let id = match candidate.id {
            0 => self.next_id()?,
            id if id > MAX_EXPLICIT_ID => return Err(RegistryError::IdOutOfRange(id)),
            id => {
                self.last_id.fetch_max(id, Ordering::SeqCst);
                id
            }
        };

        let video = candidate.into_video(id, origin.data_url(id));

        let mut videos = self.videos.lock().await;
        if videos.insert(id, video.clone()).is_some() {
            info!("Replaced video {}", id);
        }

        Ok(video)
    }

    fn next_id(&self) -> Result<u64, RegistryError> {
        self.last_id
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |last| last.checked_add(1))
            .map(|last| last + 1)
            .map_err(|_| RegistryError::IdsExhausted)
    }

    /// Find a video by ID
    pub async fn get(&self, id: u64) -> Option<Video> {
        self.videos.lock().await.get(&id).cloned()
    }

    /// Number of registered videos
    pub async fn len(&self) -> usize {
        self.videos.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}
