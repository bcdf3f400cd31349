//! Application state shared across handlers

use std::sync::Arc;

use common::storage::BinaryStore;

use crate::{config::ServerConfig, repositories::VideoRepository};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<ServerConfig>,
    pub video_repository: VideoRepository,
    pub video_store: Arc<dyn BinaryStore>,
}

impl AppState {
    pub fn new(config: ServerConfig, video_store: Arc<dyn BinaryStore>) -> Self {
        Self {
            config: Arc::new(config),
            video_repository: VideoRepository::new(),
            video_store,
        }
    }
}
