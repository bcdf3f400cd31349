//! Repositories for video records

pub mod video;

pub use video::{RegistryError, VideoRepository};
