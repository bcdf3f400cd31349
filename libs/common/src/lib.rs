//! Common library for the video service
//!
//! This crate provides functionality shared by the services, currently
//! the binary storage backends for uploaded video payloads and their
//! error types.

pub mod error;
pub mod storage;

pub use error::{StorageError, StorageResult};
pub use storage::{BinaryStore, FileSystemStore};

/// Example usage of the storage module
///
/// ```rust,no_run
/// use common::storage::{BinaryStore, FileSystemStore};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let store = FileSystemStore::new("videos").await?;
///     store.save(1, &mut &b"bytes"[..]).await?;
///     println!("Video 1 stored: {}", store.has_data(1).await?);
///     Ok(())
/// }
/// ```
pub fn example_usage() {}
