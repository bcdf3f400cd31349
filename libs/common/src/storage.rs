//! Binary storage module for raw video payloads
//!
//! Payloads are addressed by video id. The filesystem backend keeps one
//! file per video under a base directory.

use crate::error::{StorageError, StorageResult};
use async_trait::async_trait;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::io::{AsyncRead, AsyncWrite, AsyncWriteExt, BufWriter};
use tracing::info;

/// Storage for the raw bytes of a video
#[async_trait]
pub trait BinaryStore: Send + Sync {
    /// Persist everything `data` yields as the payload of `video_id`,
    /// replacing any earlier payload. Returns the number of bytes written.
    async fn save(
        &self,
        video_id: u64,
        data: &mut (dyn AsyncRead + Send + Unpin),
    ) -> StorageResult<u64>;

    /// Write the stored payload of `video_id` into `sink`.
    ///
    /// Returns `StorageError::NotFound` when nothing was uploaded for the id.
    async fn copy(
        &self,
        video_id: u64,
        sink: &mut (dyn AsyncWrite + Send + Unpin),
    ) -> StorageResult<u64>;

    /// Check whether a payload exists for `video_id`
    async fn has_data(&self, video_id: u64) -> StorageResult<bool>;
}

/// Local filesystem storage
#[derive(Debug, Clone)]
pub struct FileSystemStore {
    base_path: PathBuf,
}

impl FileSystemStore {
    /// Create the store, creating `base_path` if it does not exist yet
    pub async fn new(base_path: impl Into<PathBuf>) -> StorageResult<Self> {
        let base_path = base_path.into();

        fs::create_dir_all(&base_path).await.map_err(|e| {
            StorageError::Configuration(format!(
                "Failed to create storage directory {}: {}",
                base_path.display(),
                e
            ))
        })?;

        info!("File system store initialized at {}", base_path.display());
        Ok(Self { base_path })
    }

    /// Location of the payload for a video
    pub fn video_path(&self, video_id: u64) -> PathBuf {
        self.base_path.join(format!("video{}.mpg", video_id))
    }

    fn partial_path(&self, video_id: u64) -> PathBuf {
        self.base_path.join(format!("video{}.mpg.part", video_id))
    }
}

#[async_trait]
impl BinaryStore for FileSystemStore {
    async fn save(
        &self,
        video_id: u64,
        data: &mut (dyn AsyncRead + Send + Unpin),
    ) -> StorageResult<u64> {
        let partial = self.partial_path(video_id);
        let target = self.video_path(video_id);

        let result = async {
            let written = write_file(&partial, data).await?;
            fs::rename(&partial, &target).await?;
            Ok::<_, StorageError>(written)
        }
        .await;

        let written = match result {
            Ok(written) => written,
            Err(e) => {
                let _ = fs::remove_file(&partial).await;
                return Err(e);
            }
        };

        info!(
            video_id,
            path = %target.display(),
            size_bytes = written,
            "Stored video data"
        );

        Ok(written)
    }

    async fn copy(
        &self,
        video_id: u64,
        sink: &mut (dyn AsyncWrite + Send + Unpin),
    ) -> StorageResult<u64> {
        let path = self.video_path(video_id);

        let mut file = match fs::File::open(&path).await {
            Ok(file) => file,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Err(StorageError::NotFound(format!("video {}", video_id)));
            }
            Err(e) => return Err(e.into()),
        };

        let copied = tokio::io::copy(&mut file, sink).await.map_err(|e| {
            StorageError::DownloadFailed(format!("Failed to read video {}: {}", video_id, e))
        })?;
        sink.flush().await?;

        Ok(copied)
    }

    async fn has_data(&self, video_id: u64) -> StorageResult<bool> {
        Ok(fs::try_exists(self.video_path(video_id)).await?)
    }
}

/// Write everything `data` yields to a fresh file at `path`
async fn write_file(
    path: &Path,
    data: &mut (dyn AsyncRead + Send + Unpin),
) -> StorageResult<u64> {
    let file = fs::File::create(path).await.map_err(|e| {
        StorageError::UploadFailed(format!("Failed to create file {}: {}", path.display(), e))
    })?;
    let mut writer = BufWriter::new(file);

    let written = tokio::io::copy(data, &mut writer).await.map_err(|e| {
        StorageError::UploadFailed(format!("Failed to write file {}: {}", path.display(), e))
    })?;

    writer.flush().await?;
    writer.get_ref().sync_all().await?;

    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_save_then_copy() -> StorageResult<()> {
        let dir = tempdir()?;
        let store = FileSystemStore::new(dir.path()).await?;

        let payload = b"\x00\x01fake video bytes";
        let written = store.save(7, &mut &payload[..]).await?;
        assert_eq!(written, payload.len() as u64);
        assert!(store.has_data(7).await?);

        let mut out = Vec::new();
        let copied = store.copy(7, &mut out).await?;
        assert_eq!(copied, payload.len() as u64);
        assert_eq!(out, payload);
        Ok(())
    }

    #[tokio::test]
    async fn test_copy_without_data_is_not_found() -> StorageResult<()> {
        let dir = tempdir()?;
        let store = FileSystemStore::new(dir.path()).await?;

        let mut out = Vec::new();
        let result = store.copy(1, &mut out).await;
        assert!(matches!(result, Err(StorageError::NotFound(_))));
        assert!(!store.has_data(1).await?);
        assert!(out.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn test_save_replaces_previous_payload() -> StorageResult<()> {
        let dir = tempdir()?;
        let store = FileSystemStore::new(dir.path()).await?;

        store.save(3, &mut &b"first upload, longer"[..]).await?;
        store.save(3, &mut &b"second"[..]).await?;

        let mut out = Vec::new();
        store.copy(3, &mut out).await?;
        assert_eq!(out, b"second");
        assert!(!store.partial_path(3).exists());
        Ok(())
    }

    #[tokio::test]
    async fn test_new_creates_nested_directory() -> StorageResult<()> {
        let dir = tempdir()?;
        let nested = dir.path().join("a").join("b");
        let store = FileSystemStore::new(&nested).await?;

        assert!(nested.is_dir());
        assert_eq!(store.video_path(12), nested.join("video12.mpg"));
        Ok(())
    }

    #[tokio::test]
    async fn test_failed_save_removes_partial_file() -> StorageResult<()> {
        let dir = tempdir()?;
        let store = FileSystemStore::new(dir.path()).await?;

        // A non-empty directory in the target's place makes the final rename fail
        let target = store.video_path(9);
        std::fs::create_dir(&target)?;
        std::fs::write(target.join("occupied"), b"x")?;

        let result = store.save(9, &mut &b"payload"[..]).await;
        assert!(result.is_err());
        assert!(!store.partial_path(9).exists());
        Ok(())
    }
}
