//! Custom error types for the common library
//!
//! This module defines the error types returned by the binary storage
//! backends and shared by the services.

use thiserror::Error;

/// Custom error type for binary storage operations
#[derive(Error, Debug)]
pub enum StorageError {
    /// No data is stored under the requested key
    #[error("No stored data for {0}")]
    NotFound(String),

    /// Error occurred while persisting data
    #[error("Storage upload error: {0}")]
    UploadFailed(String),

    /// Error occurred while reading stored data
    #[error("Storage download error: {0}")]
    DownloadFailed(String),

    /// Underlying I/O error
    #[error("Storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error
    #[error("Storage configuration error: {0}")]
    Configuration(String),
}

/// Type alias for Result with StorageError
pub type StorageResult<T> = Result<T, StorageError>;
