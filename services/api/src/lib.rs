//! Video metadata and upload service
//!
//! Clients register video metadata, upload the binary payload of a video,
//! list the registered videos and download payloads back.

pub mod config;
pub mod error;
pub mod models;
pub mod repositories;
pub mod routes;
pub mod state;
pub mod url;

pub use state::AppState;
