//! Service configuration loaded from the environment

use config::{Config, ConfigError, Environment};
use serde::Deserialize;

/// Prefix of every environment variable read by the service
pub const ENV_PREFIX: &str = "VIDEO_SERVICE";

/// Server configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Address the HTTP listener binds to
    pub host: String,
    /// Port the HTTP listener binds to
    pub port: u16,
    /// Host advertised in data URLs, overriding the request `Host` header
    pub public_host: Option<String>,
    /// Port advertised in data URLs when `public_host` is set
    pub public_port: Option<u16>,
    /// Directory holding uploaded video payloads
    pub storage_dir: String,
    /// Maximum accepted request body size in bytes
    pub max_upload_bytes: usize,
}

impl ServerConfig {
    /// Create a new ServerConfig from `VIDEO_SERVICE_*` environment variables
    ///
    /// # Environment Variables
    /// - `VIDEO_SERVICE_HOST`: bind address (default: "0.0.0.0")
    /// - `VIDEO_SERVICE_PORT`: bind port (default: 8080)
    /// - `VIDEO_SERVICE_PUBLIC_HOST`: host used in data URLs (default: unset)
    /// - `VIDEO_SERVICE_PUBLIC_PORT`: port used in data URLs (default: unset)
    /// - `VIDEO_SERVICE_STORAGE_DIR`: payload directory (default: "videos")
    /// - `VIDEO_SERVICE_MAX_UPLOAD_BYTES`: body limit (default: 512 MiB)
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_source(Environment::with_prefix(ENV_PREFIX))
    }

    /// Build the configuration from an explicit environment source
    pub fn from_source(env: Environment) -> Result<Self, ConfigError> {
        Config::builder()
            .set_default("host", "0.0.0.0")?
            .set_default("port", 8080_i64)?
            .set_default("storage_dir", "videos")?
            .set_default("max_upload_bytes", 512_i64 * 1024 * 1024)?
            .add_source(env.try_parsing(true))
            .build()?
            .try_deserialize()
    }

    /// Socket address for the listener
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
