//! Data URL construction

use axum_extra::headers::Host;

use crate::config::ServerConfig;

const DEFAULT_HTTP_PORT: u16 = 80;

/// Build the URL a video's payload is served from
pub fn data_url(host: &str, port: u16, video_id: u64) -> String {
    if port == DEFAULT_HTTP_PORT {
        format!("http://{}/video/{}/data", host, video_id)
    } else {
        format!("http://{}:{}/video/{}/data", host, port, video_id)
    }
}

/// Host and port the client reached the service on
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Origin {
    pub host: String,
    pub port: u16,
}

impl Origin {
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
        }
    }

    /// Resolve the origin of a request.
    ///
    /// A configured public host wins over the `Host` header; without
    /// either, the service falls back to `localhost` on its bound port.
    pub fn resolve(config: &ServerConfig, host_header: Option<&Host>) -> Self {
        if let Some(public_host) = &config.public_host {
            return Self::new(
                public_host.clone(),
                config.public_port.unwrap_or(DEFAULT_HTTP_PORT),
            );
        }

        match host_header {
            Some(host) => Self::new(
                host.hostname(),
                host.port().unwrap_or(DEFAULT_HTTP_PORT),
            ),
            None => Self::new("localhost", config.port),
        }
    }

    pub fn data_url(&self, video_id: u64) -> String {
        data_url(&self.host, self.port, video_id)
    }
}
