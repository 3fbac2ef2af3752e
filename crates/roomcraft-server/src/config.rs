//! Server configuration.
//!
//! Every field has a local-dev default and can be overridden by an
//! environment variable of the same name in SCREAMING_SNAKE_CASE.

use std::path::PathBuf;
use std::time::Duration;

/// Server configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP bind address.
    pub bind_addr: String,

    /// Public base URL used to build image/model links.
    pub public_url: String,

    /// Root of the static file tree (uploads, renders, models).
    pub static_dir: PathBuf,

    /// Maximum accepted room upload, in megabytes.
    pub upload_max_mb: usize,

    /// Upper bound for one provider render call. A stalled call resolves the
    /// job to failed instead of hanging.
    pub render_timeout: Duration,
}

impl Config {
    /// Load the configuration, applying environment overrides to defaults.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Ok(addr) = std::env::var("BIND_ADDR") {
            config.bind_addr = addr;
        }
        if let Ok(url) = std::env::var("PUBLIC_URL") {
            config.public_url = url.trim_end_matches('/').to_string();
        }
        if let Ok(dir) = std::env::var("STATIC_DIR") {
            config.static_dir = PathBuf::from(dir);
        }
        if let Ok(mb) = std::env::var("UPLOAD_MAX_MB") {
            if let Ok(mb) = mb.parse() {
                config.upload_max_mb = mb;
            }
        }
        if let Ok(secs) = std::env::var("RENDER_TIMEOUT_SECS") {
            if let Ok(secs) = secs.parse() {
                config.render_timeout = Duration::from_secs(secs);
            }
        }
        config
    }

    /// Directory render outputs are written to.
    pub fn renders_dir(&self) -> PathBuf {
        self.static_dir.join("renders")
    }

    /// Directory room uploads are written to.
    pub fn uploads_dir(&self) -> PathBuf {
        self.static_dir.join("uploads")
    }

    /// Directory AR models are served from.
    pub fn models_dir(&self) -> PathBuf {
        self.static_dir.join("models")
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind_addr: "127.0.0.1:8000".to_string(),
            public_url: "http://127.0.0.1:8000".to_string(),
            static_dir: PathBuf::from("static"),
            upload_max_mb: 10,
            render_timeout: Duration::from_secs(30),
        }
    }
}
