use crate::error::WordmapError;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Number of neighbors used when the request carries no usable count
pub const DEFAULT_TOP_N: usize = 5;

/// Vocabulary format names accepted in `VOCAB_FORMAT`
pub const VOCAB_FORMATS: &[&str] = &["auto", "text", "binary"];

/// Wordmap application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Vocabulary file path
    pub vocab_path: PathBuf,

    /// Vocabulary file format (auto, text, binary)
    pub vocab_format: String,

    /// Server bind address
    pub server_host: String,

    /// Server port
    pub server_port: u16,

    /// Log directory
    pub log_dir: PathBuf,

    /// Log level
    pub log_level: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            vocab_path: PathBuf::from("./models/vocab.txt"),
            vocab_format: "auto".to_string(),
            server_host: "127.0.0.1".to_string(),
            server_port: 5003,
            log_dir: PathBuf::from("./log"),
            log_level: "info".to_string(),
        }
    }
}

impl AppConfig {
    /// Load configuration from environment variables and .env file
    ///
    /// Nothing is created on disk; `logger::setup_logging` creates the log
    /// directory when the server starts.
    pub fn from_env() -> Result<Self, WordmapError> {
        // Load .env file (ignore if not exists)
        let _ = dotenv::dotenv();

        let config = Self {
            vocab_path: Self::get_env_path("VOCAB_PATH")
                .unwrap_or_else(|| PathBuf::from("./models/vocab.txt")),
            vocab_format: std::env::var("VOCAB_FORMAT")
                .unwrap_or_else(|_| "auto".to_string()),
            server_host: std::env::var("SERVER_HOST")
                .unwrap_or_else(|_| "127.0.0.1".to_string()),
            server_port: std::env::var("SERVER_PORT")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(5003),
            log_dir: Self::get_env_path("LOG_DIR")
                .unwrap_or_else(|| PathBuf::from("./log")),
            log_level: std::env::var("LOG_LEVEL")
                .unwrap_or_else(|_| "info".to_string()),
        };

        Ok(config)
    }

    /// Get PathBuf from environment variable
    fn get_env_path(key: &str) -> Option<PathBuf> {
        std::env::var(key).ok().map(PathBuf::from)
    }

    /// Ensure required directories exist, create if not
    pub fn ensure_directories(&self) -> Result<(), WordmapError> {
        if !self.log_dir.exists() {
            std::fs::create_dir_all(&self.log_dir).map_err(|e| {
                WordmapError::config(format!(
                    "Failed to create directory {}: {}",
                    self.log_dir.display(),
                    e
                ))
            })?;
        }

        Ok(())
    }

    /// Get log file path
    pub fn get_log_path(&self, filename: &str) -> PathBuf {
        self.log_dir.join(filename)
    }

    /// Get server bind address (host:port)
    pub fn server_bind_address(&self) -> String {
        format!("{}:{}", self.server_host, self.server_port)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), WordmapError> {
        if self.vocab_path.as_os_str().is_empty() {
            return Err(WordmapError::config("Vocabulary path cannot be empty"));
        }

        let format = self.vocab_format.to_lowercase();
        if !VOCAB_FORMATS.contains(&format.as_str()) {
            return Err(WordmapError::config(format!(
                "Unknown vocabulary format '{}', expected one of {:?}",
                self.vocab_format, VOCAB_FORMATS
            )));
        }

        if self.server_port == 0 {
            return Err(WordmapError::config("Server port cannot be 0"));
        }

        Ok(())
    }
}
