//! Runtime configuration loaded from environment variables.
//!
//! Command-line flags override these values in the binary.

use std::path::PathBuf;

/// Default port, matching the original Flask development server.
pub const DEFAULT_PORT: u16 = 5000;
pub const DEFAULT_HOST: &str = "127.0.0.1";

/// Backend server settings.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ServerConfig {
    /// Bind address (from FEATURE_BOARD_HOST)
    pub host: String,
    /// HTTP port (from FEATURE_BOARD_PORT)
    pub port: u16,
    /// SQLite file (from FEATURE_BOARD_DB). `None` uses the platform data directory.
    pub database_path: Option<PathBuf>,
    /// Insert sample features into an empty database (from FEATURE_BOARD_SEED)
    pub seed: bool,
}

impl ServerConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let host = lookup("FEATURE_BOARD_HOST").unwrap_or_else(|| DEFAULT_HOST.to_string());

        let port = lookup("FEATURE_BOARD_PORT")
            .and_then(|s| s.parse::<u16>().ok())
            .unwrap_or(DEFAULT_PORT);

        let database_path = lookup("FEATURE_BOARD_DB").map(PathBuf::from);

        let seed = lookup("FEATURE_BOARD_SEED")
            .map(|s| !matches!(s.trim().to_ascii_lowercase().as_str(), "0" | "false" | "no"))
            .unwrap_or(true);

        Self {
            host,
            port,
            database_path,
            seed,
        }
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self::from_lookup(|_| None)
    }
}

/// Settings for commands that talk to a running server.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClientConfig {
    /// Server base URL (from FEATURE_BOARD_URL)
    pub base_url: String,
}

impl ClientConfig {
    pub fn from_env() -> Self {
        let base_url = std::env::var("FEATURE_BOARD_URL")
            .unwrap_or_else(|_| format!("http://{}:{}", DEFAULT_HOST, DEFAULT_PORT));
        Self { base_url }
    }
}
