// Configuration module
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Main server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub server: ServerSettings,
    #[serde(default)]
    pub storage: StorageSettings,
    #[serde(default)]
    pub logging: LoggingSettings,
    pub auth: AuthSettings,
}

/// Server settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
    /// 0 means one worker per CPU core.
    #[serde(default = "default_workers")]
    pub workers: usize,
}

/// Storage settings for the JSON snapshot store
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageSettings {
    #[serde(default = "default_data_dir")]
    pub data_dir: String,
    /// How often the in-memory stores are flushed to disk.
    #[serde(default = "default_snapshot_interval")]
    pub snapshot_interval_seconds: u64,
}

/// Logging settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingSettings {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_file")]
    pub file_path: String,
    #[serde(default = "default_true")]
    pub log_to_console: bool,
    #[serde(default = "default_log_format")]
    pub format: String,
}

/// Authentication settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthSettings {
    pub jwt_secret: String,
    #[serde(default = "default_token_ttl")]
    pub token_ttl_seconds: i64,
}

impl Default for StorageSettings {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            snapshot_interval_seconds: default_snapshot_interval(),
        }
    }
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            file_path: default_log_file(),
            log_to_console: true,
            format: default_log_format(),
        }
    }
}

// Default value functions
fn default_workers() -> usize {
    0
}

fn default_data_dir() -> String {
    "./data".to_string()
}

fn default_snapshot_interval() -> u64 {
    30
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_file() -> String {
    "./logs/haulhub.log".to_string()
}

fn default_log_format() -> String {
    "compact".to_string()
}

fn default_true() -> bool {
    true
}

fn default_token_ttl() -> i64 {
    86400 // 24 hours
}

impl ServerConfig {
    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let content = fs::read_to_string(path.as_ref())
            .map_err(|e| anyhow::anyhow!("Failed to read config file: {}", e))?;

        let mut config: ServerConfig = toml::from_str(&content)
            .map_err(|e| anyhow::anyhow!("Failed to parse config file: {}", e))?;

        config.apply_env_overrides()?;
        config.validate()?;

        Ok(config)
    }

    /// Apply environment variable overrides for sensitive configuration.
    ///
    /// Supported:
    /// - HAULHUB_SERVER_HOST: Override server.host
    /// - HAULHUB_SERVER_PORT: Override server.port
    /// - HAULHUB_LOG_LEVEL: Override logging.level
    /// - HAULHUB_DATA_DIR: Override storage.data_dir
    /// - HAULHUB_JWT_SECRET: Override auth.jwt_secret
    ///
    /// Environment variables take precedence over config.toml values.
    fn apply_env_overrides(&mut self) -> anyhow::Result<()> {
        use std::env;

        if let Ok(host) = env::var("HAULHUB_SERVER_HOST") {
            self.server.host = host;
        }

        if let Ok(port_str) = env::var("HAULHUB_SERVER_PORT") {
            self.server.port = port_str
                .parse()
                .map_err(|_| anyhow::anyhow!("Invalid HAULHUB_SERVER_PORT value: {}", port_str))?;
        }

        if let Ok(level) = env::var("HAULHUB_LOG_LEVEL") {
            self.logging.level = level;
        }

        if let Ok(path) = env::var("HAULHUB_DATA_DIR") {
            self.storage.data_dir = path;
        }

        if let Ok(secret) = env::var("HAULHUB_JWT_SECRET") {
            self.auth.jwt_secret = secret;
        }

        Ok(())
    }

    /// Validate configuration settings
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.server.port == 0 {
            return Err(anyhow::anyhow!("Server port cannot be 0"));
        }

        let valid_levels = ["error", "warn", "info", "debug", "trace"];
        if !valid_levels.contains(&self.logging.level.as_str()) {
            return Err(anyhow::anyhow!(
                "Invalid log level '{}'. Must be one of: {}",
                self.logging.level,
                valid_levels.join(", ")
            ));
        }

        let valid_formats = ["compact", "json"];
        if !valid_formats.contains(&self.logging.format.as_str()) {
            return Err(anyhow::anyhow!(
                "Invalid log format '{}'. Must be one of: {}",
                self.logging.format,
                valid_formats.join(", ")
            ));
        }

        if self.auth.jwt_secret.is_empty() {
            return Err(anyhow::anyhow!("auth.jwt_secret cannot be empty"));
        }

        if self.storage.snapshot_interval_seconds == 0 {
            return Err(anyhow::anyhow!("snapshot_interval_seconds cannot be 0"));
        }

        Ok(())
    }

    pub fn data_dir(&self) -> PathBuf {
        PathBuf::from(&self.storage.data_dir)
    }

    /// Get default configuration (useful for testing)
    pub fn default_for_tests() -> Self {
        ServerConfig {
            server: ServerSettings {
                host: "127.0.0.1".to_string(),
                port: 8080,
                workers: 1,
            },
            storage: StorageSettings::default(),
            logging: LoggingSettings::default(),
            auth: AuthSettings {
                jwt_secret: "test-secret-do-not-use-in-production".to_string(),
                token_ttl_seconds: default_token_ttl(),
            },
        }
    }
}
