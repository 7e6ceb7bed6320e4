use crate::error::{MinnoolError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

const CONFIG_FILENAME: &str = "config.json";
const DEFAULT_CLEANUP_MODEL: &str = "gemini-3-flash-preview";
const DEFAULT_CLEANUP_ENDPOINT: &str = "https://generativelanguage.googleapis.com/v1beta";
const DEFAULT_CLEANUP_TIMEOUT: u64 = 60;

/// Configuration for minnool, stored in `<data dir>/config.json`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub struct MinnoolConfig {
    /// Model used by `clean`.
    #[serde(default = "default_cleanup_model")]
    pub cleanup_model: String,

    /// Base URL of the generateContent API.
    #[serde(default = "default_cleanup_endpoint")]
    pub cleanup_endpoint: String,

    /// Request timeout in seconds.
    #[serde(default = "default_cleanup_timeout")]
    pub cleanup_timeout: u64,
}

fn default_cleanup_model() -> String {
    DEFAULT_CLEANUP_MODEL.to_string()
}

fn default_cleanup_endpoint() -> String {
    DEFAULT_CLEANUP_ENDPOINT.to_string()
}

fn default_cleanup_timeout() -> u64 {
    DEFAULT_CLEANUP_TIMEOUT
}

impl Default for MinnoolConfig {
    fn default() -> Self {
        Self {
            cleanup_model: default_cleanup_model(),
            cleanup_endpoint: default_cleanup_endpoint(),
            cleanup_timeout: default_cleanup_timeout(),
        }
    }
}

impl MinnoolConfig {
    pub const KEYS: [&'static str; 3] = ["cleanup-model", "cleanup-endpoint", "cleanup-timeout"];

    /// Load config from the given directory, or return defaults if not found
    pub fn load<P: AsRef<Path>>(config_dir: P) -> Result<Self> {
        let config_path = config_dir.as_ref().join(CONFIG_FILENAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path).map_err(MinnoolError::Io)?;
        let config: MinnoolConfig =
            serde_json::from_str(&content).map_err(MinnoolError::Serialization)?;
        Ok(config)
    }

    /// Save config to the given directory
    pub fn save<P: AsRef<Path>>(&self, config_dir: P) -> Result<()> {
        let config_dir = config_dir.as_ref();
        if !config_dir.exists() {
            fs::create_dir_all(config_dir).map_err(MinnoolError::Io)?;
        }

        let config_path = config_dir.join(CONFIG_FILENAME);
        let content = serde_json::to_string_pretty(self).map_err(MinnoolError::Serialization)?;
        fs::write(config_path, content).map_err(MinnoolError::Io)?;
        Ok(())
    }

    pub fn get(&self, key: &str) -> Option<String> {
        match key {
            "cleanup-model" => Some(self.cleanup_model.clone()),
            "cleanup-endpoint" => Some(self.cleanup_endpoint.clone()),
            "cleanup-timeout" => Some(self.cleanup_timeout.to_string()),
            _ => None,
        }
    }

    pub fn set(&mut self, key: &str, value: &str) -> std::result::Result<(), String> {
        let value = value.trim();
        match key {
            "cleanup-model" => {
                if value.is_empty() {
                    return Err("cleanup-model cannot be empty".to_string());
                }
                self.cleanup_model = value.to_string();
            }
            "cleanup-endpoint" => {
                if !value.starts_with("http://") && !value.starts_with("https://") {
                    return Err(format!("cleanup-endpoint must be an http(s) URL: {}", value));
                }
                self.cleanup_endpoint = value.trim_end_matches('/').to_string();
            }
            "cleanup-timeout" => {
                let secs: u64 = value
                    .parse()
                    .map_err(|_| format!("cleanup-timeout must be a number of seconds: {}", value))?;
                if secs == 0 {
                    return Err("cleanup-timeout must be greater than zero".to_string());
                }
                self.cleanup_timeout = secs;
            }
            _ => return Err(format!("Unknown config key: {}", key)),
        }
        Ok(())
    }
}
