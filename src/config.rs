//! Configuration management for the SkillSync client

use crate::error::{Result, SkillSyncError};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";
pub const SERVER_URL_ENV: &str = "SKILLSYNC_SERVER_URL";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerConfig {
    pub base_url: String,
    pub timeout_secs: u64,
    pub resume_endpoint: String,
    pub jobs_endpoint: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputConfig {
    pub format: OutputFormat,
    pub color_output: bool,
    pub show_descriptions: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OutputFormat {
    Console,
    Json,
    Markdown,
    Html,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                base_url: DEFAULT_BASE_URL.to_string(),
                timeout_secs: 120,
                resume_endpoint: "/upload_resume".to_string(),
                jobs_endpoint: "/upload_jobs_json".to_string(),
            },
            output: OutputConfig {
                format: OutputFormat::Console,
                color_output: true,
                show_descriptions: true,
            },
        }
    }
}

impl Config {
    /// Load from `config_path`, writing defaults on first run.
    pub fn load_from(config_path: &Path) -> Result<Self> {
        if config_path.exists() {
            let content = std::fs::read_to_string(config_path)?;
            let config: Config = toml::from_str(&content)
                .map_err(|e| SkillSyncError::Configuration(format!("Failed to parse config: {}", e)))?;
            Ok(config)
        } else {
            let config = Self::default();
            config.save_to(config_path)?;
            Ok(config)
        }
    }

    pub fn save_to(&self, config_path: &Path) -> Result<()> {
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)
            .map_err(|e| SkillSyncError::Configuration(format!("Failed to serialize config: {}", e)))?;

        std::fs::write(config_path, content)?;
        Ok(())
    }

    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")))
            .join("skillsync")
            .join("config.toml")
    }

    /// Environment wins over the file, an explicit flag wins over both.
    pub fn apply_overrides(&mut self, server: Option<&str>) {
        if let Ok(url) = std::env::var(SERVER_URL_ENV) {
            if !url.trim().is_empty() {
                self.server.base_url = url;
            }
        }
        if let Some(url) = server {
            self.server.base_url = url.to_string();
        }
        self.server.base_url = self.server.base_url.trim_end_matches('/').to_string();
    }

    /// Set a value by dotted key, e.g. `server.base_url`.
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "server.base_url" => {
                if !value.starts_with("http://") && !value.starts_with("https://") {
                    return Err(SkillSyncError::Configuration(format!(
                        "server.base_url must start with http:// or https://, got '{}'",
                        value
                    )));
                }
                self.server.base_url = value.trim_end_matches('/').to_string();
            }
            "server.timeout_secs" => self.server.timeout_secs = parse_value(key, value)?,
            "server.resume_endpoint" => self.server.resume_endpoint = endpoint(value),
            "server.jobs_endpoint" => self.server.jobs_endpoint = endpoint(value),
            "output.format" => {
                self.output.format = crate::cli::parse_output_format(value)
                    .map_err(SkillSyncError::Configuration)?;
            }
            "output.color_output" => self.output.color_output = parse_value(key, value)?,
            "output.show_descriptions" => self.output.show_descriptions = parse_value(key, value)?,
            _ => {
                return Err(SkillSyncError::Configuration(format!("Unknown configuration key: {}", key)));
            }
        }
        Ok(())
    }
}

fn parse_value<T: std::str::FromStr>(key: &str, value: &str) -> Result<T> {
    value
        .parse()
        .map_err(|_| SkillSyncError::Configuration(format!("Invalid value for {}: {}", key, value)))
}

fn endpoint(value: &str) -> String {
    if value.starts_with('/') {
        value.to_string()
    } else {
        format!("/{}", value)
    }
}
