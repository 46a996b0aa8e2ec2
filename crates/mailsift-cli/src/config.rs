//! Configuration loading from TOML files

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

/// Global configuration for mailsift
#[derive(Debug, Clone, Copy, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub pipeline: PipelineConfig,
    pub fixture: FixtureConfig,
}

#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Users per enumeration batch.
    pub batch_size: usize,
    /// Concurrent classification calls allowed.
    pub classify_permits: usize,
    /// Bound of each inter-stage queue.
    pub queue_capacity: usize,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            batch_size: mailsift_spam::DEFAULT_BATCH_SIZE,
            classify_permits: mailsift_spam::DEFAULT_CLASSIFY_PERMITS,
            queue_capacity: mailsift_core::DEFAULT_QUEUE_CAPACITY,
        }
    }
}

/// Settings for the built-in fixture backend the demo binary runs against.
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(default)]
pub struct FixtureConfig {
    pub messages_per_user: u64,
    /// Percentage of classification calls that fail (0-100).
    pub failure_rate_pct: u8,
    /// Simulated latency per collaborator call.
    pub latency_ms: u64,
}

impl Default for FixtureConfig {
    fn default() -> Self {
        Self {
            messages_per_user: 3,
            failure_rate_pct: 0,
            latency_ms: 0,
        }
    }
}

impl Config {
    /// Load configuration from default locations.
    ///
    /// Search order:
    /// 1. ./mailsift.toml (current directory)
    /// 2. ~/.config/mailsift/config.toml
    ///
    /// If no config file is found, returns the defaults.
    pub fn load() -> Result<Self> {
        let local_config = PathBuf::from("mailsift.toml");
        if local_config.exists() {
            return Self::from_file(&local_config);
        }

        if let Some(config_dir) = directories::ProjectDirs::from("", "", "mailsift") {
            let user_config = config_dir.config_dir().join("config.toml");
            if user_config.exists() {
                return Self::from_file(&user_config);
            }
        }

        Ok(Self::default())
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("cannot read config file {}", path.display()))?;
        toml::from_str(&raw).with_context(|| format!("invalid config file {}", path.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_pipeline_constants() {
        let config = Config::default();
        assert_eq!(config.pipeline.batch_size, 2);
        assert_eq!(config.pipeline.classify_permits, 5);
        assert_eq!(config.fixture.failure_rate_pct, 0);
    }

    #[test]
    fn partial_file_keeps_remaining_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("mailsift.toml");
        std::fs::write(&path, "[pipeline]\nbatch_size = 4\n").unwrap();

        let config = Config::from_file(&path).unwrap();
        assert_eq!(config.pipeline.batch_size, 4);
        assert_eq!(
            config.pipeline.classify_permits,
            mailsift_spam::DEFAULT_CLASSIFY_PERMITS
        );
    }

    #[test]
    fn invalid_file_reports_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("mailsift.toml");
        std::fs::write(&path, "not toml at all [").unwrap();

        let err = Config::from_file(&path).unwrap_err();
        assert!(err.to_string().contains("mailsift.toml"));
    }
}
