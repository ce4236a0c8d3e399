use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use super::platform;

/// Environment variable selecting the video whose thumbnail is used as the
/// schedule banner.
pub const SCHEDULE_THUMBNAIL_ENV: &str = "SCHEDULE_THUMBNAIL";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub live: LiveConfig,
    #[serde(default)]
    pub schedule: ScheduleConfig,
}

/// Where the `/api/upcoming` and `/api/live` endpoints are served.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Per-request timeout. Unset means requests wait indefinitely.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_timeout_secs: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LiveConfig {
    /// Initial state of the auto-refresh checkbox.
    #[serde(default = "default_auto_refresh")]
    pub auto_refresh: bool,
    /// Length of one countdown cycle on the live page.
    #[serde(default = "default_refresh_interval_secs")]
    pub refresh_interval_secs: u64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScheduleConfig {
    /// Video id whose thumbnail is shown as the schedule banner.
    #[serde(default)]
    pub thumbnail_id: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            request_timeout_secs: None,
        }
    }
}

impl Default for LiveConfig {
    fn default() -> Self {
        Self {
            auto_refresh: default_auto_refresh(),
            refresh_interval_secs: default_refresh_interval_secs(),
        }
    }
}

fn default_base_url() -> String {
    "http://127.0.0.1:5000".to_string()
}

fn default_auto_refresh() -> bool {
    true
}

fn default_refresh_interval_secs() -> u64 {
    60
}

impl Config {
    /// Load from the default location, writing a default file on first run.
    pub fn load() -> anyhow::Result<Self> {
        Self::load_from(&Self::config_path())
    }

    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        if !path.exists() {
            let config = Self::default();
            config.save_to(path)?;
            return Ok(config);
        }

        let content = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&content)?;
        Ok(config)
    }

    pub fn save(&self) -> anyhow::Result<()> {
        self.save_to(&Self::config_path())
    }

    pub fn save_to(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn config_path() -> PathBuf {
        platform::config_dir().join("config.toml")
    }

    /// Apply `SCHEDULE_THUMBNAIL` from the process environment.
    pub fn apply_env(&mut self) {
        self.apply_thumbnail_override(std::env::var(SCHEDULE_THUMBNAIL_ENV).ok());
    }

    fn apply_thumbnail_override(&mut self, value: Option<String>) {
        if let Some(id) = value.map(|v| v.trim().to_string()) {
            if !id.is_empty() {
                self.schedule.thumbnail_id = id;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert!(config.live.auto_refresh);
        assert_eq!(config.live.refresh_interval_secs, 60);
        assert_eq!(config.api.base_url, "http://127.0.0.1:5000");
        assert!(config.api.request_timeout_secs.is_none());
        assert!(config.schedule.thumbnail_id.is_empty());
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let config: Config = toml::from_str(
            r#"
            [live]
            auto_refresh = false
            "#,
        )
        .unwrap();
        assert!(!config.live.auto_refresh);
        assert_eq!(config.live.refresh_interval_secs, 60);
        assert_eq!(config.api.base_url, "http://127.0.0.1:5000");
    }

    #[test]
    fn test_load_from_creates_default_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let config = Config::load_from(&path).unwrap();
        assert!(path.exists());
        assert!(config.live.auto_refresh);

        let mut edited = config.clone();
        edited.api.base_url = "https://example.net".to_string();
        edited.api.request_timeout_secs = Some(5);
        edited.save_to(&path).unwrap();

        let reloaded = Config::load_from(&path).unwrap();
        assert_eq!(reloaded.api.base_url, "https://example.net");
        assert_eq!(reloaded.api.request_timeout_secs, Some(5));
    }

    #[test]
    fn test_thumbnail_override() {
        let mut config = Config::default();
        config.schedule.thumbnail_id = "from-file".to_string();

        config.apply_thumbnail_override(Some("   ".to_string()));
        assert_eq!(config.schedule.thumbnail_id, "from-file");

        config.apply_thumbnail_override(None);
        assert_eq!(config.schedule.thumbnail_id, "from-file");

        config.apply_thumbnail_override(Some(" abc123 ".to_string()));
        assert_eq!(config.schedule.thumbnail_id, "abc123");
    }
}
