use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::slider::BreakpointPolicy;

const FILENAME: &str = "config.yaml";
const APP_DIR: &str = "timeline-slider";
const DEFAULT_RESIZE_DEBOUNCE_MS: u64 = 120;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub defaults: Option<DefaultsConfig>,

    /// Viewport width thresholds mapped to slides per group.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub breakpoints: Option<BreakpointPolicy>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preview: Option<PreviewConfig>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DefaultsConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub theme: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PreviewConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resize_debounce_ms: Option<u64>,

    /// Reload the slide source when it changes on disk.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub watch: Option<bool>,
}

impl Config {
    pub fn path() -> Result<PathBuf> {
        dirs::config_dir()
            .map(|d| d.join(APP_DIR).join(FILENAME))
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))
    }

    pub fn load() -> Result<Self> {
        let path = Self::path()?;
        Self::load_from(&path)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                anyhow::anyhow!("No config found. Run `tslider config show` to see defaults.")
            } else {
                anyhow::anyhow!("Failed to read config: {e}")
            }
        })?;
        let config: Config = serde_yaml::from_str(&contents)?;
        Ok(config)
    }

    pub fn load_or_default() -> Self {
        match Self::load() {
            Ok(config) => config,
            Err(e) => {
                tracing::debug!("using default config: {e}");
                Self::default()
            }
        }
    }

    pub fn save(&self) -> Result<PathBuf> {
        let path = Self::path()?;
        self.save_to(&path)?;
        Ok(path)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let yaml = serde_yaml::to_string(self)?;
        let contents = format!("# timeline-slider configuration\n{yaml}");
        std::fs::write(path, contents)?;
        Ok(())
    }

    pub fn policy(&self) -> BreakpointPolicy {
        self.breakpoints.clone().unwrap_or_default()
    }

    pub fn theme_name(&self) -> &str {
        self.defaults
            .as_ref()
            .and_then(|d| d.theme.as_deref())
            .unwrap_or("light")
    }

    pub fn resize_debounce(&self) -> Duration {
        let ms = self
            .preview
            .as_ref()
            .and_then(|p| p.resize_debounce_ms)
            .unwrap_or(DEFAULT_RESIZE_DEBOUNCE_MS);
        Duration::from_millis(ms)
    }

    pub fn watch(&self) -> bool {
        self.preview.as_ref().and_then(|p| p.watch).unwrap_or(true)
    }

    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "defaults.theme" => {
                match value {
                    "light" | "dark" => {}
                    _ => anyhow::bail!("Invalid theme: {value}. Must be 'light' or 'dark'."),
                }
                self.defaults
                    .get_or_insert_with(DefaultsConfig::default)
                    .theme = Some(value.to_string());
            }
            "breakpoints" => {
                let policy = BreakpointPolicy::parse(value).map_err(|e| {
                    anyhow::anyhow!("Invalid breakpoints: {e}. Expected e.g. '0:1,425:3'.")
                })?;
                self.breakpoints = Some(policy);
            }
            "preview.resize_debounce_ms" => {
                let ms: u64 = value.parse().map_err(|_| {
                    anyhow::anyhow!(
                        "Invalid resize_debounce_ms: {value}. Must be a whole number of milliseconds."
                    )
                })?;
                self.preview
                    .get_or_insert_with(PreviewConfig::default)
                    .resize_debounce_ms = Some(ms);
            }
            "preview.watch" => {
                let watch = match value {
                    "true" | "on" | "yes" => true,
                    "false" | "off" | "no" => false,
                    _ => anyhow::bail!("Invalid watch: {value}. Must be 'true' or 'false'."),
                };
                self.preview
                    .get_or_insert_with(PreviewConfig::default)
                    .watch = Some(watch);
            }
            _ => anyhow::bail!(
                "Unknown config key: {key}. Valid keys: defaults.theme, breakpoints, preview.resize_debounce_ms, preview.watch"
            ),
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_without_file() {
        let config = Config::default();
        assert_eq!(config.policy(), BreakpointPolicy::default());
        assert_eq!(config.theme_name(), "light");
        assert_eq!(config.resize_debounce(), Duration::from_millis(120));
        assert!(config.watch());
    }

    #[test]
    fn test_set_validates_values() {
        let mut config = Config::default();
        config.set("defaults.theme", "dark").unwrap();
        assert_eq!(config.theme_name(), "dark");
        assert!(config.set("defaults.theme", "neon").is_err());

        config.set("breakpoints", "0:1,600:2,1200:4").unwrap();
        assert_eq!(config.policy().group_size(700.0).get(), 2);
        assert!(config.set("breakpoints", "600:2,0:1").is_err());

        config.set("preview.resize_debounce_ms", "50").unwrap();
        assert_eq!(config.resize_debounce(), Duration::from_millis(50));
        assert!(config.set("preview.resize_debounce_ms", "soon").is_err());

        config.set("preview.watch", "off").unwrap();
        assert!(!config.watch());

        assert!(config.set("nope", "1").is_err());
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join(FILENAME);

        let mut config = Config::default();
        config.set("breakpoints", "0:1,500:2").unwrap();
        config.set("preview.watch", "false").unwrap();
        config.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded.policy(), config.policy());
        assert!(!loaded.watch());
        assert!(loaded.defaults.is_none());
    }

    #[test]
    fn test_missing_file_mentions_config_show() {
        let dir = tempfile::tempdir().unwrap();
        let err = Config::load_from(&dir.path().join("absent.yaml")).unwrap_err();
        assert!(err.to_string().contains("tslider config show"));
    }
}
