//! TOML-based application configuration.
//!
//! Stores engine tuning and display preferences:
//! - Points conversion rate and level size
//! - Same-day streak policy
//! - Progress cap mode
//! - Currency symbol and history length for renderers
//!
//! Configuration is stored at `~/.config/goalbank/config.toml`.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use super::data_dir;
use crate::engine::Settings;
use crate::error::{ConfigError, Result};
use crate::goal::ProgressMode;
use crate::points::{DEFAULT_POINTS_PER_LEVEL, DEFAULT_WON_PER_POINT};
use crate::streak::SameDayPolicy;

/// Points configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PointsConfig {
    #[serde(default = "default_won_per_point")]
    pub won_per_point: u64,
    #[serde(default = "default_points_per_level")]
    pub points_per_level: u64,
}

/// Streak configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StreakConfig {
    #[serde(default)]
    pub same_day: SameDayPolicy,
}

/// Goal progress configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProgressConfig {
    #[serde(default)]
    pub mode: ProgressMode,
}

/// Display configuration, read by renderers only.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DisplayConfig {
    #[serde(default = "default_currency_symbol")]
    pub currency_symbol: String,
    #[serde(default = "default_recent_history")]
    pub recent_history: usize,
}

/// Application configuration.
///
/// Serialized to/from TOML at `~/.config/goalbank/config.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub points: PointsConfig,
    #[serde(default)]
    pub streak: StreakConfig,
    #[serde(default)]
    pub progress: ProgressConfig,
    #[serde(default)]
    pub display: DisplayConfig,
}

// Default functions
fn default_won_per_point() -> u64 {
    DEFAULT_WON_PER_POINT
}
fn default_points_per_level() -> u64 {
    DEFAULT_POINTS_PER_LEVEL
}
fn default_currency_symbol() -> String {
    "₩".into()
}
fn default_recent_history() -> usize {
    5
}

impl Default for PointsConfig {
    fn default() -> Self {
        Self {
            won_per_point: default_won_per_point(),
            points_per_level: default_points_per_level(),
        }
    }
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            currency_symbol: default_currency_symbol(),
            recent_history: default_recent_history(),
        }
    }
}

impl Config {
    fn get_json_value_by_path<'a>(
        root: &'a serde_json::Value,
        key: &str,
    ) -> Option<&'a serde_json::Value> {
        if key.is_empty() {
            return None;
        }

        let mut current = root;
        for part in key.split('.') {
            current = current.get(part)?;
        }
        Some(current)
    }

    fn set_json_value_by_path(
        root: &mut serde_json::Value,
        key: &str,
        value: &str,
    ) -> Result<(), ConfigError> {
        let unknown = || ConfigError::UnknownKey(key.to_string());
        let mut parts = key.split('.').peekable();
        if key.is_empty() {
            return Err(unknown());
        }

        let mut current = root;
        while let Some(part) = parts.next() {
            if parts.peek().is_none() {
                let obj = current.as_object_mut().ok_or_else(unknown)?;
                let existing = obj.get(part).ok_or_else(unknown)?;

                let new_value = match existing {
                    serde_json::Value::Bool(_) => value
                        .parse::<bool>()
                        .map(serde_json::Value::Bool)
                        .map_err(|e| ConfigError::ParseFailed(format!("{key}: {e}")))?,
                    serde_json::Value::Number(_) => value
                        .parse::<u64>()
                        .map(|n| serde_json::Value::Number(n.into()))
                        .map_err(|_| {
                            ConfigError::ParseFailed(format!("{key}: cannot parse '{value}' as number"))
                        })?,
                    serde_json::Value::Object(_) | serde_json::Value::Array(_) => {
                        serde_json::from_str(value)
                            .map_err(|e| ConfigError::ParseFailed(format!("{key}: {e}")))?
                    }
                    _ => serde_json::Value::String(value.into()),
                };

                obj.insert(part.to_string(), new_value);
                return Ok(());
            }

            current = current.get_mut(part).ok_or_else(unknown)?;
        }

        Err(unknown())
    }

    /// Default config file location.
    pub fn path() -> Result<PathBuf> {
        Ok(data_dir()?.join("config.toml"))
    }

    /// Load from the default location, writing defaults if no file exists.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be parsed,
    /// or if the default config cannot be written to disk.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::path()?)
    }

    /// Load from `path`, writing defaults there if it does not exist.
    pub fn load_from(path: &Path) -> Result<Self> {
        match std::fs::read_to_string(path) {
            Ok(content) => toml::from_str(&content).map_err(|e| {
                ConfigError::LoadFailed {
                    path: path.to_path_buf(),
                    message: e.to_string(),
                }
                .into()
            }),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                let cfg = Self::default();
                cfg.save_to(path)?;
                Ok(cfg)
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Persist to the default location.
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::path()?)
    }

    /// Persist to `path`.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        let save_failed = |message: String| ConfigError::SaveFailed {
            path: path.to_path_buf(),
            message,
        };
        let content = toml::to_string_pretty(self).map_err(|e| save_failed(e.to_string()))?;
        std::fs::write(path, content).map_err(|e| save_failed(e.to_string()))?;
        Ok(())
    }

    /// Get a config value as string by dot-separated key.
    pub fn get(&self, key: &str) -> Option<String> {
        let json = serde_json::to_value(self).ok()?;
        let val = Self::get_json_value_by_path(&json, key)?;
        match val {
            serde_json::Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }

    /// Set a config value by dot-separated key. Does not touch disk.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is unknown or the value does not fit
    /// the key's type.
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let mut json = serde_json::to_value(&*self)?;
        Self::set_json_value_by_path(&mut json, key, value)?;
        *self = serde_json::from_value(json)
            .map_err(|e| ConfigError::ParseFailed(format!("{key}: {e}")))?;
        Ok(())
    }

    /// Engine settings derived from this config.
    pub fn settings(&self) -> Settings {
        Settings {
            won_per_point: self.points.won_per_point,
            points_per_level: self.points.points_per_level,
            same_day: self.streak.same_day,
            progress_mode: self.progress.mode,
            recent_history: self.display.recent_history,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_roundtrip() {
        let cfg = Config::default();
        let toml_str = toml::to_string_pretty(&cfg).unwrap();
        let parsed: Config = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed.points.won_per_point, 10_000);
        assert_eq!(parsed.streak.same_day, SameDayPolicy::Reset);
        assert_eq!(parsed.display.currency_symbol, "₩");
    }

    #[test]
    fn partial_file_uses_defaults() {
        let parsed: Config = toml::from_str("[streak]\nsame_day = \"preserve\"\n").unwrap();
        assert_eq!(parsed.streak.same_day, SameDayPolicy::Preserve);
        assert_eq!(parsed.points.points_per_level, 100);
        assert_eq!(parsed.progress.mode, ProgressMode::Capped);
    }

    #[test]
    fn get_supports_dot_path_keys() {
        let cfg = Config::default();
        assert_eq!(cfg.get("points.won_per_point").as_deref(), Some("10000"));
        assert_eq!(cfg.get("streak.same_day").as_deref(), Some("reset"));
        assert!(cfg.get("points.missing_key").is_none());
        assert!(cfg.get("").is_none());
    }

    #[test]
    fn set_updates_nested_values() {
        let mut cfg = Config::default();
        cfg.set("points.won_per_point", "5000").unwrap();
        cfg.set("progress.mode", "uncapped").unwrap();
        cfg.set("display.currency_symbol", "KRW ").unwrap();
        assert_eq!(cfg.points.won_per_point, 5_000);
        assert_eq!(cfg.progress.mode, ProgressMode::Uncapped);
        assert_eq!(cfg.display.currency_symbol, "KRW ");
    }

    #[test]
    fn set_rejects_unknown_key() {
        let mut cfg = Config::default();
        let err = cfg.set("points.nonexistent", "1").unwrap_err();
        assert!(err.to_string().contains("Unknown configuration key"));
    }

    #[test]
    fn set_rejects_invalid_values() {
        let mut cfg = Config::default();
        assert!(cfg.set("points.won_per_point", "lots").is_err());
        assert!(cfg.set("streak.same_day", "sometimes").is_err());
        assert_eq!(cfg.streak.same_day, SameDayPolicy::Reset);
    }

    #[test]
    fn settings_follow_config() {
        let mut cfg = Config::default();
        cfg.set("streak.same_day", "preserve").unwrap();
        let settings = cfg.settings();
        assert_eq!(settings.same_day, SameDayPolicy::Preserve);
        assert_eq!(settings.won_per_point, 10_000);
        assert_eq!(settings.recent_history, 5);
    }

    #[test]
    fn load_from_writes_defaults_then_reads_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");

        let cfg = Config::load_from(&path).unwrap();
        assert!(path.exists());
        assert_eq!(cfg.points.won_per_point, 10_000);

        let mut cfg = cfg;
        cfg.set("points.points_per_level", "250").unwrap();
        cfg.save_to(&path).unwrap();

        let reloaded = Config::load_from(&path).unwrap();
        assert_eq!(reloaded.points.points_per_level, 250);
    }

    #[test]
    fn load_from_reports_parse_errors() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "points = 3").unwrap();
        let err = Config::load_from(&path).unwrap_err();
        assert!(err.to_string().contains("Failed to load configuration"));
    }
}
