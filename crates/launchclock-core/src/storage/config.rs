//! TOML-based application configuration.
//!
//! Stores user preferences including:
//! - The countdown target and the default offset used without one
//! - The active theme and where custom themes live
//! - Refresh cadence
//! - Terminal display toggles
//!
//! Configuration is stored at `~/.config/launchclock/config.toml`.

use std::path::{Path, PathBuf};
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::data_dir;
use crate::countdown::{Target, DEFAULT_OFFSET_DAYS};
use crate::error::{ConfigError, CoreError, Result};
use crate::render::RenderOptions;
use crate::theme::ThemeRegistry;
use crate::ticker::CountdownTicker;

/// Terminal display configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    #[serde(default = "default_true")]
    pub color: bool,
    #[serde(default = "default_true")]
    pub show_logo: bool,
    #[serde(default = "default_true")]
    pub show_footer: bool,
}

/// Application configuration.
///
/// Serialized to/from TOML at `~/.config/launchclock/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Countdown target; parsed like the `--target` flag.
    #[serde(default)]
    pub target: Option<String>,
    #[serde(default = "default_theme")]
    pub theme: String,
    /// Days added to "now" when no target is set.
    #[serde(default = "default_offset_days")]
    pub default_offset_days: i64,
    #[serde(default = "default_tick_interval_ms")]
    pub tick_interval_ms: u64,
    #[serde(default)]
    pub ui: UiConfig,
    /// Directory of custom theme files. Defaults to `<data dir>/themes`.
    #[serde(default)]
    pub themes_dir: Option<String>,
}

// Default functions
fn default_true() -> bool {
    true
}
fn default_theme() -> String {
    ThemeRegistry::default_id().to_string()
}
fn default_offset_days() -> i64 {
    DEFAULT_OFFSET_DAYS
}
fn default_tick_interval_ms() -> u64 {
    CountdownTicker::DEFAULT_PERIOD.as_millis() as u64
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            color: true,
            show_logo: true,
            show_footer: true,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            target: None,
            theme: default_theme(),
            default_offset_days: default_offset_days(),
            tick_interval_ms: default_tick_interval_ms(),
            ui: UiConfig::default(),
            themes_dir: None,
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
        let invalid = |message: String| ConfigError::InvalidValue {
            key: key.to_string(),
            message,
        };

        let mut parts = key.split('.').peekable();
        if parts.peek().map_or(true, |p| p.is_empty()) {
            return Err(unknown());
        }

        let mut current = root;
        while let Some(part) = parts.next() {
            if parts.peek().is_none() {
                let obj = current.as_object_mut().ok_or_else(unknown)?;
                let existing = obj.get(part).ok_or_else(unknown)?;

                let new_value = match existing {
                    serde_json::Value::Bool(_) => serde_json::Value::Bool(
                        value
                            .parse::<bool>()
                            .map_err(|_| invalid(format!("cannot parse '{value}' as bool")))?,
                    ),
                    serde_json::Value::Number(_) => value
                        .parse::<i64>()
                        .map(|n| serde_json::Value::Number(n.into()))
                        .map_err(|_| invalid(format!("cannot parse '{value}' as integer")))?,
                    serde_json::Value::Object(_) | serde_json::Value::Array(_) => {
                        serde_json::from_str(value).map_err(|e| invalid(e.to_string()))?
                    }
                    // "none" clears optional fields.
                    _ if value.eq_ignore_ascii_case("none") => serde_json::Value::Null,
                    _ => serde_json::Value::String(value.into()),
                };

                obj.insert(part.to_string(), new_value);
                return Ok(());
            }

            current = current.get_mut(part).ok_or_else(unknown)?;
        }

        Err(unknown())
    }

    fn path() -> Result<PathBuf, ConfigError> {
        Ok(data_dir()?.join("config.toml"))
    }

    /// Load from disk or return default.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be parsed,
    /// or if the default config cannot be written to disk.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::path()?)
    }

    /// Load from `path`, writing the defaults there if the file is missing.
    pub fn load_from(path: &Path) -> Result<Self> {
        match std::fs::read_to_string(path) {
            Ok(content) => {
                let cfg: Config = toml::from_str(&content).map_err(|e| ConfigError::LoadFailed {
                    path: path.to_path_buf(),
                    message: e.to_string(),
                })?;
                cfg.validate()?;
                Ok(cfg)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                let cfg = Self::default();
                cfg.save_to(path)?;
                Ok(cfg)
            }
            Err(e) => Err(ConfigError::LoadFailed {
                path: path.to_path_buf(),
                message: e.to_string(),
            }
            .into()),
        }
    }

    /// Persist to disk.
    ///
    /// # Errors
    ///
    /// Returns an error if the config cannot be serialized or written to disk.
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        let save_failed = |message: String| ConfigError::SaveFailed {
            path: path.to_path_buf(),
            message,
        };
        let content = toml::to_string_pretty(self).map_err(|e| save_failed(e.to_string()))?;
        std::fs::write(path, content).map_err(|e| save_failed(e.to_string()))?;
        Ok(())
    }

    /// Reject values that would make the countdown unusable.
    pub fn validate(&self) -> Result<()> {
        if self.tick_interval_ms == 0 {
            return Err(ConfigError::InvalidValue {
                key: "tick_interval_ms".into(),
                message: "must be greater than zero".into(),
            }
            .into());
        }
        if let Some(raw) = &self.target {
            Target::parse(raw)?;
        }
        Target::from_now(Utc::now(), self.default_offset_days).map_err(|e| {
            ConfigError::InvalidValue {
                key: "default_offset_days".into(),
                message: e.to_string(),
            }
        })?;
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

    /// Update a value in memory by key, without saving.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is unknown or the value cannot be parsed
    /// or fails validation. On error `self` is left unchanged.
    pub fn apply(&mut self, key: &str, value: &str) -> Result<()> {
        let mut json = serde_json::to_value(&*self)?;
        Self::set_json_value_by_path(&mut json, key, value)?;
        let updated: Config = serde_json::from_value(json).map_err(|e| {
            CoreError::from(ConfigError::InvalidValue {
                key: key.to_string(),
                message: e.to_string(),
            })
        })?;
        updated.validate()?;
        *self = updated;
        Ok(())
    }

    /// Set a config value by key and persist it.
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.apply(key, value)?;
        self.save()
    }

    /// The configured target, or `now + default_offset_days`.
    pub fn resolve_target(&self, now: DateTime<Utc>) -> Result<Target> {
        match &self.target {
            Some(raw) => Ok(Target::parse(raw)?),
            None => Ok(Target::from_now(now, self.default_offset_days)?),
        }
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms.max(1))
    }

    pub fn render_options(&self) -> RenderOptions {
        RenderOptions {
            show_logo: self.ui.show_logo,
            show_footer: self.ui.show_footer,
        }
    }

    pub fn themes_dir(&self) -> Result<PathBuf> {
        match &self.themes_dir {
            Some(dir) => Ok(PathBuf::from(dir)),
            None => Ok(data_dir()?.join("themes")),
        }
    }

    /// Built-in themes plus everything in [`Config::themes_dir`].
    pub fn theme_registry(&self) -> Result<ThemeRegistry> {
        let mut registry = ThemeRegistry::new();
        registry.load_dir(&self.themes_dir()?)?;
        Ok(registry)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration as ChronoDuration, TimeZone};

    #[test]
    fn default_config_roundtrip() {
        let cfg = Config::default();
        let toml_str = toml::to_string_pretty(&cfg).unwrap();
        let parsed: Config = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed.theme, "cyberpunk");
        assert_eq!(parsed.tick_interval_ms, 1000);
        assert_eq!(parsed.tick_interval(), CountdownTicker::DEFAULT_PERIOD);
        assert!(parsed.target.is_none());
    }

    #[test]
    fn get_supports_dot_path_keys() {
        let cfg = Config::default();
        assert_eq!(cfg.get("ui.color").as_deref(), Some("true"));
        assert_eq!(cfg.get("default_offset_days").as_deref(), Some("2"));
        assert_eq!(cfg.get("theme").as_deref(), Some("cyberpunk"));
        assert!(cfg.get("ui.missing_key").is_none());
        assert!(cfg.get("").is_none());
    }

    #[test]
    fn apply_updates_nested_bool() {
        let mut cfg = Config::default();
        cfg.apply("ui.show_logo", "false").unwrap();
        assert!(!cfg.ui.show_logo);
        assert!(!cfg.render_options().show_logo);
    }

    #[test]
    fn apply_sets_and_clears_optional_target() {
        let mut cfg = Config::default();
        cfg.apply("target", "2025-12-21T07:30:00+00:00").unwrap();
        assert_eq!(cfg.target.as_deref(), Some("2025-12-21T07:30:00+00:00"));

        let now = Utc.with_ymd_and_hms(2025, 12, 20, 7, 30, 0).unwrap();
        assert_eq!(cfg.resolve_target(now).unwrap().at() - now, ChronoDuration::days(1));

        cfg.apply("target", "none").unwrap();
        assert!(cfg.target.is_none());
    }

    #[test]
    fn apply_rejects_malformed_target_and_keeps_state() {
        let mut cfg = Config::default();
        assert!(cfg.apply("target", "tomorrow-ish").is_err());
        assert!(cfg.target.is_none());
    }

    #[test]
    fn apply_rejects_zero_interval() {
        let mut cfg = Config::default();
        assert!(cfg.apply("tick_interval_ms", "0").is_err());
        assert_eq!(cfg.tick_interval_ms, 1000);
        cfg.apply("tick_interval_ms", "250").unwrap();
        assert_eq!(cfg.tick_interval(), Duration::from_millis(250));
    }

    #[test]
    fn apply_rejects_unknown_key_and_bad_type() {
        let mut cfg = Config::default();
        assert!(matches!(
            cfg.apply("ui.nonexistent_key", "value"),
            Err(CoreError::Config(ConfigError::UnknownKey(_)))
        ));
        assert!(cfg.apply("ui.color", "not_a_bool").is_err());
        assert!(cfg.apply("default_offset_days", "two").is_err());
    }

    #[test]
    fn resolve_target_defaults_to_offset() {
        let mut cfg = Config::default();
        let now = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap();
        assert_eq!(cfg.resolve_target(now).unwrap().at() - now, ChronoDuration::days(2));

        cfg.apply("default_offset_days", "7").unwrap();
        assert_eq!(cfg.resolve_target(now).unwrap().at() - now, ChronoDuration::days(7));
    }

    #[test]
    fn load_from_writes_defaults_when_missing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        let cfg = Config::load_from(&path).unwrap();
        assert_eq!(cfg.theme, "cyberpunk");
        assert!(path.exists());
    }

    #[test]
    fn load_from_reads_saved_values() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        let mut cfg = Config::default();
        cfg.apply("theme", "eco").unwrap();
        cfg.apply("ui.show_footer", "false").unwrap();
        cfg.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded.theme, "eco");
        assert!(!loaded.ui.show_footer);
    }

    #[test]
    fn load_from_rejects_invalid_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "tick_interval_ms = 0\n").unwrap();
        assert!(Config::load_from(&path).is_err());

        std::fs::write(&path, "theme = [").unwrap();
        assert!(matches!(
            Config::load_from(&path),
            Err(CoreError::Config(ConfigError::LoadFailed { .. }))
        ));
    }

    #[test]
    fn theme_registry_uses_configured_dir() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("launch.toml"),
            "id = \"launch\"\nname = \"Launch\"\nheadline = \"SOON\"\nreached_headline = \"LIVE\"\n",
        )
        .unwrap();
        let mut cfg = Config::default();
        cfg.apply("themes_dir", dir.path().to_str().unwrap()).unwrap();
        let registry = cfg.theme_registry().unwrap();
        assert!(registry.get("launch").is_ok());
    }
}
