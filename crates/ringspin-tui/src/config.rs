use std::path::{Path, PathBuf};

use ringspin_core::{SpinnerOptions, SpinnerOverrides};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::theme::Theme;

fn is_true(v: &bool) -> bool {
    *v
}

fn default_true() -> bool {
    true
}

/// Top-level application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    /// Spinner options; anything left out comes from the theme, then from
    /// the stock defaults.
    #[serde(default, skip_serializing_if = "SpinnerOverrides::is_empty")]
    pub spinner: SpinnerOverrides,
    /// True when no config file was found on disk (first launch).
    #[serde(skip)]
    pub first_launch: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    #[serde(default = "default_theme")]
    pub theme: String,
    /// Upper bound on how long the event loop sleeps between redraws.
    #[serde(default = "default_tick_rate")]
    pub tick_rate_ms: u64,
    #[serde(default = "default_log_level")]
    pub log_level: String,
    /// Start spinning as soon as the app opens.
    #[serde(default = "default_true", skip_serializing_if = "is_true")]
    pub autostart: bool,
}

fn default_theme() -> String {
    "dark".to_string()
}
fn default_tick_rate() -> u64 {
    250
}
fn default_log_level() -> String {
    "info".to_string()
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            theme: default_theme(),
            tick_rate_ms: default_tick_rate(),
            log_level: default_log_level(),
            autostart: true,
        }
    }
}

impl AppConfig {
    /// `~/.config/ringspin/config.toml`, if the platform has a config dir.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("ringspin").join("config.toml"))
    }

    /// Load config from the default location, with fallback to defaults.
    pub fn load() -> Self {
        match Self::default_path() {
            Some(path) => Self::load_from(&path),
            None => Self::first_launch(),
        }
    }

    /// Load config from `path`. A missing or unreadable file yields the
    /// defaults; a malformed one is logged and also yields the defaults.
    pub fn load_from(path: &Path) -> Self {
        if path.exists() {
            match std::fs::read_to_string(path) {
                Ok(content) => match Self::from_toml(&content) {
                    Ok(config) => return config,
                    Err(e) => warn!("Failed to parse config {:?}: {}", path, e),
                },
                Err(e) => warn!("Failed to read config {:?}: {}", path, e),
            }
        }
        Self::first_launch()
    }

    fn first_launch() -> Self {
        Self {
            first_launch: true,
            ..Self::default()
        }
    }

    /// Parse config from a TOML string.
    pub fn from_toml(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Save the config to the default location.
    pub fn save(&self) -> Result<(), String> {
        let path = Self::default_path().ok_or_else(|| "Cannot determine config directory".to_string())?;
        self.save_to(&path)
    }

    /// Save the entire config to `path`, creating parent directories.
    pub fn save_to(&self, path: &Path) -> Result<(), String> {
        if let Some(dir) = path.parent() {
            std::fs::create_dir_all(dir).map_err(|e| format!("Failed to create config dir: {}", e))?;
        }

        let content = toml::to_string_pretty(self)
            .map_err(|e| format!("Failed to serialize config: {}", e))?;

        std::fs::write(path, content).map_err(|e| format!("Failed to write config: {}", e))?;

        Ok(())
    }

    /// Effective spinner options: stock defaults, then the theme's palette,
    /// then the `[spinner]` table.
    pub fn spinner_options(&self, theme: &Theme) -> SpinnerOptions {
        let mut overrides = theme.spinner_overrides();
        overrides.overlay(&self.spinner);
        SpinnerOptions::with_overrides(&overrides)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.general.theme, "dark");
        assert_eq!(config.general.tick_rate_ms, 250);
        assert!(config.general.autostart);
        assert!(config.spinner.is_empty());
    }

    #[test]
    fn test_parse_minimal_config() {
        let toml = r#"
[general]
theme = "matrix"
"#;
        let config = AppConfig::from_toml(toml).unwrap();
        assert_eq!(config.general.theme, "matrix");
        assert_eq!(config.general.log_level, "info");
        assert!(config.general.autostart);
    }

    #[test]
    fn test_parse_full_config() {
        let toml = r##"
[general]
theme = "light"
tick_rate_ms = 100
log_level = "debug"
autostart = false

[spinner]
activeColor = "#ff0000"
fillColor = "#222222"
cycleTime = 600
tailCount = 4
stepWidth = 3
cornerRadius = 1
knockOutRatio = 0.4
"##;
        let config = AppConfig::from_toml(toml).unwrap();
        assert_eq!(config.general.tick_rate_ms, 100);
        assert!(!config.general.autostart);

        let options = config.spinner_options(&Theme::light());
        assert_eq!(options.active_color, "#ff0000");
        assert_eq!(options.fill_color, "#222222");
        assert_eq!(options.cycle_time, 600);
        assert_eq!(options.tail_count, 4);
        assert_eq!(options.step_width, 3);
        assert_eq!(options.corner_radius, 1);
        assert_eq!(options.knock_out_ratio, 0.4);
    }

    #[test]
    fn test_spinner_table_over_theme_palette() {
        let toml = r##"
[spinner]
fillColor = "#101010"
"##;
        let config = AppConfig::from_toml(toml).unwrap();
        let options = config.spinner_options(&Theme::dark());
        assert_eq!(options.active_color, Theme::dark().spinner_active);
        assert_eq!(options.fill_color, "#101010");
        assert_eq!(options.tail_count, 6);
    }

    #[test]
    fn test_theme_palette_sits_between_defaults_and_spinner_table() {
        let config = AppConfig::default();
        let dark = config.spinner_options(&Theme::dark());
        assert_eq!(dark.active_color, "#89b4fa");
        assert_eq!(dark.fill_color, "#45475a");

        // The light palette is the stock one
        assert_eq!(config.spinner_options(&Theme::light()), SpinnerOptions::default());
    }

    #[test]
    fn test_bad_spinner_value_is_an_error() {
        let toml = r#"
[spinner]
cycleTime = "fast"
"#;
        assert!(AppConfig::from_toml(toml).is_err());
    }

    #[test]
    fn test_autostart_true_not_serialized() {
        let config = AppConfig::default();
        let serialized = toml::to_string_pretty(&config).unwrap();
        assert!(!serialized.contains("autostart"));
        assert!(!serialized.contains("[spinner]"));
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut config = AppConfig::default();
        config.general.theme = "matrix".to_string();
        config.spinner.tail_count = Some(2);
        config.save_to(&path).unwrap();

        let loaded = AppConfig::load_from(&path);
        assert!(!loaded.first_launch);
        assert_eq!(loaded.general.theme, "matrix");
        assert_eq!(loaded.spinner.tail_count, Some(2));
    }

    #[test]
    fn test_load_missing_file_is_first_launch() {
        let dir = tempfile::tempdir().unwrap();
        let config = AppConfig::load_from(&dir.path().join("absent.toml"));
        assert!(config.first_launch);
        assert_eq!(config.general.theme, "dark");
    }

    #[test]
    fn test_load_malformed_file_falls_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "this is not valid toml {{{}}}").unwrap();
        let config = AppConfig::load_from(&path);
        assert!(config.first_launch);
    }
}
