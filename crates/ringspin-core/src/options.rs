use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::ring::STEP_COUNT;

/// Effective spinner configuration.
///
/// Keys are camelCase so option tables read the same as the widget's
/// documented option names (`activeColor`, `tailCount`, ...). Numeric values
/// are taken as given; out-of-range values simply draw a degenerate ring.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SpinnerOptions {
    pub active_color: String,
    pub fill_color: String,
    /// Milliseconds for one full revolution.
    pub cycle_time: u64,
    /// Number of trailing spokes faded behind the active one.
    pub tail_count: u32,
    pub step_width: u32,
    pub corner_radius: u32,
    /// Fraction of the radius left empty at the center.
    pub knock_out_ratio: f64,
}

impl Default for SpinnerOptions {
    fn default() -> Self {
        Self {
            active_color: "#000000".to_string(),
            fill_color: "#aaaaaa".to_string(),
            cycle_time: 1000,
            tail_count: 6,
            step_width: 5,
            corner_radius: 2,
            knock_out_ratio: 0.5,
        }
    }
}

impl SpinnerOptions {
    /// Defaults with the given overrides applied.
    pub fn with_overrides(overrides: &SpinnerOverrides) -> Self {
        let mut options = Self::default();
        options.merge(overrides);
        options
    }

    /// Shallow merge: every field set in `overrides` replaces ours.
    pub fn merge(&mut self, overrides: &SpinnerOverrides) {
        if let Some(ref c) = overrides.active_color {
            self.active_color = c.clone();
        }
        if let Some(ref c) = overrides.fill_color {
            self.fill_color = c.clone();
        }
        if let Some(v) = overrides.cycle_time {
            self.cycle_time = v;
        }
        if let Some(v) = overrides.tail_count {
            self.tail_count = v;
        }
        if let Some(v) = overrides.step_width {
            self.step_width = v;
        }
        if let Some(v) = overrides.corner_radius {
            self.corner_radius = v;
        }
        if let Some(v) = overrides.knock_out_ratio {
            self.knock_out_ratio = v;
        }
    }

    /// Timer period between two steps: `floor(cycle_time / 12)` milliseconds.
    pub fn step_interval(&self) -> Duration {
        Duration::from_millis(self.cycle_time / STEP_COUNT as u64)
    }

    /// Parse a complete option table from TOML; missing keys take defaults.
    pub fn from_toml(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }
}

/// Caller-supplied options. Unset fields fall back to the defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpinnerOverrides {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub active_color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fill_color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cycle_time: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tail_count: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub step_width: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub corner_radius: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub knock_out_ratio: Option<f64>,
}

impl SpinnerOverrides {
    /// Layer `other` on top of `self`, field by field.
    pub fn overlay(&mut self, other: &SpinnerOverrides) {
        if other.active_color.is_some() {
            self.active_color = other.active_color.clone();
        }
        if other.fill_color.is_some() {
            self.fill_color = other.fill_color.clone();
        }
        if other.cycle_time.is_some() {
            self.cycle_time = other.cycle_time;
        }
        if other.tail_count.is_some() {
            self.tail_count = other.tail_count;
        }
        if other.step_width.is_some() {
            self.step_width = other.step_width;
        }
        if other.corner_radius.is_some() {
            self.corner_radius = other.corner_radius;
        }
        if other.knock_out_ratio.is_some() {
            self.knock_out_ratio = other.knock_out_ratio;
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let options = SpinnerOptions::default();
        assert_eq!(options.active_color, "#000000");
        assert_eq!(options.fill_color, "#aaaaaa");
        assert_eq!(options.cycle_time, 1000);
        assert_eq!(options.tail_count, 6);
        assert_eq!(options.step_width, 5);
        assert_eq!(options.corner_radius, 2);
        assert_eq!(options.knock_out_ratio, 0.5);
    }

    #[test]
    fn test_merge_is_shallow() {
        let overrides = SpinnerOverrides {
            fill_color: Some("#ffffff".to_string()),
            tail_count: Some(3),
            ..Default::default()
        };
        let options = SpinnerOptions::with_overrides(&overrides);
        assert_eq!(options.fill_color, "#ffffff");
        assert_eq!(options.tail_count, 3);
        // Untouched fields keep defaults
        assert_eq!(options.active_color, "#000000");
        assert_eq!(options.cycle_time, 1000);
    }

    #[test]
    fn test_step_interval_floors() {
        let mut options = SpinnerOptions::default();
        assert_eq!(options.step_interval(), Duration::from_millis(83));
        options.cycle_time = 120;
        assert_eq!(options.step_interval(), Duration::from_millis(10));
    }

    #[test]
    fn test_from_toml_camel_case() {
        let options = SpinnerOptions::from_toml(
            r##"
activeColor = "#ff0000"
knockOutRatio = 0.25
"##,
        )
        .unwrap();
        assert_eq!(options.active_color, "#ff0000");
        assert_eq!(options.knock_out_ratio, 0.25);
        assert_eq!(options.step_width, 5);
    }

    #[test]
    fn test_from_toml_rejects_bad_types() {
        assert!(SpinnerOptions::from_toml("tailCount = \"many\"").is_err());
    }

    #[test]
    fn test_overlay_prefers_later_values() {
        let mut base = SpinnerOverrides {
            cycle_time: Some(500),
            step_width: Some(3),
            ..Default::default()
        };
        base.overlay(&SpinnerOverrides {
            cycle_time: Some(240),
            ..Default::default()
        });
        assert_eq!(base.cycle_time, Some(240));
        assert_eq!(base.step_width, Some(3));
        assert!(!base.is_empty());
        assert!(SpinnerOverrides::default().is_empty());
    }
}
