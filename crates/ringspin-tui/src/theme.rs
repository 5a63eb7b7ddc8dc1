use std::str::FromStr;

use ratatui::style::{Color, Modifier, Style};
use ringspin_core::{ColorParser, CssColorParser, SpinnerOverrides};
use serde::Deserialize;
use strum::{Display, EnumIter, EnumString};
use tracing::warn;

/// Themes that ship with the binary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, EnumIter)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum BuiltinTheme {
    Dark,
    Light,
    Matrix,
}

/// Application theme: UI styles plus the spinner palette it suggests.
#[derive(Debug, Clone)]
pub struct Theme {
    pub border: Style,
    pub title: Style,
    pub normal: Style,
    pub dimmed: Style,
    pub accent: Style,
    pub status_bar: Style,
    pub popup_border: Style,
    pub popup_title: Style,
    pub spinner_active: String,
    pub spinner_fill: String,
}

impl Theme {
    /// Default dark theme based on the Catppuccin Mocha palette.
    pub fn dark() -> Self {
        let surface0 = Color::Rgb(49, 50, 68); // #313244
        let surface1 = Color::Rgb(69, 71, 90); // #45475a
        let overlay0 = Color::Rgb(108, 112, 134); // #6c7086
        let subtext0 = Color::Rgb(166, 173, 200); // #a6adc8
        let text = Color::Rgb(205, 214, 244); // #cdd6f4
        let blue = Color::Rgb(137, 180, 250); // #89b4fa
        let lavender = Color::Rgb(180, 190, 254); // #b4befe
        let mauve = Color::Rgb(203, 166, 247); // #cba6f7

        Self {
            border: Style::default().fg(surface1),
            title: Style::default().fg(lavender).add_modifier(Modifier::BOLD),
            normal: Style::default().fg(text),
            dimmed: Style::default().fg(overlay0),
            accent: Style::default().fg(blue).add_modifier(Modifier::BOLD),
            status_bar: Style::default().fg(subtext0).bg(surface0),
            popup_border: Style::default().fg(mauve),
            popup_title: Style::default().fg(mauve).add_modifier(Modifier::BOLD),
            spinner_active: "#89b4fa".to_string(),
            spinner_fill: "#45475a".to_string(),
        }
    }

    /// Light theme for light terminal backgrounds. Uses the stock spinner
    /// palette.
    pub fn light() -> Self {
        Self {
            border: Style::default().fg(Color::DarkGray),
            title: Style::default().fg(Color::Blue).add_modifier(Modifier::BOLD),
            normal: Style::default().fg(Color::Black),
            dimmed: Style::default().fg(Color::Gray),
            accent: Style::default().fg(Color::Blue).add_modifier(Modifier::BOLD),
            status_bar: Style::default().fg(Color::Black).bg(Color::Gray),
            popup_border: Style::default().fg(Color::Blue),
            popup_title: Style::default().fg(Color::Blue).add_modifier(Modifier::BOLD),
            spinner_active: "#000000".to_string(),
            spinner_fill: "#aaaaaa".to_string(),
        }
    }

    /// Matrix green-on-black retro theme.
    pub fn matrix() -> Self {
        let bright = Color::Rgb(0, 255, 0);
        Self {
            border: Style::default().fg(Color::Rgb(0, 100, 0)),
            title: Style::default().fg(bright).add_modifier(Modifier::BOLD),
            normal: Style::default().fg(Color::Rgb(0, 190, 0)),
            dimmed: Style::default().fg(Color::Rgb(0, 80, 0)),
            accent: Style::default().fg(bright).add_modifier(Modifier::BOLD),
            status_bar: Style::default()
                .fg(Color::Rgb(0, 190, 0))
                .bg(Color::Rgb(0, 30, 0)),
            popup_border: Style::default().fg(bright),
            popup_title: Style::default().fg(bright).add_modifier(Modifier::BOLD),
            spinner_active: "#00ff00".to_string(),
            spinner_fill: "#003000".to_string(),
        }
    }

    pub fn builtin(theme: BuiltinTheme) -> Self {
        match theme {
            BuiltinTheme::Dark => Self::dark(),
            BuiltinTheme::Light => Self::light(),
            BuiltinTheme::Matrix => Self::matrix(),
        }
    }

    /// Load a theme by name: a builtin, else
    /// `~/.config/ringspin/themes/<name>.toml`, else the dark theme.
    pub fn load(name: &str) -> Self {
        if let Ok(builtin) = BuiltinTheme::from_str(name) {
            return Self::builtin(builtin);
        }

        let theme_path = dirs::config_dir()
            .map(|d| d.join("ringspin").join("themes").join(format!("{}.toml", name)));
        if let Some(path) = theme_path {
            match std::fs::read_to_string(&path) {
                Ok(content) => match Self::from_toml(&content) {
                    Ok(theme) => return theme,
                    Err(e) => warn!("Failed to parse theme file {:?}: {}", path, e),
                },
                Err(e) => warn!("Theme {:?} not found at {:?}: {}", name, path, e),
            }
        }

        Self::dark()
    }

    /// Parse a custom theme definition. Missing entries fall back to the
    /// dark theme.
    pub fn from_toml(content: &str) -> Result<Self, toml::de::Error> {
        let def: ThemeDefinition = toml::from_str(content)?;
        Ok(def.to_theme())
    }

    /// Spinner colors this theme suggests, as option overrides.
    pub fn spinner_overrides(&self) -> SpinnerOverrides {
        SpinnerOverrides {
            active_color: Some(self.spinner_active.clone()),
            fill_color: Some(self.spinner_fill.clone()),
            ..Default::default()
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::dark()
    }
}

#[derive(Debug, Default, Deserialize)]
struct ThemeDefinition {
    #[serde(default)]
    colors: ThemeColors,
    #[serde(default)]
    spinner: SpinnerPalette,
}

#[derive(Debug, Default, Deserialize)]
struct ThemeColors {
    border: Option<StyleDef>,
    title: Option<StyleDef>,
    normal: Option<StyleDef>,
    dimmed: Option<StyleDef>,
    accent: Option<StyleDef>,
    status_bar: Option<StyleDef>,
    popup_border: Option<StyleDef>,
    popup_title: Option<StyleDef>,
}

#[derive(Debug, Default, Deserialize)]
struct SpinnerPalette {
    active: Option<String>,
    fill: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct StyleDef {
    #[serde(default)]
    fg: Option<String>,
    #[serde(default)]
    bg: Option<String>,
    #[serde(default)]
    modifiers: Option<String>,
}

impl StyleDef {
    fn to_style(&self) -> Style {
        let mut style = Style::default();
        if let Some(ref fg) = self.fg {
            style = style.fg(parse_color(fg));
        }
        if let Some(ref bg) = self.bg {
            style = style.bg(parse_color(bg));
        }
        if let Some(ref mods) = self.modifiers {
            for m in mods.split('|') {
                match m.trim().to_uppercase().as_str() {
                    "BOLD" => style = style.add_modifier(Modifier::BOLD),
                    "ITALIC" => style = style.add_modifier(Modifier::ITALIC),
                    "UNDERLINED" => style = style.add_modifier(Modifier::UNDERLINED),
                    "DIM" => style = style.add_modifier(Modifier::DIM),
                    _ => {}
                }
            }
        }
        style
    }
}

impl ThemeDefinition {
    fn to_theme(&self) -> Theme {
        let base = Theme::dark();
        let c = &self.colors;
        let pick = |def: &Option<StyleDef>, fallback: Style| {
            def.as_ref().map(StyleDef::to_style).unwrap_or(fallback)
        };
        Theme {
            border: pick(&c.border, base.border),
            title: pick(&c.title, base.title),
            normal: pick(&c.normal, base.normal),
            dimmed: pick(&c.dimmed, base.dimmed),
            accent: pick(&c.accent, base.accent),
            status_bar: pick(&c.status_bar, base.status_bar),
            popup_border: pick(&c.popup_border, base.popup_border),
            popup_title: pick(&c.popup_title, base.popup_title),
            spinner_active: self.spinner.active.clone().unwrap_or(base.spinner_active),
            spinner_fill: self.spinner.fill.clone().unwrap_or(base.spinner_fill),
        }
    }
}

/// Terminal color from a name (`dark_gray`, `LightBlue`, ...) or any notation
/// the spinner color parser accepts. Unknown strings become white.
fn parse_color(s: &str) -> Color {
    let lower = s.trim().to_lowercase();
    match lower.as_str() {
        "black" => Color::Black,
        "red" => Color::Red,
        "green" => Color::Green,
        "yellow" => Color::Yellow,
        "blue" => Color::Blue,
        "magenta" => Color::Magenta,
        "cyan" => Color::Cyan,
        "gray" | "grey" => Color::Gray,
        "dark_gray" | "dark_grey" | "darkgray" => Color::DarkGray,
        "light_red" | "lightred" => Color::LightRed,
        "light_green" | "lightgreen" => Color::LightGreen,
        "light_yellow" | "lightyellow" => Color::LightYellow,
        "light_blue" | "lightblue" => Color::LightBlue,
        "light_magenta" | "lightmagenta" => Color::LightMagenta,
        "light_cyan" | "lightcyan" => Color::LightCyan,
        "white" => Color::White,
        "reset" => Color::Reset,
        _ => {
            // Bare RRGGBB is accepted too
            let css = if lower.len() == 6 && !lower.starts_with('#') {
                format!("#{}", lower)
            } else {
                lower
            };
            CssColorParser
                .parse(&css)
                .map(|rgb| Color::Rgb(rgb.r, rgb.g, rgb.b))
                .unwrap_or(Color::White)
        }
    }
}

#[cfg(test)]
mod tests {
    use strum::IntoEnumIterator;

    use super::*;

    #[test]
    fn test_parse_color_names() {
        assert_eq!(parse_color("red"), Color::Red);
        assert_eq!(parse_color("dark_gray"), Color::DarkGray);
        assert_eq!(parse_color("DarkGray"), Color::DarkGray);
    }

    #[test]
    fn test_parse_color_hex_and_rgb() {
        assert_eq!(parse_color("#FF0000"), Color::Rgb(255, 0, 0));
        assert_eq!(parse_color("00FF00"), Color::Rgb(0, 255, 0));
        assert_eq!(parse_color("rgb(1, 2, 3)"), Color::Rgb(1, 2, 3));
        assert_eq!(parse_color("nonsense"), Color::White);
    }

    #[test]
    fn test_builtin_names() {
        assert_eq!(BuiltinTheme::from_str("Matrix").unwrap(), BuiltinTheme::Matrix);
        assert_eq!(BuiltinTheme::Light.to_string(), "light");
        assert_eq!(BuiltinTheme::iter().count(), 3);
    }

    #[test]
    fn test_builtin_spinner_palettes_parse() {
        for builtin in BuiltinTheme::iter() {
            let theme = Theme::builtin(builtin);
            assert!(CssColorParser.parse(&theme.spinner_active).is_ok());
            assert!(CssColorParser.parse(&theme.spinner_fill).is_ok());
        }
    }

    #[test]
    fn test_light_theme_keeps_stock_palette() {
        let overrides = Theme::load("light").spinner_overrides();
        assert_eq!(overrides.active_color.as_deref(), Some("#000000"));
        assert_eq!(overrides.fill_color.as_deref(), Some("#aaaaaa"));
        assert_eq!(overrides.cycle_time, None);
    }

    #[test]
    fn test_unknown_theme_falls_back_to_dark() {
        let theme = Theme::load("does-not-exist-anywhere");
        assert_eq!(theme.spinner_active, Theme::dark().spinner_active);
    }

    #[test]
    fn test_custom_theme_from_toml() {
        let theme = Theme::from_toml(
            r##"
[colors]
border = { fg = "cyan" }
title = { fg = "#ff8800", modifiers = "BOLD|ITALIC" }

[spinner]
active = "orange"
"##,
        )
        .unwrap();
        assert_eq!(theme.border, Style::default().fg(Color::Cyan));
        assert_eq!(
            theme.title,
            Style::default()
                .fg(Color::Rgb(255, 136, 0))
                .add_modifier(Modifier::BOLD | Modifier::ITALIC)
        );
        assert_eq!(theme.spinner_active, "orange");
        assert_eq!(theme.spinner_fill, Theme::dark().spinner_fill);
    }
}
