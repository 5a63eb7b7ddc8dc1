use std::fmt;
use std::str::FromStr;

use crate::error::{CoreError, Result};

/// An opaque 8-bit RGB color.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Blend `active` over `fill` per channel:
    /// `floor(active * level + fill * (1 - level))`.
    ///
    /// A level of 1 yields `active`, a level of 0 yields `fill`.
    pub fn blend(active: Rgb, fill: Rgb, level: f64) -> Rgb {
        let inactive = 1.0 - level;
        let channel = |a: u8, f: u8| -> u8 {
            let v = (f64::from(a) * level + f64::from(f) * inactive).floor();
            v.clamp(0.0, 255.0) as u8
        };
        Rgb {
            r: channel(active.r, fill.r),
            g: channel(active.g, fill.g),
            b: channel(active.b, fill.b),
        }
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl FromStr for Rgb {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self> {
        CssColorParser.parse(s)
    }
}

/// Converts color strings to RGB components and back.
pub trait ColorParser {
    fn parse(&self, color: &str) -> Result<Rgb>;

    fn format(&self, color: Rgb) -> String {
        color.to_string()
    }
}

/// Parses the usual CSS notations: `#rgb`, `#rrggbb`, `rgb(r, g, b)` and a
/// handful of color keywords. Formats as lowercase `#rrggbb`.
#[derive(Debug, Clone, Copy, Default)]
pub struct CssColorParser;

impl ColorParser for CssColorParser {
    fn parse(&self, color: &str) -> Result<Rgb> {
        let s = color.trim().to_lowercase();
        if let Some(hex) = s.strip_prefix('#') {
            return parse_hex(hex).ok_or_else(|| CoreError::InvalidColor(color.to_string()));
        }
        if let Some(args) = s.strip_prefix("rgb(").and_then(|r| r.strip_suffix(')')) {
            return parse_rgb_function(args).ok_or_else(|| CoreError::InvalidColor(color.to_string()));
        }
        named_color(&s).ok_or_else(|| CoreError::InvalidColor(color.to_string()))
    }
}

fn parse_hex(hex: &str) -> Option<Rgb> {
    match hex.len() {
        3 => {
            let mut digits = hex.chars().map(|c| c.to_digit(16));
            let r = digits.next()?? as u8;
            let g = digits.next()?? as u8;
            let b = digits.next()?? as u8;
            Some(Rgb::new(r * 17, g * 17, b * 17))
        }
        6 => Some(Rgb::new(
            u8::from_str_radix(hex.get(0..2)?, 16).ok()?,
            u8::from_str_radix(hex.get(2..4)?, 16).ok()?,
            u8::from_str_radix(hex.get(4..6)?, 16).ok()?,
        )),
        _ => None,
    }
}

fn parse_rgb_function(args: &str) -> Option<Rgb> {
    let parts: Vec<u8> = args
        .split(',')
        .map(|p| p.trim().parse::<u8>().ok())
        .collect::<Option<_>>()?;
    match parts.as_slice() {
        [r, g, b] => Some(Rgb::new(*r, *g, *b)),
        _ => None,
    }
}

fn named_color(name: &str) -> Option<Rgb> {
    let rgb = match name {
        "black" => Rgb::new(0, 0, 0),
        "white" => Rgb::new(255, 255, 255),
        "red" => Rgb::new(255, 0, 0),
        "lime" => Rgb::new(0, 255, 0),
        "green" => Rgb::new(0, 128, 0),
        "blue" => Rgb::new(0, 0, 255),
        "yellow" => Rgb::new(255, 255, 0),
        "cyan" | "aqua" => Rgb::new(0, 255, 255),
        "magenta" | "fuchsia" => Rgb::new(255, 0, 255),
        "gray" | "grey" => Rgb::new(128, 128, 128),
        "darkgray" | "darkgrey" | "dark_gray" => Rgb::new(169, 169, 169),
        "lightgray" | "lightgrey" | "light_gray" => Rgb::new(211, 211, 211),
        "silver" => Rgb::new(192, 192, 192),
        "maroon" => Rgb::new(128, 0, 0),
        "olive" => Rgb::new(128, 128, 0),
        "navy" => Rgb::new(0, 0, 128),
        "purple" => Rgb::new(128, 0, 128),
        "teal" => Rgb::new(0, 128, 128),
        "orange" => Rgb::new(255, 165, 0),
        _ => return None,
    };
    Some(rgb)
}
