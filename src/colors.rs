use core::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer};

use crate::error::Error;

/// The four-bit ANSI color set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Color4 {
    Black,
    Red,
    Green,
    Yellow,
    Blue,
    Magenta,
    Cyan,
    White,
}

impl Color4 {
    fn index(&self) -> u8 {
        match self {
            Color4::Black => 0,
            Color4::Red => 1,
            Color4::Green => 2,
            Color4::Yellow => 3,
            Color4::Blue => 4,
            Color4::Magenta => 5,
            Color4::Cyan => 6,
            Color4::White => 7,
        }
    }

    fn name(&self) -> &'static str {
        match self {
            Color4::Black => "black",
            Color4::Red => "red",
            Color4::Green => "green",
            Color4::Yellow => "yellow",
            Color4::Blue => "blue",
            Color4::Magenta => "magenta",
            Color4::Cyan => "cyan",
            Color4::White => "white",
        }
    }
}

/// Color of a styled run or of a snippet icon.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Color {
    /// No color / surface default color
    #[default]
    None,
    /// 4-bit color with brightness
    Color4(Color4, bool),
    /// 256-color
    Color256(u8),
    // RGB
    RGB(u8, u8, u8),
}

/// Parses a color from a string: color names ("red", "bright-green"),
/// 256-color index (0-255), or hex RGB ("rrggbb" or "#rrggbb").
impl FromStr for Color {
    type Err = Error;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim().to_lowercase();
        let (base, bright) = match s.strip_prefix("bright-") {
            Some(base) => (base, true),
            None => (s.as_str(), false),
        };
        let named = match base {
            "black" => Some(Color4::Black),
            "red" => Some(Color4::Red),
            "green" => Some(Color4::Green),
            "yellow" => Some(Color4::Yellow),
            "blue" => Some(Color4::Blue),
            "magenta" => Some(Color4::Magenta),
            "cyan" => Some(Color4::Cyan),
            "white" => Some(Color4::White),
            _ => None,
        };
        if let Some(c) = named {
            return Ok(Self::Color4(c, bright));
        }
        if s == "gray" || s == "grey" {
            return Ok(Self::Color4(Color4::Black, true));
        }
        if s.is_empty() || s == "none" {
            return Ok(Self::None);
        }
        if let Ok(c) = s.parse::<u8>() {
            return Ok(Self::Color256(c));
        }
        let err = Error::ColorParsing(s.clone());
        let hex = s.strip_prefix('#').unwrap_or(&s);
        if hex.len() != 6 || !hex.is_ascii() {
            return Err(err);
        }
        let r = u8::from_str_radix(&hex[0..2], 16).map_err(|_| err.clone())?;
        let g = u8::from_str_radix(&hex[2..4], 16).map_err(|_| err.clone())?;
        let b = u8::from_str_radix(&hex[4..6], 16).map_err(|_| err.clone())?;
        Ok(Self::RGB(r, g, b))
    }
}

impl<'de> Deserialize<'de> for Color {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Formats the color as a string (color name, index, or hex RGB).
impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Color::None => write!(f, ""),
            Color::Color4(c, true) => write!(f, "bright-{}", c.name()),
            Color::Color4(c, false) => write!(f, "{}", c.name()),
            Color::Color256(c) => write!(f, "{}", c),
            Color::RGB(r, g, b) => write!(f, "{:02x}{:02x}{:02x}", r, g, b),
        }
    }
}

impl Color {
    /// Return an ANSI SGR escape sequence for this color.
    ///
    /// If `is_fg` is true, returns a foreground color sequence (uses `38` / 30–97 codes).
    /// If `is_fg` is false, returns a background color sequence (uses `48` / 40–107 codes).
    pub fn to_ansi(&self, is_fg: bool) -> String {
        match self {
            Color::None => {
                let code = if is_fg { 39 } else { 49 };
                format!("\x1b[{}m", code)
            }
            Color::Color4(col, bright) => {
                let idx = col.index();
                let code = match (*bright, is_fg) {
                    (true, true) => 90 + idx,
                    (true, false) => 100 + idx,
                    (false, true) => 30 + idx,
                    (false, false) => 40 + idx,
                };
                format!("\x1b[{}m", code)
            }
            Color::Color256(n) => {
                let prefix = if is_fg { "38" } else { "48" };
                format!("\x1b[{};5;{}m", prefix, n)
            }
            Color::RGB(r, g, b) => {
                let prefix = if is_fg { "38" } else { "48" };
                format!("\x1b[{};2;{};{};{}m", prefix, r, g, b)
            }
        }
    }

    /// Returns a CSS color value, or `None` for the surface default.
    pub fn to_css(&self) -> Option<String> {
        match self {
            Color::None => None,
            Color::RGB(r, g, b) => Some(format!("#{:02x}{:02x}{:02x}", r, g, b)),
            Color::Color4(c, false) => Some(c.name().into()),
            Color::Color4(c, true) => {
                let (r, g, b) = match c {
                    Color4::Black => (0x4e, 0x4e, 0x4e),
                    Color4::Red => (0xff, 0, 0),
                    Color4::Green => (0, 0xff, 0),
                    Color4::Yellow => (0xff, 0xff, 0),
                    Color4::Blue => (0, 0, 0xff),
                    Color4::Magenta => (0xff, 0, 0xff),
                    Color4::Cyan => (0, 0xff, 0xff),
                    Color4::White => (0xff, 0xff, 0xff),
                };
                Some(format!("#{:02x}{:02x}{:02x}", r, g, b))
            }
            Color::Color256(c) => {
                let c = *c as usize;
                if c < 16 {
                    let table16 = [
                        "#000000", "#800000", "#008000", "#808000", "#000080", "#800080",
                        "#008080", "#c0c0c0", "#4e4e4e", "#ff0000", "#00ff00", "#ffff00",
                        "#0000ff", "#ff00ff", "#00ffff", "#ffffff",
                    ];
                    Some(table16[c].to_string())
                } else if c < 232 {
                    // 6x6x6 color cube
                    let idx = c - 16;
                    let levels: [u8; 6] = [0, 95, 135, 175, 215, 255];
                    Some(format!(
                        "#{:02x}{:02x}{:02x}",
                        levels[idx / 36],
                        levels[(idx % 36) / 6],
                        levels[idx % 6]
                    ))
                } else {
                    let gray = 8 + (c - 232) * 10;
                    Some(format!("#{:02x}{:02x}{:02x}", gray, gray, gray))
                }
            }
        }
    }
}

/// Sequence resetting both foreground and background to defaults.
pub fn reset_ansi() -> String {
    Color::None.to_ansi(true) + &Color::None.to_ansi(false)
}
