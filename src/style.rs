//! Color model and fill/stroke description.
//!
//! Colors are parsed from hex with a single contract: [`Color::from_hex`]
//! (and the equivalent [`FromStr`] impl) returns a [`ColorError`] for any
//! malformed input.

#[cfg(test)]
#[path = "style_test.rs"]
mod style_test;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Error returned by [`Color::from_hex`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ColorError {
    /// The digit count is not 3, 4, 6, or 8.
    #[error("invalid hex color length: {0:?}")]
    InvalidLength(String),
    /// A character is not a hex digit.
    #[error("invalid hex digit in color: {0:?}")]
    InvalidDigit(String),
}

/// An sRGB color with straight (non-premultiplied) alpha in `0.0..=1.0`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f64,
}

impl Color {
    pub const BLACK: Self = Self::rgb(0, 0, 0);
    pub const WHITE: Self = Self::rgb(255, 255, 255);

    #[must_use]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    #[must_use]
    pub const fn rgba(r: u8, g: u8, b: u8, a: f64) -> Self {
        Self { r, g, b, a }
    }

    /// Parse `#RGB`, `#RGBA`, `#RRGGBB`, or `#RRGGBBAA`. The `#` is optional.
    ///
    /// # Errors
    ///
    /// Returns [`ColorError`] when the length or any digit is invalid.
    pub fn from_hex(hex: &str) -> Result<Self, ColorError> {
        let digits = hex.strip_prefix('#').unwrap_or(hex);
        if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(ColorError::InvalidDigit(hex.to_owned()));
        }

        let nibble = |i: usize| -> Result<u8, ColorError> {
            u8::from_str_radix(&digits[i..=i], 16).map_err(|_| ColorError::InvalidDigit(hex.to_owned()))
        };
        let byte = |i: usize| -> Result<u8, ColorError> {
            u8::from_str_radix(&digits[i..i + 2], 16).map_err(|_| ColorError::InvalidDigit(hex.to_owned()))
        };

        match digits.len() {
            3 | 4 => {
                let r = nibble(0)? * 17;
                let g = nibble(1)? * 17;
                let b = nibble(2)? * 17;
                let a = if digits.len() == 4 { f64::from(nibble(3)? * 17) / 255.0 } else { 1.0 };
                Ok(Self { r, g, b, a })
            }
            6 | 8 => {
                let r = byte(0)?;
                let g = byte(2)?;
                let b = byte(4)?;
                let a = if digits.len() == 8 { f64::from(byte(6)?) / 255.0 } else { 1.0 };
                Ok(Self { r, g, b, a })
            }
            _ => Err(ColorError::InvalidLength(hex.to_owned())),
        }
    }

    /// `#rrggbb`, dropping alpha.
    #[must_use]
    pub fn to_hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// CSS `rgba(r, g, b, a)` string.
    #[must_use]
    pub fn to_css(&self) -> String {
        format!("rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
    }

    /// Convert to hue (degrees), saturation and value (percent).
    #[must_use]
    pub fn to_hsva(&self) -> Hsva {
        let r = f64::from(self.r) / 255.0;
        let g = f64::from(self.g) / 255.0;
        let b = f64::from(self.b) / 255.0;

        let max = r.max(g).max(b);
        let min = r.min(g).min(b);
        let d = max - min;

        let mut h = 0.0;
        if d != 0.0 {
            h = if max == r {
                ((g - b) / d) % 6.0
            } else if max == g {
                (b - r) / d + 2.0
            } else {
                (r - g) / d + 4.0
            };
            h = (h * 60.0).round();
            if h < 0.0 {
                h += 360.0;
            }
        }

        let s = if max == 0.0 { 0.0 } else { d / max * 100.0 };
        Hsva { h, s, v: max * 100.0, a: self.a }
    }

    /// Convert back from [`Hsva`], rounding channels to the nearest byte.
    #[must_use]
    pub fn from_hsva(hsva: Hsva) -> Self {
        let s = hsva.s / 100.0;
        let v = hsva.v / 100.0;
        let c = v * s;
        let x = c * (1.0 - ((hsva.h / 60.0) % 2.0 - 1.0).abs());
        let m = v - c;

        let (r, g, b) = match hsva.h {
            h if h < 60.0 => (c, x, 0.0),
            h if h < 120.0 => (x, c, 0.0),
            h if h < 180.0 => (0.0, c, x),
            h if h < 240.0 => (0.0, x, c),
            h if h < 300.0 => (x, 0.0, c),
            _ => (c, 0.0, x),
        };

        Self { r: to_channel(r + m), g: to_channel(g + m), b: to_channel(b + m), a: hsva.a }
    }
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn to_channel(unit: f64) -> u8 {
    (unit * 255.0).round().clamp(0.0, 255.0) as u8
}

impl FromStr for Color {
    type Err = ColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_css())
    }
}

/// Hue/saturation/value with alpha, as used by color pickers.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Hsva {
    /// Hue in degrees, `0.0..360.0`.
    pub h: f64,
    /// Saturation in percent.
    pub s: f64,
    /// Value in percent.
    pub v: f64,
    pub a: f64,
}

/// How a closed shape's interior is painted.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Fill {
    Solid { color: Color },
}

impl Fill {
    #[must_use]
    pub fn solid(color: Color) -> Self {
        Self::Solid { color }
    }

    #[must_use]
    pub fn color(&self) -> Color {
        match self {
            Self::Solid { color } => *color,
        }
    }
}

/// Outline color and width.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Stroke {
    pub color: Color,
    pub width: f64,
}

impl Stroke {
    #[must_use]
    pub fn new(color: Color, width: f64) -> Self {
        Self { color, width }
    }
}

/// Horizontal text alignment inside a text box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextAlign {
    #[default]
    Left,
    Center,
    Right,
}

impl TextAlign {
    /// The CSS keyword for this alignment.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Left => "left",
            Self::Center => "center",
            Self::Right => "right",
        }
    }
}
