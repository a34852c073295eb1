//! Linear RGBA colors with sRGB hex parsing
//!
//! Colors are stored linear, which is what the shader's uniform expects.
//! Hex strings in config files and on the command line are sRGB, the way
//! color pickers and CSS write them.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use trishade_shader::ColorUniform;

/// Error parsing a hex color string.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ColorParseError {
    #[error("expected 3, 4, 6 or 8 hex digits, got {0}")]
    InvalidLength(usize),
    #[error("invalid hex digit in `{0}`")]
    InvalidDigit(String),
}

/// Linear RGBA color.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const BLACK: Self = Self::from_linear(0.0, 0.0, 0.0, 1.0);
    pub const WHITE: Self = Self::from_linear(1.0, 1.0, 1.0, 1.0);
    pub const BLUE: Self = Self::from_linear(0.0, 0.0, 1.0, 1.0);

    pub const fn from_linear(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// From 8-bit sRGB channels. Alpha is linear and only rescaled.
    pub fn from_srgb8(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self {
            r: srgb_to_linear(r as f32 / 255.0),
            g: srgb_to_linear(g as f32 / 255.0),
            b: srgb_to_linear(b as f32 / 255.0),
            a: a as f32 / 255.0,
        }
    }

    /// To 8-bit sRGB channels, clamping out-of-range values.
    pub fn to_srgb8(&self) -> [u8; 4] {
        let quantize = |v: f32| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
        [
            quantize(linear_to_srgb(self.r)),
            quantize(linear_to_srgb(self.g)),
            quantize(linear_to_srgb(self.b)),
            quantize(self.a),
        ]
    }

    /// Parse `#rgb`, `#rgba`, `#rrggbb` or `#rrggbbaa`. The `#` is optional.
    pub fn parse_hex(s: &str) -> Result<Self, ColorParseError> {
        let digits = s.trim().trim_start_matches('#');
        if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(ColorParseError::InvalidDigit(s.to_string()));
        }

        let expanded: String = match digits.len() {
            3 | 4 => digits.chars().flat_map(|c| [c, c]).collect(),
            6 | 8 => digits.to_string(),
            n => return Err(ColorParseError::InvalidLength(n)),
        };

        let channel = |i: usize| {
            u8::from_str_radix(&expanded[i * 2..i * 2 + 2], 16)
                .map_err(|_| ColorParseError::InvalidDigit(s.to_string()))
        };

        let a = if expanded.len() == 8 { channel(3)? } else { 255 };
        Ok(Self::from_srgb8(channel(0)?, channel(1)?, channel(2)?, a))
    }

    /// `#rrggbbaa` in sRGB.
    pub fn to_hex(&self) -> String {
        let [r, g, b, a] = self.to_srgb8();
        format!("#{:02x}{:02x}{:02x}{:02x}", r, g, b, a)
    }

    pub fn to_array(&self) -> [f32; 4] {
        [self.r, self.g, self.b, self.a]
    }

    /// The value uploaded to the shader's color binding.
    pub fn uniform(&self) -> ColorUniform {
        ColorUniform::from(self.to_array())
    }
}

fn srgb_to_linear(c: f32) -> f32 {
    if c <= 0.04045 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

fn linear_to_srgb(c: f32) -> f32 {
    if c <= 0.003_130_8 {
        c * 12.92
    } else {
        1.055 * c.powf(1.0 / 2.4) - 0.055
    }
}

impl FromStr for Color {
    type Err = ColorParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_hex(s)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl TryFrom<String> for Color {
    type Error = ColorParseError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::parse_hex(&s)
    }
}

impl From<Color> for String {
    fn from(c: Color) -> Self {
        c.to_hex()
    }
}

impl From<Color> for wgpu::Color {
    fn from(c: Color) -> Self {
        Self {
            r: c.r as f64,
            g: c.g as f64,
            b: c.b as f64,
            a: c.a as f64,
        }
    }
}

impl From<Color> for ColorUniform {
    fn from(c: Color) -> Self {
        c.uniform()
    }
}
