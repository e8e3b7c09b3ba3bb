//! Color representation shared by overlays, brushes and preview tints.

use peniko::Color;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Errors produced when parsing a color string.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ColorParseError {
    #[error("empty color string")]
    Empty,
    #[error("invalid hex color: {0}")]
    InvalidHex(String),
    #[error("invalid rgb()/rgba() color: {0}")]
    InvalidFunction(String),
    #[error("unsupported color syntax: {0}")]
    Unsupported(String),
}

/// Serializable color representation (RGBA8).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SerializableColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl SerializableColor {
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, 255)
    }

    pub const fn black() -> Self {
        Self::rgb(0, 0, 0)
    }

    pub const fn white() -> Self {
        Self::rgb(255, 255, 255)
    }

    pub const fn transparent() -> Self {
        Self::new(0, 0, 0, 0)
    }

    pub fn is_transparent(&self) -> bool {
        self.a == 0
    }

    /// Alpha as a fraction in `0.0..=1.0`.
    pub fn alpha_f64(&self) -> f64 {
        f64::from(self.a) / 255.0
    }

    /// Same color with the alpha replaced by a `0.0..=1.0` fraction.
    pub fn with_alpha(self, alpha: f64) -> Self {
        Self {
            a: unit_to_u8(alpha),
            ..self
        }
    }

    /// Parse `#rgb`, `#rrggbb`, `#rrggbbaa`, `rgb(..)`, `rgba(..)` or `transparent`.
    pub fn parse(input: &str) -> Result<Self, ColorParseError> {
        let color = input.trim();
        if color.is_empty() {
            return Err(ColorParseError::Empty);
        }
        if color.eq_ignore_ascii_case("transparent") {
            return Ok(Self::transparent());
        }
        if let Some(hex) = color.strip_prefix('#') {
            return parse_hex(hex).ok_or_else(|| ColorParseError::InvalidHex(color.to_string()));
        }
        let lower = color.to_ascii_lowercase();
        if let Some(args) = lower
            .strip_prefix("rgba(")
            .or_else(|| lower.strip_prefix("rgb("))
            .and_then(|rest| rest.strip_suffix(')'))
        {
            return parse_rgb_function(args)
                .ok_or_else(|| ColorParseError::InvalidFunction(color.to_string()));
        }
        Err(ColorParseError::Unsupported(color.to_string()))
    }
}

fn unit_to_u8(value: f64) -> u8 {
    (value.clamp(0.0, 1.0) * 255.0).round() as u8
}

fn parse_hex(hex: &str) -> Option<SerializableColor> {
    if !hex.is_ascii() {
        return None;
    }
    let channel = |s: &str| u8::from_str_radix(s, 16).ok();
    match hex.len() {
        3 => {
            // #rgb -> #rrggbb
            let r = channel(&hex[0..1])? * 17;
            let g = channel(&hex[1..2])? * 17;
            let b = channel(&hex[2..3])? * 17;
            Some(SerializableColor::rgb(r, g, b))
        }
        6 => Some(SerializableColor::rgb(
            channel(&hex[0..2])?,
            channel(&hex[2..4])?,
            channel(&hex[4..6])?,
        )),
        8 => Some(SerializableColor::new(
            channel(&hex[0..2])?,
            channel(&hex[2..4])?,
            channel(&hex[4..6])?,
            channel(&hex[6..8])?,
        )),
        _ => None,
    }
}

fn parse_rgb_function(args: &str) -> Option<SerializableColor> {
    let parts: Vec<&str> = args.split(',').map(str::trim).collect();
    if parts.len() != 3 && parts.len() != 4 {
        return None;
    }
    let r = parts[0].parse::<u8>().ok()?;
    let g = parts[1].parse::<u8>().ok()?;
    let b = parts[2].parse::<u8>().ok()?;
    let a = match parts.get(3) {
        Some(alpha) => {
            let alpha = alpha.parse::<f64>().ok()?;
            if !(0.0..=1.0).contains(&alpha) {
                return None;
            }
            unit_to_u8(alpha)
        }
        None => 255,
    };
    Some(SerializableColor::new(r, g, b, a))
}

impl FromStr for SerializableColor {
    type Err = ColorParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for SerializableColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.a == 255 {
            write!(f, "#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
        } else {
            write!(f, "#{:02X}{:02X}{:02X}{:02X}", self.r, self.g, self.b, self.a)
        }
    }
}

impl From<Color> for SerializableColor {
    fn from(color: Color) -> Self {
        let rgba = color.to_rgba8();
        Self {
            r: rgba.r,
            g: rgba.g,
            b: rgba.b,
            a: rgba.a,
        }
    }
}

impl From<SerializableColor> for Color {
    fn from(color: SerializableColor) -> Self {
        Color::from_rgba8(color.r, color.g, color.b, color.a)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_hex() {
        assert_eq!(SerializableColor::parse("#FFF").unwrap(), SerializableColor::white());
        assert_eq!(
            SerializableColor::parse("#FF4757").unwrap(),
            SerializableColor::rgb(0xFF, 0x47, 0x57)
        );
        assert_eq!(
            SerializableColor::parse("#000000CC").unwrap(),
            SerializableColor::new(0, 0, 0, 0xCC)
        );
        assert!(matches!(
            SerializableColor::parse("#12"),
            Err(ColorParseError::InvalidHex(_))
        ));
        assert!(SerializableColor::parse("#GGGGGG").is_err());
    }

    #[test]
    fn test_parse_rgba() {
        let shadow = SerializableColor::parse("rgba(0,0,0,0.6)").unwrap();
        assert_eq!(shadow, SerializableColor::new(0, 0, 0, 153));
        let warm = SerializableColor::parse("rgb(255, 140, 0)").unwrap();
        assert_eq!(warm, SerializableColor::rgb(255, 140, 0));
        assert!(SerializableColor::parse("rgba(0,0,0,1.5)").is_err());
        assert!(SerializableColor::parse("rgba(0,0)").is_err());
    }

    #[test]
    fn test_transparent() {
        let color: SerializableColor = "transparent".parse().unwrap();
        assert!(color.is_transparent());
        assert_eq!(SerializableColor::parse("  "), Err(ColorParseError::Empty));
        assert!(matches!(
            SerializableColor::parse("rebeccapurple"),
            Err(ColorParseError::Unsupported(_))
        ));
    }

    #[test]
    fn test_display() {
        assert_eq!(SerializableColor::rgb(0x1E, 0x90, 0xFF).to_string(), "#1E90FF");
        assert_eq!(SerializableColor::new(0, 0, 0, 0xCC).to_string(), "#000000CC");
    }

    #[test]
    fn test_peniko_roundtrip() {
        let original = SerializableColor::new(12, 34, 56, 78);
        let color: Color = original.into();
        assert_eq!(SerializableColor::from(color), original);
    }
}
