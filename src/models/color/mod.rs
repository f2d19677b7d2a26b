//! RGB color values used by events, goals and tasks.
//!
//! Colors travel as `#rrggbb` strings on the wire and in settings files.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// An opaque 24-bit color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ColorParseError {
    #[error("Color must start with '#'")]
    MissingHash,
    #[error("Color must be in hex format (#RRGGBB or #RGB), got '{0}'")]
    InvalidHex(String),
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    pub fn to_color32(self) -> egui::Color32 {
        egui::Color32::from_rgb(self.r, self.g, self.b)
    }

    pub fn from_color32(color: egui::Color32) -> Self {
        Self::new(color.r(), color.g(), color.b())
    }
}

impl FromStr for Rgb {
    type Err = ColorParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let hex = trimmed
            .strip_prefix('#')
            .ok_or(ColorParseError::MissingHash)?;
        let invalid = || ColorParseError::InvalidHex(trimmed.to_string());

        if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(invalid());
        }

        match hex.len() {
            6 => {
                let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).map_err(|_| invalid());
                Ok(Self::new(channel(0)?, channel(2)?, channel(4)?))
            }
            3 => {
                // #RGB expands each nibble: #F57 -> #FF5577
                let channel = |i: usize| {
                    u8::from_str_radix(&hex[i..i + 1], 16)
                        .map(|v| v * 17)
                        .map_err(|_| invalid())
                };
                Ok(Self::new(channel(0)?, channel(1)?, channel(2)?))
            }
            _ => Err(invalid()),
        }
    }
}

impl TryFrom<String> for Rgb {
    type Error = ColorParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Rgb> for String {
    fn from(value: Rgb) -> Self {
        value.to_hex()
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_long_hex() {
        assert_eq!("#9b87f5".parse::<Rgb>().unwrap(), Rgb::new(0x9b, 0x87, 0xf5));
        assert_eq!("#65C466".parse::<Rgb>().unwrap(), Rgb::new(0x65, 0xc4, 0x66));
    }

    #[test]
    fn test_parse_short_hex() {
        assert_eq!("#F57".parse::<Rgb>().unwrap(), Rgb::new(0xff, 0x55, 0x77));
    }

    #[test]
    fn test_parse_invalid() {
        assert_eq!("9b87f5".parse::<Rgb>(), Err(ColorParseError::MissingHash));
        assert!("#GGGGGG".parse::<Rgb>().is_err());
        assert!("#FFFF".parse::<Rgb>().is_err());
        assert!("#".parse::<Rgb>().is_err());
    }

    #[test]
    fn test_display_is_lowercase_hex() {
        assert_eq!(Rgb::new(249, 115, 22).to_string(), "#f97316");
    }

    #[test]
    fn test_serde_as_string() {
        let json = serde_json::to_string(&Rgb::new(0xec, 0x48, 0x99)).unwrap();
        assert_eq!(json, "\"#ec4899\"");

        let parsed: Rgb = serde_json::from_str("\"#38BDF8\"").unwrap();
        assert_eq!(parsed, Rgb::new(0x38, 0xbd, 0xf8));

        assert!(serde_json::from_str::<Rgb>("\"blue\"").is_err());
    }
}
