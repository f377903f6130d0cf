//! Color words and their RGB values
//!
//! Learner scripts name colors the way the classic turtle module does:
//! common color words ("red", "skyblue"), single-letter codes ("r", "k"),
//! or hex notation ("#ff8800", "#f80"). Parsing happens once, at the verb
//! boundary, so an unknown color word fails the script at the point it is
//! first evaluated rather than at render time.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::EngineError;

/// An opaque RGB color carried by drawing primitives
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const BLACK: Color = Color::new(0, 0, 0);
    pub const WHITE: Color = Color::new(255, 255, 255);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse a color word, letter code, or hex triplet
    pub fn parse(name: &str) -> Result<Self, EngineError> {
        let trimmed = name.trim();
        if let Some(hex) = trimmed.strip_prefix('#') {
            return Self::parse_hex(hex).ok_or_else(|| EngineError::UnknownColor {
                name: name.to_string(),
            });
        }
        Self::named(&trimmed.to_ascii_lowercase()).ok_or_else(|| EngineError::UnknownColor {
            name: name.to_string(),
        })
    }

    fn parse_hex(hex: &str) -> Option<Self> {
        match hex.len() {
            3 => {
                let value = u32::from_str_radix(hex, 16).ok()?;
                let r = ((value >> 8) & 0xf) as u8;
                let g = ((value >> 4) & 0xf) as u8;
                let b = (value & 0xf) as u8;
                Some(Color::new(r * 17, g * 17, b * 17))
            }
            6 => {
                let value = u32::from_str_radix(hex, 16).ok()?;
                Some(Color::new(
                    ((value >> 16) & 0xff) as u8,
                    ((value >> 8) & 0xff) as u8,
                    (value & 0xff) as u8,
                ))
            }
            _ => None,
        }
    }

    fn named(name: &str) -> Option<Self> {
        let color = match name {
            "black" | "k" => Color::new(0, 0, 0),
            "white" | "w" => Color::new(255, 255, 255),
            "red" | "r" => Color::new(255, 0, 0),
            "green" | "g" => Color::new(0, 128, 0),
            "blue" | "b" => Color::new(0, 0, 255),
            "cyan" | "c" => Color::new(0, 255, 255),
            "magenta" | "m" => Color::new(255, 0, 255),
            "yellow" | "y" => Color::new(255, 255, 0),
            "orange" => Color::new(255, 165, 0),
            "purple" => Color::new(128, 0, 128),
            "pink" => Color::new(255, 192, 203),
            "brown" => Color::new(165, 42, 42),
            "gray" | "grey" => Color::new(128, 128, 128),
            "lightgray" | "lightgrey" => Color::new(211, 211, 211),
            "darkgray" | "darkgrey" => Color::new(169, 169, 169),
            "lime" => Color::new(0, 255, 0),
            "navy" => Color::new(0, 0, 128),
            "teal" => Color::new(0, 128, 128),
            "olive" => Color::new(128, 128, 0),
            "maroon" => Color::new(128, 0, 0),
            "silver" => Color::new(192, 192, 192),
            "gold" => Color::new(255, 215, 0),
            "violet" => Color::new(238, 130, 238),
            "indigo" => Color::new(75, 0, 130),
            "turquoise" => Color::new(64, 224, 208),
            "coral" => Color::new(255, 127, 80),
            "salmon" => Color::new(250, 128, 114),
            "skyblue" => Color::new(135, 206, 235),
            "lightblue" => Color::new(173, 216, 230),
            "lightgreen" => Color::new(144, 238, 144),
            "darkgreen" => Color::new(0, 100, 0),
            "darkblue" => Color::new(0, 0, 139),
            "darkred" => Color::new(139, 0, 0),
            "hotpink" => Color::new(255, 105, 180),
            "orchid" => Color::new(218, 112, 214),
            "plum" => Color::new(221, 160, 221),
            "khaki" => Color::new(240, 230, 140),
            "beige" => Color::new(245, 245, 220),
            "ivory" => Color::new(255, 255, 240),
            "tan" => Color::new(210, 180, 140),
            "chocolate" => Color::new(210, 105, 30),
            "crimson" => Color::new(220, 20, 60),
            "tomato" => Color::new(255, 99, 71),
            "orangered" => Color::new(255, 69, 0),
            "royalblue" => Color::new(65, 105, 225),
            "steelblue" => Color::new(70, 130, 180),
            "dodgerblue" => Color::new(30, 144, 255),
            "forestgreen" => Color::new(34, 139, 34),
            "seagreen" => Color::new(46, 139, 87),
            "springgreen" => Color::new(0, 255, 127),
            "lavender" => Color::new(230, 230, 250),
            "aqua" => Color::new(0, 255, 255),
            "aquamarine" => Color::new(127, 255, 212),
            _ => return None,
        };
        Some(color)
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::BLACK
    }
}

impl FromStr for Color {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Color::parse(s)
    }
}

impl std::fmt::Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_named() {
        assert_eq!(Color::parse("red").unwrap(), Color::new(255, 0, 0));
        assert_eq!(Color::parse("  SkyBlue ").unwrap(), Color::new(135, 206, 235));
    }

    #[test]
    fn test_parse_letter_codes() {
        assert_eq!(Color::parse("k").unwrap(), Color::BLACK);
        assert_eq!(Color::parse("m").unwrap(), Color::new(255, 0, 255));
    }

    #[test]
    fn test_parse_hex() {
        assert_eq!(Color::parse("#ff8800").unwrap(), Color::new(255, 136, 0));
        assert_eq!(Color::parse("#f80").unwrap(), Color::new(255, 136, 0));
    }

    #[test]
    fn test_parse_unknown_fails() {
        let err = Color::parse("notacolor").unwrap_err();
        assert!(err.to_string().contains("notacolor"));
        assert!(Color::parse("#12345").is_err());
    }

    #[test]
    fn test_display_round_trip() {
        let c = Color::new(18, 52, 86);
        assert_eq!(Color::parse(&c.to_string()).unwrap(), c);
    }
}
