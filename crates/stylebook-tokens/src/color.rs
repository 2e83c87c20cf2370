//! Hex color literals and WCAG contrast math.

use std::fmt;
use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::TokenError;

fn hex_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^#[0-9A-Fa-f]{6}$").expect("hex pattern is valid"))
}

/// A `#RRGGBB` color.
///
/// The literal is kept exactly as declared so that rendered output shows the
/// same text the catalogue author wrote, casing included.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct HexColor {
    literal: String,
    rgb: [u8; 3],
}

impl HexColor {
    /// Parse a `#RRGGBB` literal.
    pub fn parse(literal: &str) -> Result<Self, TokenError> {
        if !hex_pattern().is_match(literal) {
            return Err(TokenError::InvalidHex(literal.to_string()));
        }

        let channel = |i: usize| {
            u8::from_str_radix(&literal[i..i + 2], 16)
                .map_err(|_| TokenError::InvalidHex(literal.to_string()))
        };

        Ok(Self {
            literal: literal.to_string(),
            rgb: [channel(1)?, channel(3)?, channel(5)?],
        })
    }

    /// Parse a literal from the built-in catalogue.
    pub(crate) fn builtin(literal: &'static str) -> Self {
        Self::parse(literal).expect("built-in color literal is valid")
    }

    /// Pure white, the page background.
    pub fn white() -> Self {
        Self {
            literal: "#FFFFFF".to_string(),
            rgb: [255, 255, 255],
        }
    }

    /// Pure black.
    pub fn black() -> Self {
        Self {
            literal: "#000000".to_string(),
            rgb: [0, 0, 0],
        }
    }

    /// The literal as declared.
    pub fn as_str(&self) -> &str {
        &self.literal
    }

    /// Red, green and blue channels.
    pub fn rgb(&self) -> [u8; 3] {
        self.rgb
    }

    /// WCAG 2.x relative luminance in `0.0..=1.0`.
    pub fn relative_luminance(&self) -> f64 {
        let linear = |c: u8| {
            let c = f64::from(c) / 255.0;
            if c <= 0.03928 {
                c / 12.92
            } else {
                ((c + 0.055) / 1.055).powf(2.4)
            }
        };

        let [r, g, b] = self.rgb;
        0.2126 * linear(r) + 0.7152 * linear(g) + 0.0722 * linear(b)
    }

    /// WCAG contrast ratio against another color, in `1.0..=21.0`.
    pub fn contrast_ratio(&self, other: &HexColor) -> f64 {
        let a = self.relative_luminance();
        let b = other.relative_luminance();
        let (lighter, darker) = if a >= b { (a, b) } else { (b, a) };
        (lighter + 0.05) / (darker + 0.05)
    }
}

impl fmt::Display for HexColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.literal)
    }
}

impl std::str::FromStr for HexColor {
    type Err = TokenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Serialize for HexColor {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.literal)
    }
}

impl<'de> Deserialize<'de> for HexColor {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let literal = String::deserialize(deserializer)?;
        Self::parse(&literal).map_err(serde::de::Error::custom)
    }
}

/// A named brand or semantic color.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColorToken {
    pub name: String,
    pub hex: HexColor,
}

impl ColorToken {
    /// Build a token from a name and a literal.
    pub fn new(name: &str, hex: &str) -> Result<Self, TokenError> {
        Ok(Self {
            name: name.to_string(),
            hex: HexColor::parse(hex)?,
        })
    }
}

/// One step of the neutral ramp (e.g. `500 -> #64748B`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NeutralStep {
    pub step: u16,
    pub hex: HexColor,
}

impl NeutralStep {
    pub fn new(step: u16, hex: &str) -> Result<Self, TokenError> {
        Ok(Self {
            step,
            hex: HexColor::parse(hex)?,
        })
    }

    /// Display label, e.g. `Neutral 500`.
    pub fn label(&self) -> String {
        format!("Neutral {}", self.step)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_valid_literal() {
        let color = HexColor::parse("#2563EB").unwrap();

        assert_eq!(color.as_str(), "#2563EB");
        assert_eq!(color.rgb(), [0x25, 0x63, 0xEB]);
    }

    #[test]
    fn keeps_literal_casing() {
        let color = HexColor::parse("#7c3aed").unwrap();

        assert_eq!(color.to_string(), "#7c3aed");
        assert_eq!(color.rgb(), [0x7C, 0x3A, 0xED]);
    }

    #[test]
    fn rejects_malformed_literals() {
        for bad in ["2563EB", "#2563E", "#2563EBFF", "#GG63EB", "", "#"] {
            assert!(
                matches!(HexColor::parse(bad), Err(TokenError::InvalidHex(_))),
                "accepted {bad:?}"
            );
        }
    }

    #[test]
    fn black_on_white_is_maximum_contrast() {
        let ratio = HexColor::black().contrast_ratio(&HexColor::white());

        assert!((ratio - 21.0).abs() < 1e-9);
    }

    #[test]
    fn contrast_is_symmetric() {
        let primary = HexColor::parse("#2563EB").unwrap();
        let white = HexColor::white();

        assert_eq!(
            primary.contrast_ratio(&white),
            white.contrast_ratio(&primary)
        );
    }

    #[test]
    fn primary_passes_text_contrast_on_white() {
        let primary = HexColor::parse("#2563EB").unwrap();

        let ratio = primary.contrast_ratio(&HexColor::white());

        assert!(ratio > 4.5 && ratio < 5.5, "ratio was {ratio}");
    }

    #[test]
    fn deserializes_and_rejects_through_serde() {
        let ok: ColorToken = serde_json::from_str(r##"{"name":"Accent","hex":"#06B6D4"}"##).unwrap();
        assert_eq!(ok.hex.as_str(), "#06B6D4");

        let err = serde_json::from_str::<ColorToken>(r#"{"name":"Accent","hex":"cyan"}"#);
        assert!(err.is_err());
    }
}
