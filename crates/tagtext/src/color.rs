//! Color parameters of `<color=...>` tags.
//!
//! Supports named colors and `#RGB`, `#RGBA`, `#RRGGBB`, `#RRGGBBAA` hex.

use phf::phf_map;

use crate::error::ColorParseError;

static NAMED_COLORS: phf::Map<&'static str, (u8, u8, u8)> = phf_map! {
    "black" => (0, 0, 0),
    "white" => (255, 255, 255),
    "red" => (255, 0, 0),
    "green" => (0, 128, 0),
    "lime" => (0, 255, 0),
    "blue" => (0, 0, 255),
    "yellow" => (255, 255, 0),
    "cyan" => (0, 255, 255),
    "aqua" => (0, 255, 255),
    "magenta" => (255, 0, 255),
    "fuchsia" => (255, 0, 255),
    "orange" => (255, 128, 0),
    "purple" => (160, 32, 240),
    "grey" => (128, 128, 128),
    "gray" => (128, 128, 128),
    "silver" => (192, 192, 192),
    "maroon" => (128, 0, 0),
    "olive" => (128, 128, 0),
    "navy" => (0, 0, 128),
    "teal" => (0, 128, 128),
    "brown" => (165, 42, 42),
    "pink" => (255, 192, 203),
    "gold" => (255, 215, 0),
    "indigo" => (75, 0, 130),
    "violet" => (238, 130, 238),
    "lightblue" => (173, 216, 230),
    "darkblue" => (0, 0, 139),
};

/// A color specification in a `<color>` tag.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Color {
    /// Named color, lower-cased (e.g. "red").
    Named(String),
    /// RGBA components.
    Rgba(u8, u8, u8, u8),
}

impl Color {
    /// Parse a color from a tag parameter. Surrounding quotes are ignored.
    ///
    /// # Examples
    ///
    /// ```
    /// use tagtext::Color;
    ///
    /// assert_eq!(Color::parse("#ff000080").unwrap(), Color::Rgba(255, 0, 0, 128));
    /// assert_eq!(Color::parse("\"Red\"").unwrap(), Color::Named("red".into()));
    /// assert!(Color::parse("#00000000").unwrap().is_transparent());
    /// ```
    pub fn parse(input: &str) -> Result<Self, ColorParseError> {
        let input = input.trim().trim_matches('"');

        if let Some(hex) = input.strip_prefix('#') {
            return Self::parse_hex(hex);
        }

        let name = input.to_lowercase();
        if NAMED_COLORS.contains_key(name.as_str()) {
            Ok(Color::Named(name))
        } else {
            Err(ColorParseError::UnknownName(input.to_string()))
        }
    }

    fn parse_hex(hex: &str) -> Result<Self, ColorParseError> {
        let invalid = || ColorParseError::InvalidHex(format!("#{hex}"));
        let digits: Vec<u8> = hex
            .chars()
            .map(|c| c.to_digit(16).map(|d| d as u8))
            .collect::<Option<_>>()
            .ok_or_else(invalid)?;

        match digits.as_slice() {
            [r, g, b] => Ok(Color::Rgba(r * 17, g * 17, b * 17, 255)),
            [r, g, b, a] => Ok(Color::Rgba(r * 17, g * 17, b * 17, a * 17)),
            [r1, r2, g1, g2, b1, b2] => Ok(Color::Rgba(
                r1 * 16 + r2,
                g1 * 16 + g2,
                b1 * 16 + b2,
                255,
            )),
            [r1, r2, g1, g2, b1, b2, a1, a2] => Ok(Color::Rgba(
                r1 * 16 + r2,
                g1 * 16 + g2,
                b1 * 16 + b2,
                a1 * 16 + a2,
            )),
            _ => Err(invalid()),
        }
    }

    /// RGB components, resolving names.
    pub fn rgb(&self) -> (u8, u8, u8) {
        match self {
            Color::Named(name) => NAMED_COLORS
                .get(name.as_str())
                .copied()
                .unwrap_or((255, 255, 255)),
            Color::Rgba(r, g, b, _) => (*r, *g, *b),
        }
    }

    pub fn alpha(&self) -> u8 {
        match self {
            Color::Named(_) => 255,
            Color::Rgba(_, _, _, a) => *a,
        }
    }

    /// Fully transparent colors hide the text they apply to.
    pub fn is_transparent(&self) -> bool {
        self.alpha() == 0
    }
}
