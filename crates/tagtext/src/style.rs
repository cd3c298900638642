//! Style carried by passthrough tags.
//!
//! A Style combines a color, a size and text modifiers. Styles stack: an
//! inner tag's values override an outer tag's.

use bitflags::bitflags;
use log::warn;

use crate::color::Color;
use crate::parser::Tag;

bitflags! {
    /// Text modifiers toggled by `<b>` and `<i>`.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct Modifiers: u8 {
        const BOLD = 1;
        const ITALIC = 1 << 1;
    }
}

/// Complete style specification for one printed unit.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Style {
    /// Text color.
    pub color: Option<Color>,
    /// Size parameter, kept verbatim (`40`, `150%`, `2em`).
    pub size: Option<String>,
    pub modifiers: Modifiers,
}

impl Style {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true if no style properties are set.
    pub fn is_empty(&self) -> bool {
        self.color.is_none() && self.size.is_none() && self.modifiers.is_empty()
    }

    /// Apply another style on top of this one.
    ///
    /// Values set in `other` override values in `self`; modifiers are OR'd.
    pub fn apply(&self, other: &Style) -> Style {
        Style {
            color: other.color.clone().or_else(|| self.color.clone()),
            size: other.size.clone().or_else(|| self.size.clone()),
            modifiers: self.modifiers | other.modifiers,
        }
    }

    /// The style an opening passthrough tag contributes.
    ///
    /// Unrecognized types and unparseable colors contribute nothing.
    pub fn from_tag(tag: &Tag) -> Style {
        let mut style = Style::new();
        match tag.type_name().to_ascii_lowercase().as_str() {
            "b" => style.modifiers |= Modifiers::BOLD,
            "i" => style.modifiers |= Modifiers::ITALIC,
            "size" => style.size = Some(tag.parameter().trim_matches('"').to_string()),
            "color" => match Color::parse(tag.parameter()) {
                Ok(color) => style.color = Some(color),
                Err(err) => warn!("ignoring color in {tag}: {err}"),
            },
            _ => {}
        }
        style
    }

    /// Whether text in this style is invisible.
    pub fn is_hidden(&self) -> bool {
        self.color.as_ref().is_some_and(Color::is_transparent)
    }
}
