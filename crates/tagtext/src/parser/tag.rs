//! Tag tokenizer.
//!
//! Recognizes a single `<...>` token at the start of a string. This is a pure
//! function of its input: it never consults a vocabulary or touches any stack.

use std::borrow::Cow;
use std::fmt;

use nom::{
    IResult,
    bytes::complete::{take_till, take_while},
    character::complete::char,
    combinator::{opt, rest},
    sequence::{delimited, preceded, tuple},
};

/// Opens a tag token.
pub const OPEN_DELIMITER: char = '<';
/// Closes a tag token.
pub const CLOSE_DELIMITER: char = '>';
/// Marks a closing tag when it directly follows `<`.
pub const END_MARKER: char = '/';
/// Separates a tag's type name from its parameter.
pub const PARAMETER_DELIMITER: char = '=';

/// One tag occurrence in raw markup, e.g. `<color=red>` or `</b>`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Tag {
    type_name: String,
    parameter: String,
    is_closing: bool,
    raw_text: String,
}

impl Tag {
    /// Tokenize the tag at the start of `input`.
    ///
    /// Returns `None` when `input` does not start with `<`, or when no `>`
    /// follows it.
    ///
    /// # Examples
    ///
    /// ```
    /// use tagtext::Tag;
    ///
    /// let tag = Tag::parse("<color=#ff0000>red</color>").unwrap();
    /// assert_eq!(tag.type_name(), "color");
    /// assert_eq!(tag.parameter(), "#ff0000");
    /// assert_eq!(tag.raw_len(), 15);
    ///
    /// assert!(Tag::parse("<b").is_none());
    /// ```
    pub fn parse(input: &str) -> Option<Self> {
        let (_, body) = tag_body(input).ok()?;
        let raw_len = body.len() + OPEN_DELIMITER.len_utf8() + CLOSE_DELIMITER.len_utf8();
        let (_, (marker, type_name, parameter)) = split_body(body).ok()?;

        Some(Self {
            type_name: type_name.to_string(),
            parameter: parameter.unwrap_or_default().to_string(),
            is_closing: marker.is_some(),
            raw_text: input[..raw_len].to_string(),
        })
    }

    /// Build an opening tag, synthesizing its raw text.
    pub fn opening(type_name: &str, parameter: Option<&str>) -> Self {
        let raw_text = match parameter {
            Some(p) => format!("<{type_name}={p}>"),
            None => format!("<{type_name}>"),
        };
        Self {
            type_name: type_name.to_string(),
            parameter: parameter.unwrap_or_default().to_string(),
            is_closing: false,
            raw_text,
        }
    }

    /// Build a closing tag for `type_name`.
    pub fn closing(type_name: &str) -> Self {
        Self {
            type_name: type_name.to_string(),
            parameter: String::new(),
            is_closing: true,
            raw_text: format!("</{type_name}>"),
        }
    }

    /// The tag type without end marker or parameter: `color` for `</color>`.
    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    /// Text between `=` and the final `>`, empty when absent.
    pub fn parameter(&self) -> &str {
        &self.parameter
    }

    pub fn is_closing(&self) -> bool {
        self.is_closing
    }

    pub fn is_opening(&self) -> bool {
        !self.is_closing
    }

    /// The tag exactly as it appeared in the markup.
    pub fn raw_text(&self) -> &str {
        &self.raw_text
    }

    /// Number of bytes the tokenizer consumed for this tag.
    pub fn raw_len(&self) -> usize {
        self.raw_text.len()
    }

    /// The text that closes this tag: `</type>` for an opening tag, the raw
    /// text itself for a closing one.
    pub fn closing_text(&self) -> Cow<'_, str> {
        if self.is_closing {
            Cow::Borrowed(&self.raw_text)
        } else {
            Cow::Owned(format!("</{}>", self.type_name))
        }
    }

    /// Case-insensitive type comparison.
    pub fn is_type(&self, type_name: &str) -> bool {
        self.type_name.eq_ignore_ascii_case(type_name)
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw_text)
    }
}

/// `<` body `>`, stopping at the first `>`.
fn tag_body(input: &str) -> IResult<&str, &str> {
    delimited(
        char(OPEN_DELIMITER),
        take_till(|c: char| c == CLOSE_DELIMITER),
        char(CLOSE_DELIMITER),
    )(input)
}

/// Split a tag body into end marker, type name and parameter.
fn split_body(body: &str) -> IResult<&str, (Option<char>, &str, Option<&str>)> {
    tuple((
        opt(char(END_MARKER)),
        preceded(
            take_while(|c: char| c == END_MARKER),
            take_till(|c: char| c == PARAMETER_DELIMITER),
        ),
        opt(preceded(char(PARAMETER_DELIMITER), rest)),
    ))(body)
}
