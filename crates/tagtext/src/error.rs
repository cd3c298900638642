//! Error types for markup tokenizing and parsing.
//!
//! None of these abort a parse. They are collected as diagnostics on the
//! parsed output and logged where they are found.

use thiserror::Error;

/// Recoverable problems found while scanning markup.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MarkupError {
    /// A `<` with no `>` after it. The `<` is kept as a literal character.
    #[error("unterminated tag starting at byte {0}")]
    MalformedTag(usize),

    /// A closing tag popped an open tag of a different type.
    #[error("closing tag </{found}> does not match open tag <{expected}>")]
    MismatchedClose {
        /// Type of the tag that was on top of the stack.
        expected: String,
        /// Type named by the closing tag.
        found: String,
    },

    /// A closing tag arrived while no tag was open.
    #[error("closing tag </{0}> has no matching open tag")]
    UnopenedClose(String),

    /// A tag whose type is in no vocabulary list.
    #[error("unknown tag {0}")]
    UnknownTag(String),
}

/// Errors that can occur when parsing a color parameter.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ColorParseError {
    /// Unknown color name.
    #[error("unknown color name: {0}")]
    UnknownName(String),

    /// Invalid hex color format.
    #[error("invalid hex color: {0}")]
    InvalidHex(String),
}
