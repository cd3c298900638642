//! Parser for angle-bracket markup.
//!
//! This module contains the tag tokenizer, the open-tag stack and the symbol
//! sequence builder.

mod stack;
mod symbol;
mod tag;

pub use stack::TagStack;
pub use symbol::{Directive, Symbol, SymbolSequence};
pub use tag::{CLOSE_DELIMITER, END_MARKER, OPEN_DELIMITER, PARAMETER_DELIMITER, Tag};
