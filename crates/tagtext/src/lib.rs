//! Angle-bracket rich text markup for progressive text reveal.
//!
//! This crate tokenizes markup like `<b>Hello</b> <delay=0.5>world</delay>`
//! into an ordered symbol stream, separating three kinds of tags:
//!
//! - **Passthrough tags** (`<b>`, `<i>`, `<size=..>`, `<color=..>`) are kept and
//!   forwarded to the rendering surface.
//! - **Custom directives** (`<delay=..>`, `<speed=..>`, `<anim=..>`, `<shake=..>`,
//!   `<curve=..>`) are consumed by the typing layer and never shown.
//! - **Sprite tags** (`<sprite=..>`) print as a single unit.
//!
//! Parsing never fails. Malformed or unknown markup is recovered from and
//! reported as [`MarkupError`] diagnostics.
//!
//! # Partial reveal
//!
//! [`CountedReveal`] hands the whole display string to the surface once and
//! tracks how many printed units are visible. [`StringReconstructor`] builds
//! a self-contained, well-formed string for each reveal step instead.
//!
//! # Usage
//!
//! ```
//! use tagtext::{CountedReveal, SymbolSequence, TagVocabulary};
//!
//! let seq = SymbolSequence::parse("<b>Hi</b><delay=1>!</delay>", &TagVocabulary::default());
//! let mut reveal = CountedReveal::new(&seq);
//! assert_eq!(reveal.text(), "<b>Hi</b>!");
//! assert_eq!(reveal.advance(), Some(0));
//! assert_eq!(reveal.visible(), 1);
//! ```

pub mod color;
pub mod error;
pub mod parser;
pub mod render;
pub mod reveal;
pub mod strip;
pub mod style;
pub mod vocabulary;

// Re-export main types at crate root
pub use color::Color;
pub use error::{ColorParseError, MarkupError};
pub use parser::{Directive, Symbol, SymbolSequence, Tag, TagStack};
pub use render::{Glyph, RenderedText, Span, VisibleUnit};
pub use reveal::{CountedReveal, StringReconstructor};
pub use strip::{strip_all_tags, strip_custom_directives, strip_tags_of_type};
pub use style::{Modifiers, Style};
pub use vocabulary::{AnimationHint, DirectiveKind, TagClass, TagVocabulary};
