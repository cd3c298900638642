//! Symbol sequence builder.
//!
//! Converts raw markup into an ordered list of [`Symbol`]s by tokenizing at
//! the current offset, one tag or character at a time.

use log::{debug, warn};

use crate::error::MarkupError;
use crate::parser::stack::TagStack;
use crate::parser::tag::{OPEN_DELIMITER, Tag};
use crate::vocabulary::{DirectiveKind, TagClass, TagVocabulary};

/// A custom directive occurrence, consumed by timing and animation passes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Directive {
    pub kind: DirectiveKind,
    pub tag: Tag,
}

/// One element of parsed markup, in markup order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Symbol {
    /// A printable character.
    Character(char),
    /// A sprite tag. Prints as one unit although it came from a tag.
    Sprite(Tag),
    /// A tag forwarded verbatim to the rendering surface.
    Passthrough(Tag),
    /// A tag consumed here and never shown.
    Directive(Directive),
}

impl Symbol {
    /// Whether this symbol takes a reveal slot.
    pub fn is_printable(&self) -> bool {
        matches!(self, Symbol::Character(_) | Symbol::Sprite(_))
    }

    /// The tag behind this symbol, if any.
    pub fn tag(&self) -> Option<&Tag> {
        match self {
            Symbol::Character(_) => None,
            Symbol::Sprite(tag) | Symbol::Passthrough(tag) => Some(tag),
            Symbol::Directive(directive) => Some(&directive.tag),
        }
    }

    /// Append what the rendering surface should receive for this symbol.
    pub(crate) fn write_display(&self, out: &mut String) {
        match self {
            Symbol::Character(c) => out.push(*c),
            Symbol::Sprite(tag) | Symbol::Passthrough(tag) => out.push_str(tag.raw_text()),
            Symbol::Directive(_) => {}
        }
    }
}

/// Parsed markup: the symbol list plus everything noticed along the way.
#[derive(Clone, Debug, Default)]
pub struct SymbolSequence {
    symbols: Vec<Symbol>,
    diagnostics: Vec<MarkupError>,
    unclosed: Vec<Tag>,
}

impl SymbolSequence {
    /// Parse `text` against `vocabulary`.
    ///
    /// Never fails: malformed input is recovered from and reported through
    /// [`diagnostics`](Self::diagnostics).
    ///
    /// # Examples
    ///
    /// ```
    /// use tagtext::{SymbolSequence, TagVocabulary};
    ///
    /// let seq = SymbolSequence::parse("<b>Hi</b><delay=1>!</delay>", &TagVocabulary::default());
    /// assert_eq!(seq.printable_len(), 3);
    /// assert_eq!(seq.display_text(), "<b>Hi</b>!");
    /// ```
    pub fn parse(text: &str, vocabulary: &TagVocabulary) -> Self {
        let mut builder = Builder {
            vocabulary,
            stack: TagStack::new(),
            symbols: Vec::new(),
            diagnostics: Vec::new(),
        };

        let mut offset = 0;
        while let Some(c) = text[offset..].chars().next() {
            if c == OPEN_DELIMITER {
                if let Some(tag) = Tag::parse(&text[offset..]) {
                    offset += tag.raw_len();
                    builder.push_tag(tag);
                    continue;
                }
                debug!("unterminated tag at byte {offset}, keeping '<' as text");
                builder.diagnostics.push(MarkupError::MalformedTag(offset));
            }
            builder.symbols.push(Symbol::Character(c));
            offset += c.len_utf8();
        }

        Self {
            symbols: builder.symbols,
            diagnostics: builder.diagnostics,
            unclosed: builder.stack.as_slice().to_vec(),
        }
    }

    pub fn symbols(&self) -> &[Symbol] {
        &self.symbols
    }

    pub fn diagnostics(&self) -> &[MarkupError] {
        &self.diagnostics
    }

    /// Passthrough tags still open at the end of the input, outermost first.
    pub fn unclosed(&self) -> &[Tag] {
        &self.unclosed
    }

    /// Number of printable units (characters and sprites).
    pub fn printable_len(&self) -> usize {
        self.symbols.iter().filter(|s| s.is_printable()).count()
    }

    /// The string handed to the rendering surface: characters, sprites and
    /// passthrough tags, with directives and unknown tags removed.
    pub fn display_text(&self) -> String {
        let mut out = String::new();
        for symbol in &self.symbols {
            symbol.write_display(&mut out);
        }
        out
    }

    /// Printed characters only, without any tags.
    pub fn plain_text(&self) -> String {
        self.symbols
            .iter()
            .filter_map(|symbol| match symbol {
                Symbol::Character(c) => Some(*c),
                _ => None,
            })
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }
}

struct Builder<'v> {
    vocabulary: &'v TagVocabulary,
    stack: TagStack,
    symbols: Vec<Symbol>,
    diagnostics: Vec<MarkupError>,
}

impl Builder<'_> {
    fn push_tag(&mut self, tag: Tag) {
        match self.vocabulary.classify(tag.type_name()) {
            TagClass::Directive(kind) => {
                self.symbols.push(Symbol::Directive(Directive { kind, tag }));
            }
            TagClass::Sprite if tag.is_opening() => {
                self.symbols.push(Symbol::Sprite(tag));
            }
            TagClass::Passthrough => {
                if tag.is_opening() {
                    self.stack.push(tag.clone());
                } else if let Err(err) = self.stack.close(&tag) {
                    warn!("{err}");
                    self.diagnostics.push(err);
                }
                self.symbols.push(Symbol::Passthrough(tag));
            }
            TagClass::Sprite | TagClass::Unknown => {
                debug!("dropping unknown tag {tag}");
                self.diagnostics
                    .push(MarkupError::UnknownTag(tag.raw_text().to_string()));
            }
        }
    }
}
