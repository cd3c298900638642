//! Partial-reveal strategies.
//!
//! Both strategies show the first `k` printed units of a parsed markup
//! string without ever handing the rendering surface an unterminated tag.
//!
//! - [`CountedReveal`] builds the display string once and only moves a
//!   visible-unit counter. The surface does the hiding. O(1) per step.
//! - [`StringReconstructor`] rebuilds a complete string per step: the revealed
//!   prefix, closing tags for everything still open, then the rest of the text
//!   wrapped in a fully transparent color. O(revealed length) per step.
//!
//! Once every unit is revealed both produce the same output.

use crate::parser::{Symbol, SymbolSequence, TagStack};
use crate::vocabulary::TagVocabulary;

/// Wrapper that renders text invisibly while keeping its layout.
const HIDDEN_OPEN: &str = "<color=#00000000>";
const HIDDEN_CLOSE: &str = "</color>";

/// Counted-visibility reveal state.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CountedReveal {
    text: String,
    total: usize,
    visible: usize,
}

impl CountedReveal {
    pub fn new(sequence: &SymbolSequence) -> Self {
        Self {
            text: sequence.display_text(),
            total: sequence.printable_len(),
            visible: 0,
        }
    }

    /// The full display string, handed to the surface up front.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Total printed units.
    pub fn total(&self) -> usize {
        self.total
    }

    /// Printed units currently shown.
    pub fn visible(&self) -> usize {
        self.visible
    }

    pub fn is_complete(&self) -> bool {
        self.visible >= self.total
    }

    /// Reveal one more unit, returning its printed index.
    pub fn advance(&mut self) -> Option<usize> {
        if self.is_complete() {
            return None;
        }
        self.visible += 1;
        Some(self.visible - 1)
    }

    /// Reveal everything at once.
    pub fn reveal_all(&mut self) {
        self.visible = self.total;
    }

    pub fn reset(&mut self) {
        self.visible = 0;
    }
}

/// String-reconstruction reveal over a parsed sequence.
#[derive(Clone, Debug)]
pub struct StringReconstructor<'a> {
    sequence: &'a SymbolSequence,
    vocabulary: &'a TagVocabulary,
    /// `boundaries[k]` is the symbol index just past the k-th printed unit.
    boundaries: Vec<usize>,
}

impl<'a> StringReconstructor<'a> {
    pub fn new(sequence: &'a SymbolSequence, vocabulary: &'a TagVocabulary) -> Self {
        let mut boundaries = vec![0];
        boundaries.extend(
            sequence
                .symbols()
                .iter()
                .enumerate()
                .filter(|(_, symbol)| symbol.is_printable())
                .map(|(index, _)| index + 1),
        );
        Self {
            sequence,
            vocabulary,
            boundaries,
        }
    }

    /// Total printed units.
    pub fn total(&self) -> usize {
        self.boundaries.len() - 1
    }

    /// The string to display with `visible` printed units revealed.
    ///
    /// # Examples
    ///
    /// ```
    /// use tagtext::{StringReconstructor, SymbolSequence, TagVocabulary};
    ///
    /// let vocab = TagVocabulary::default();
    /// let seq = SymbolSequence::parse("<b>ab</b>c", &vocab);
    /// let frames = StringReconstructor::new(&seq, &vocab);
    /// assert_eq!(frames.frame(1), "<b>a</b><color=#00000000>bc</color>");
    /// assert_eq!(frames.frame(3), "<b>ab</b>c");
    /// ```
    pub fn frame(&self, visible: usize) -> String {
        let symbols = self.sequence.symbols();
        let visible = visible.min(self.total());
        // Trailing tags after the last unit belong to the final frame.
        let split = if visible == self.total() {
            symbols.len()
        } else {
            self.boundaries[visible]
        };

        let mut open = TagStack::new();
        let mut out = String::new();
        for symbol in &symbols[..split] {
            if let Symbol::Passthrough(tag) = symbol {
                if tag.is_opening() {
                    open.push(tag.clone());
                } else {
                    // Mismatches were reported when the sequence was parsed.
                    let _ = open.close(tag);
                }
            }
            symbol.write_display(&mut out);
        }
        out.push_str(&open.closing_suffix());

        let hidden = self.hidden_remainder(&symbols[split..], &open);
        if !hidden.is_empty() {
            out.push_str(HIDDEN_OPEN);
            out.push_str(&hidden);
            out.push_str(HIDDEN_CLOSE);
        }
        out
    }

    /// Every frame from nothing revealed to everything revealed.
    pub fn frames(&self) -> impl Iterator<Item = String> + '_ {
        (0..=self.total()).map(|visible| self.frame(visible))
    }

    /// Unrevealed symbols as display text, minus the closing tags already
    /// emitted for `open` and minus every color tag.
    fn hidden_remainder(&self, rest: &[Symbol], open: &TagStack) -> String {
        let mut outstanding: Vec<_> = open.iter_innermost_first().collect();
        let mut hidden = String::new();

        for symbol in rest {
            match symbol {
                Symbol::Passthrough(tag) if tag.is_closing() => {
                    if let Some(pos) = outstanding
                        .iter()
                        .position(|o| o.is_type(tag.type_name()))
                    {
                        outstanding.remove(pos);
                    } else if !self.vocabulary.is_color_type(tag.type_name()) {
                        hidden.push_str(tag.raw_text());
                    }
                }
                Symbol::Passthrough(tag) if self.vocabulary.is_color_type(tag.type_name()) => {}
                other => other.write_display(&mut hidden),
            }
        }

        hidden
    }
}
