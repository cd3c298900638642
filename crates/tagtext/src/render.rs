//! Render model for markup handed to a rendering surface.
//!
//! [`RenderedText`] is what a rich-text surface makes of a markup string:
//! a list of printed glyphs (characters and sprites) plus style spans over
//! printed indices. It lets the two reveal strategies be compared on what a
//! reader would actually see.

use std::ops::Range;

use crate::parser::{Symbol, SymbolSequence};
use crate::style::Style;
use crate::vocabulary::TagVocabulary;

/// One printed unit.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Glyph {
    Char(char),
    /// A sprite, identified by its tag parameter.
    Sprite(String),
}

/// A styled region over printed indices.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Span {
    /// First printed index (inclusive).
    pub start: usize,
    /// Last printed index (exclusive).
    pub end: usize,
    pub style: Style,
}

impl Span {
    pub fn new(start: usize, end: usize, style: Style) -> Self {
        Self { start, end, style }
    }

    /// Check if this span contains a given printed index.
    pub fn contains(&self, index: usize) -> bool {
        index >= self.start && index < self.end
    }

    pub fn is_zero_length(&self) -> bool {
        self.start >= self.end
    }
}

/// A glyph a reader can see, with its resolved style.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VisibleUnit {
    pub index: usize,
    pub glyph: Glyph,
    pub style: Style,
}

/// Markup as the rendering surface understands it.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RenderedText {
    glyphs: Vec<Glyph>,
    /// Spans in the order their tags were opened, outermost first.
    spans: Vec<Span>,
}

impl RenderedText {
    /// Interpret `markup` the way the rendering surface does.
    ///
    /// # Examples
    ///
    /// ```
    /// use tagtext::{RenderedText, TagVocabulary};
    ///
    /// let rendered = RenderedText::render("<b>Hi</b> there", &TagVocabulary::default());
    /// assert_eq!(rendered.len(), 8);
    /// assert_eq!(rendered.spans().len(), 1);
    /// ```
    pub fn render(markup: &str, vocabulary: &TagVocabulary) -> Self {
        let sequence = SymbolSequence::parse(markup, vocabulary);
        let mut glyphs = Vec::new();
        let mut spans: Vec<Span> = Vec::new();
        let mut open: Vec<usize> = Vec::new();

        for symbol in sequence.symbols() {
            match symbol {
                Symbol::Character(c) => glyphs.push(Glyph::Char(*c)),
                Symbol::Sprite(tag) => glyphs.push(Glyph::Sprite(tag.parameter().to_string())),
                Symbol::Passthrough(tag) if tag.is_opening() => {
                    open.push(spans.len());
                    spans.push(Span::new(glyphs.len(), glyphs.len(), Style::from_tag(tag)));
                }
                Symbol::Passthrough(_) => {
                    if let Some(index) = open.pop() {
                        spans[index].end = glyphs.len();
                    }
                }
                Symbol::Directive(_) => {}
            }
        }

        // Close any remaining open tags
        for index in open {
            spans[index].end = glyphs.len();
        }
        spans.retain(|span| !span.is_zero_length() && !span.style.is_empty());

        Self { glyphs, spans }
    }

    pub fn glyphs(&self) -> &[Glyph] {
        &self.glyphs
    }

    pub fn spans(&self) -> &[Span] {
        &self.spans
    }

    /// Number of printed units.
    pub fn len(&self) -> usize {
        self.glyphs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.glyphs.is_empty()
    }

    /// Merged style of every span covering `index`, inner spans winning.
    pub fn style_at(&self, index: usize) -> Style {
        self.spans
            .iter()
            .filter(|span| span.contains(index))
            .fold(Style::default(), |style, span| style.apply(&span.style))
    }

    /// Units a reader sees when only the first `limit` printed units are
    /// revealed (`None` reveals everything). Transparent units are skipped.
    pub fn visible_units(&self, limit: Option<usize>) -> Vec<VisibleUnit> {
        let limit = limit.unwrap_or(self.glyphs.len()).min(self.glyphs.len());
        (0..limit)
            .filter_map(|index| {
                let style = self.style_at(index);
                (!style.is_hidden()).then(|| VisibleUnit {
                    index,
                    glyph: self.glyphs[index].clone(),
                    style,
                })
            })
            .collect()
    }

    /// Iterate over runs of identically styled glyphs within `range`.
    pub fn runs(&self, range: Range<usize>) -> RunIterator<'_> {
        RunIterator {
            rendered: self,
            pos: range.start.min(self.glyphs.len()),
            end: range.end.min(self.glyphs.len()),
        }
    }
}

/// Iterator over styled runs in a [`RenderedText`].
pub struct RunIterator<'a> {
    rendered: &'a RenderedText,
    pos: usize,
    end: usize,
}

impl<'a> Iterator for RunIterator<'a> {
    type Item = (&'a [Glyph], Style);

    fn next(&mut self) -> Option<Self::Item> {
        if self.pos >= self.end {
            return None;
        }

        // Find the next boundary (where style changes)
        let mut end = self.end;
        for span in &self.rendered.spans {
            if span.start > self.pos && span.start < end {
                end = span.start;
            }
            if span.end > self.pos && span.end < end {
                end = span.end;
            }
        }

        let style = self.rendered.style_at(self.pos);
        let glyphs = &self.rendered.glyphs[self.pos..end];
        self.pos = end;

        Some((glyphs, style))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Color;
    use crate::style::Modifiers;

    fn render(markup: &str) -> RenderedText {
        RenderedText::render(markup, &TagVocabulary::default())
    }

    #[test]
    fn plain_text_has_no_spans() {
        let rendered = render("Hello");
        assert_eq!(rendered.len(), 5);
        assert!(rendered.spans().is_empty());
    }

    #[test]
    fn nested_styles_resolve_inner_first() {
        let rendered = render("<color=red>a<color=blue>b</color>c</color>");
        assert_eq!(rendered.style_at(0).color, Some(Color::Named("red".into())));
        assert_eq!(rendered.style_at(1).color, Some(Color::Named("blue".into())));
        assert_eq!(rendered.style_at(2).color, Some(Color::Named("red".into())));
    }

    #[test]
    fn sprites_are_glyphs() {
        let rendered = render("a<sprite=7>");
        assert_eq!(
            rendered.glyphs(),
            &[Glyph::Char('a'), Glyph::Sprite("7".into())]
        );
    }

    #[test]
    fn unclosed_tag_runs_to_end() {
        let rendered = render("x<b>yz");
        assert_eq!(rendered.spans(), &[Span::new(1, 3, render("<b>.").style_at(0))]);
    }

    #[test]
    fn visible_units_skip_transparent_text() {
        let rendered = render("ab<color=#00000000>cd</color>");
        let visible = rendered.visible_units(None);
        assert_eq!(visible.len(), 2);
        assert_eq!(visible[1].glyph, Glyph::Char('b'));
    }

    #[test]
    fn visible_units_respect_limit() {
        let rendered = render("<i>abc</i>");
        let visible = rendered.visible_units(Some(2));
        assert_eq!(visible.len(), 2);
        assert_eq!(visible[0].style.modifiers, Modifiers::ITALIC);
    }

    #[test]
    fn runs_split_on_style_changes() {
        let rendered = render("ab<b>cd</b>e");
        let runs: Vec<_> = rendered.runs(0..rendered.len()).collect();
        assert_eq!(runs.len(), 3);
        assert_eq!(runs[1].0, &[Glyph::Char('c'), Glyph::Char('d')]);
        assert_eq!(runs[1].1.modifiers, Modifiers::BOLD);

        let partial: Vec<_> = rendered.runs(1..3).collect();
        assert_eq!(partial.len(), 2);
    }
}
