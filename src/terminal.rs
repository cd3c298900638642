//! Terminal rendering surface.
//!
//! Prints the revealed part of the display text as it grows, styling each
//! run with crossterm. Text is printed in place, so the terminal keeps the
//! result after the program exits.

use std::io::{self, Write};

use crossterm::queue;
use crossterm::style::{Attribute, Color as TermColor, Print, ResetColor, SetAttribute, SetForegroundColor};
use log::warn;
use tagtext::{Glyph, Modifiers, RenderedText, Style, TagVocabulary};
use typer::RevealSurface;

/// Printed in place of a sprite.
const SPRITE_GLYPH: char = '◆';

pub struct TerminalSurface<W: Write> {
    out: W,
    vocabulary: TagVocabulary,
    rendered: RenderedText,
    shown: usize,
}

impl<W: Write> TerminalSurface<W> {
    pub fn new(out: W, vocabulary: TagVocabulary) -> Self {
        Self {
            out,
            vocabulary,
            rendered: RenderedText::default(),
            shown: 0,
        }
    }

    /// Printed units already on screen.
    pub fn shown(&self) -> usize {
        self.shown
    }

    fn print_range(&mut self, start: usize, end: usize) -> io::Result<()> {
        for (glyphs, style) in self.rendered.runs(start..end) {
            queue!(self.out, SetAttribute(Attribute::Reset), ResetColor)?;
            apply_style(&mut self.out, &style)?;
            for glyph in glyphs {
                match glyph {
                    // Raw mode does not return the carriage
                    Glyph::Char('\n') => queue!(self.out, Print("\r\n"))?,
                    Glyph::Char(c) => queue!(self.out, Print(c))?,
                    Glyph::Sprite(_) => queue!(self.out, Print(SPRITE_GLYPH))?,
                }
            }
        }
        queue!(self.out, SetAttribute(Attribute::Reset), ResetColor)?;
        self.out.flush()
    }
}

fn apply_style<W: Write>(out: &mut W, style: &Style) -> io::Result<()> {
    if let Some(color) = &style.color {
        let (r, g, b) = color.rgb();
        queue!(out, SetForegroundColor(TermColor::Rgb { r, g, b }))?;
    }
    if style.modifiers.contains(Modifiers::BOLD) {
        queue!(out, SetAttribute(Attribute::Bold))?;
    }
    if style.modifiers.contains(Modifiers::ITALIC) {
        queue!(out, SetAttribute(Attribute::Italic))?;
    }
    Ok(())
}

impl<W: Write + Send + 'static> RevealSurface for TerminalSurface<W> {
    fn set_text(&mut self, markup: &str) {
        if self.shown > 0 {
            if let Err(err) = queue!(self.out, Print("\r\n")).and_then(|_| self.out.flush()) {
                warn!("failed to start a new line: {err}");
            }
        }
        self.rendered = RenderedText::render(markup, &self.vocabulary);
        self.shown = 0;
    }

    fn set_visible(&mut self, visible: usize) {
        // Already printed text cannot be taken back
        let visible = visible.min(self.rendered.len());
        if visible <= self.shown {
            return;
        }
        if let Err(err) = self.print_range(self.shown, visible) {
            warn!("failed to print to terminal: {err}");
        }
        self.shown = visible;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn surface() -> TerminalSurface<Vec<u8>> {
        TerminalSurface::new(Vec::new(), TagVocabulary::default())
    }

    fn output(surface: &TerminalSurface<Vec<u8>>) -> String {
        String::from_utf8_lossy(&surface.out).into_owned()
    }

    #[test]
    fn prints_only_new_units() {
        let mut surface = surface();
        surface.set_text("abc");
        surface.set_visible(2);
        assert!(output(&surface).contains("ab"));
        assert!(!output(&surface).contains('c'));

        surface.set_visible(1);
        assert_eq!(surface.shown(), 2);

        surface.set_visible(10);
        assert!(output(&surface).contains('c'));
        assert_eq!(surface.shown(), 3);
    }

    #[test]
    fn styles_runs() {
        let mut surface = surface();
        surface.set_text("<b>x</b><color=#ff0000>y</color>");
        surface.set_visible(2);
        let out = output(&surface);
        assert!(out.contains("\u{1b}[1mx"));
        assert!(out.contains("\u{1b}[38;2;255;0;0my"));
    }

    #[test]
    fn newlines_and_sprites() {
        let mut surface = surface();
        surface.set_text("a\nb<sprite=1>");
        surface.set_visible(4);
        let out = output(&surface);
        assert!(out.contains("a\r\nb"));
        assert!(out.contains(SPRITE_GLYPH));
    }
}
