//! Animation range extraction.
//!
//! Animation directives mark a span of printed units to be animated with a
//! named preset. Only one directive can be open at a time; opening another
//! replaces the pending one.

use log::{debug, warn};
use tagtext::{AnimationHint, Tag};

use crate::error::PlanDiagnostic;
use crate::presets::Presets;

/// How the animation collaborator evaluates a range.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AnimationKind {
    Shake,
    Curve,
}

/// Printed units `start..=end` animated with one preset.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AnimationRange {
    pub start: usize,
    /// Last animated printed index (inclusive).
    pub end: usize,
    pub preset_key: String,
    pub kind: AnimationKind,
}

impl AnimationRange {
    pub fn new(start: usize, end: usize, preset_key: impl Into<String>, kind: AnimationKind) -> Self {
        Self {
            start,
            end,
            preset_key: preset_key.into(),
            kind,
        }
    }

    /// A range over every one of `len` printed units. `None` when `len` is 0.
    pub fn covering(len: usize, preset_key: impl Into<String>, kind: AnimationKind) -> Option<Self> {
        let end = len.checked_sub(1)?;
        Some(Self::new(0, end, preset_key, kind))
    }

    pub fn contains(&self, index: usize) -> bool {
        (self.start..=self.end).contains(&index)
    }

    /// Number of animated units. Never 0.
    pub fn unit_count(&self) -> usize {
        self.end - self.start + 1
    }
}

#[derive(Debug)]
struct Pending {
    start: usize,
    key: String,
    hint: AnimationHint,
}

/// Turns animation directives into [`AnimationRange`]s while the printed
/// index advances.
#[derive(Debug)]
pub struct AnimationExtractor<'p> {
    presets: &'p Presets,
    pending: Option<Pending>,
    ranges: Vec<AnimationRange>,
    diagnostics: Vec<PlanDiagnostic>,
}

impl<'p> AnimationExtractor<'p> {
    pub fn new(presets: &'p Presets) -> Self {
        Self {
            presets,
            pending: None,
            ranges: Vec::new(),
            diagnostics: Vec::new(),
        }
    }

    /// Handle an animation directive met after `printed` units.
    pub fn on_directive(&mut self, tag: &Tag, hint: AnimationHint, printed: usize) {
        if tag.is_opening() {
            let key = tag.parameter().trim_matches('"').to_string();
            if let Some(previous) = self.pending.replace(Pending {
                start: printed,
                key,
                hint,
            }) {
                debug!(
                    "animation '{}' from {} replaced by {tag} before closing",
                    previous.key, previous.start
                );
            }
            return;
        }

        let Some(pending) = self.pending.take() else {
            self.report(PlanDiagnostic::UnopenedAnimation(tag.raw_text().to_string()));
            return;
        };
        let Some(end) = printed.checked_sub(1).filter(|end| *end >= pending.start) else {
            self.report(PlanDiagnostic::EmptyAnimation {
                key: pending.key,
                at: pending.start,
            });
            return;
        };
        match self.presets.resolve(&pending.key, pending.hint) {
            Ok(kind) => self
                .ranges
                .push(AnimationRange::new(pending.start, end, pending.key, kind)),
            Err(diagnostic) => self.report(diagnostic),
        }
    }

    /// Finish extraction, reporting a directive left open.
    pub fn finish(mut self) -> (Vec<AnimationRange>, Vec<PlanDiagnostic>) {
        if let Some(pending) = self.pending.take() {
            self.report(PlanDiagnostic::UnclosedAnimation {
                key: pending.key,
                start: pending.start,
            });
        }
        (self.ranges, self.diagnostics)
    }

    fn report(&mut self, diagnostic: PlanDiagnostic) {
        warn!("{diagnostic}");
        self.diagnostics.push(diagnostic);
    }
}
